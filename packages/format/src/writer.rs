use dfn_editor::{Novel, Slide};
use tracing::info;

/// Marker kinds that open a node in a `.dfn` file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Chapter,
    Extract,
}

impl Marker {
    pub fn keyword(self) -> &'static str {
        match self {
            Marker::Chapter => "CHAPTER",
            Marker::Extract => "EXTRACT",
        }
    }
}

/// Output buffer for the flat-text format
#[derive(Debug, Default)]
pub struct DfnWriter {
    buffer: String,
}

impl DfnWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        self.add(text);
        self.add("\n");
    }

    pub fn write_title(&mut self, title: &str) {
        self.add_line(&format!("[title]{title}[/title]"));
        self.add("\n");
    }

    /// Marker, status line, content, then a blank separator line
    pub fn write_node(&mut self, marker: Marker, slide: &Slide, content: &str) {
        self.add_line(&format!("---{}: {}---", marker.keyword(), slide.title));
        self.add_line(&format!("[status]{}[/status]", slide.status));
        self.add_line(content);
        self.add("\n");
    }

    pub fn finish(self) -> String {
        self.buffer.trim_end().to_string()
    }
}

/// Render a novel as `.dfn` text
pub fn export(novel: &Novel) -> String {
    let mut writer = DfnWriter::new();
    writer.write_title(&novel.title);

    for chapter in &novel.slides {
        let content = if chapter.is_container() { "" } else { &chapter.content };
        writer.write_node(Marker::Chapter, chapter, content);

        for extract in chapter.extracts() {
            writer.write_node(Marker::Extract, extract, &extract.content);
        }
    }

    info!(
        title = %novel.title,
        chapters = novel.slides.len(),
        "Exported novel"
    );
    writer.finish()
}
