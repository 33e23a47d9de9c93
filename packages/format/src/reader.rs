//! Line-oriented `.dfn` reader
//!
//! Reading never fails. Lines the reader cannot place are dropped and logged
//! at debug level; the result is always a well-formed novel.

use crate::writer::Marker;
use dfn_editor::{IdGenerator, IdKind, Novel, Slide, SlideStatus};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Title used when the text has no `[title]` line
pub const FALLBACK_TITLE: &str = "Untitled Novel";

/// One classified input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Title(&'a str),
    Open(Marker, &'a str),
    Status(&'a str),
    Text(&'a str),
}

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:\[title\](?<title>.*)\[/title\]|---(?<marker>CHAPTER|EXTRACT): (?<name>.*)---|\[status\](?<status>.*)\[/status\])$",
        )
        .expect("valid .dfn line pattern")
    })
}

/// Classify a line; markers are matched with trailing whitespace ignored
pub fn classify(line: &str) -> Line<'_> {
    let Some(caps) = line_pattern().captures(line.trim_end()) else {
        return Line::Text(line);
    };

    if let Some(title) = caps.name("title") {
        Line::Title(title.as_str())
    } else if let (Some(marker), Some(name)) = (caps.name("marker"), caps.name("name")) {
        let marker = match marker.as_str() {
            "CHAPTER" => Marker::Chapter,
            _ => Marker::Extract,
        };
        Line::Open(marker, name.as_str())
    } else if let Some(status) = caps.name("status") {
        Line::Status(status.as_str())
    } else {
        Line::Text(line)
    }
}

/// Where incoming status and text lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Before the first chapter
    Preamble,
    Chapter(usize),
    Extract(usize, usize),
    /// Inside an extract that had no chapter to belong to
    Orphan,
}

struct Reader<'i> {
    ids: &'i mut IdGenerator,
    title: Option<String>,
    novel: Novel,
    cursor: Cursor,
    buffer: Vec<String>,
}

impl<'i> Reader<'i> {
    fn new(ids: &'i mut IdGenerator) -> Self {
        Self {
            ids,
            title: None,
            novel: Novel::new(FALLBACK_TITLE),
            cursor: Cursor::Preamble,
            buffer: Vec::new(),
        }
    }

    fn current(&mut self) -> Option<&mut Slide> {
        match self.cursor {
            Cursor::Chapter(chapter) => self.novel.slides.get_mut(chapter),
            Cursor::Extract(chapter, extract) => self
                .novel
                .slides
                .get_mut(chapter)?
                .children
                .as_mut()?
                .get_mut(extract),
            Cursor::Preamble | Cursor::Orphan => None,
        }
    }

    fn flush(&mut self) {
        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        if let Some(slide) = self.current() {
            slide.content = content;
        }
    }

    fn read_line(&mut self, number: usize, line: &str) {
        match classify(line) {
            Line::Title(title) => match self.title {
                None => self.title = Some(title.to_string()),
                Some(_) => debug!(line = number, "Ignoring repeated title line"),
            },

            Line::Open(Marker::Chapter, name) => {
                self.flush();
                let id = self.ids.next_id(IdKind::Chapter, &self.novel);
                self.novel.slides.push(Slide::chapter(id, name));
                self.cursor = Cursor::Chapter(self.novel.slides.len() - 1);
            }

            Line::Open(Marker::Extract, name) => {
                self.flush();
                let chapter = match self.cursor {
                    Cursor::Chapter(chapter) | Cursor::Extract(chapter, _) => chapter,
                    Cursor::Preamble | Cursor::Orphan => {
                        debug!(line = number, extract = %name, "Ignoring extract outside a chapter");
                        self.cursor = Cursor::Orphan;
                        return;
                    }
                };

                let id = self.ids.next_id(IdKind::Extract, &self.novel);
                let extracts = self.novel.slides[chapter].children.get_or_insert_with(Vec::new);
                extracts.push(Slide::extract(id, name));
                self.cursor = Cursor::Extract(chapter, extracts.len() - 1);
            }

            Line::Status(status) => {
                let status = SlideStatus::from(status.to_string());
                match self.current() {
                    Some(slide) => slide.status = status,
                    None => debug!(line = number, "Ignoring status line outside a slide"),
                }
            }

            Line::Text(text) => match self.cursor {
                Cursor::Chapter(_) | Cursor::Extract(..) => self.buffer.push(text.to_string()),
                Cursor::Preamble | Cursor::Orphan => {
                    if !text.trim().is_empty() {
                        debug!(line = number, "Ignoring text outside a slide");
                    }
                }
            },
        }
    }

    fn finish(mut self) -> Novel {
        self.flush();

        for chapter in &mut self.novel.slides {
            if chapter.is_container() {
                chapter.content.clear();
            }
        }
        if let Some(title) = self.title {
            self.novel.title = title;
        }
        self.novel
    }
}

/// Build a novel from `.dfn` text, assigning fresh ids from `ids`
pub fn import(text: &str, ids: &mut IdGenerator) -> Novel {
    let mut reader = Reader::new(ids);
    for (index, line) in text.lines().enumerate() {
        reader.read_line(index + 1, line);
    }
    let novel = reader.finish();

    info!(
        title = %novel.title,
        chapters = novel.slides.len(),
        extracts = novel.slides.iter().map(|c| c.extracts().len()).sum::<usize>(),
        "Imported novel"
    );
    novel
}
