//! # Novel Document Model
//!
//! A novel is an ordered list of chapters. A chapter may hold an ordered list
//! of extracts; extracts never hold children.
//!
//! ```text
//! Novel
//!  ├─ Chapter (leaf)       content lives here
//!  └─ Chapter (container)  content is always empty
//!      ├─ Extract
//!      └─ Extract
//! ```
//!
//! `children: Some(_)` marks a node as chapter-shaped even when the list is
//! empty. `None` marks an extract.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Opaque slide identifier, unique across the whole novel
pub type SlideId = String;

/// Editorial status of a slide
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlideStatus {
    #[default]
    Draft,
    NeedsReview,
    Complete,

    /// Unrecognized value, kept verbatim
    Other(String),
}

impl SlideStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SlideStatus::Draft => "draft",
            SlideStatus::NeedsReview => "needs review",
            SlideStatus::Complete => "complete",
            SlideStatus::Other(value) => value,
        }
    }
}

impl fmt::Display for SlideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlideStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "draft" => SlideStatus::Draft,
            "needs review" | "needs_review" | "needs-review" => SlideStatus::NeedsReview,
            "complete" => SlideStatus::Complete,
            _ => SlideStatus::Other(s.to_string()),
        };
        Ok(status)
    }
}

impl From<String> for SlideStatus {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(status) => status,
            Err(never) => match never {},
        }
    }
}

impl From<SlideStatus> for String {
    fn from(status: SlideStatus) -> Self {
        match status {
            SlideStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// A chapter or an extract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    pub title: String,

    /// DFN markup
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub status: SlideStatus,

    #[serde(rename = "extracts", default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Slide>>,
}

impl Slide {
    pub fn chapter(id: impl Into<SlideId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            status: SlideStatus::Draft,
            children: Some(Vec::new()),
        }
    }

    pub fn extract(id: impl Into<SlideId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            status: SlideStatus::Draft,
            children: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_status(mut self, status: SlideStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_extracts(mut self, extracts: Vec<Slide>) -> Self {
        if !extracts.is_empty() {
            self.content.clear();
        }
        self.children = Some(extracts);
        self
    }

    /// Has a children list, possibly empty
    pub fn is_chapter_shaped(&self) -> bool {
        self.children.is_some()
    }

    /// Has at least one extract
    pub fn is_container(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }

    pub fn extracts(&self) -> &[Slide] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Append an extract, clearing own content when it is the first one
    pub(crate) fn attach_extract(&mut self, index: Option<usize>, extract: Slide) {
        let children = self.children.get_or_insert_with(Vec::new);
        if children.is_empty() {
            self.content.clear();
        }
        let index = index.unwrap_or(children.len()).min(children.len());
        children.insert(index, extract);
    }
}

/// Root aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Novel {
    pub title: String,

    #[serde(default)]
    pub slides: Vec<Slide>,
}

impl Novel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
        }
    }

    pub fn with_slides(mut self, slides: Vec<Slide>) -> Self {
        self.slides = slides;
        self
    }

    /// Every slide in display order: each chapter followed by its extracts
    pub fn iter_slides(&self) -> impl Iterator<Item = &Slide> {
        self.slides
            .iter()
            .flat_map(|chapter| std::iter::once(chapter).chain(chapter.extracts().iter()))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.iter_slides().any(|slide| slide.id == id)
    }

    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.iter_slides().find(|slide| slide.id == id)
    }

    pub fn first_chapter_id(&self) -> Option<&str> {
        self.slides.first().map(|chapter| chapter.id.as_str())
    }

    /// Built-in document used when nothing else is available
    pub fn sample() -> Self {
        Novel::new("The Crimson Chronicles").with_slides(vec![
            Slide::chapter("chapter-1", "Chapter 1: The Beginning")
                .with_status(SlideStatus::Complete)
                .with_extracts(vec![
                    Slide::extract("extract-1-1", "The Discovery")
                        .with_status(SlideStatus::Complete)
                        .with_content(
                            "\"Hello,\" she [b]whispered[/b] in the [color=rgb(250,150,150)]moonlight[/color]. \
                             The ancient manuscript was written in [font=Cinzel]barely legible in the dim light[/font]. \
                             She found the [bg=white][color=black]important passage[/color][/bg] highlighted in the old book. \
                             The first clue was a small, almost insignificant detail. A misplaced book, a faint scent of ozone. \
                             [i]Something was wrong.[/i] The detective spoke in [font=Times New Roman]formal tones[/font].",
                        ),
                    Slide::extract("extract-1-2", "A New Lead")
                        .with_content(
                            "The street kid replied with [font=Comic Sans MS]casual slang[/font], giving a description \
                             that opened up a new path in the investigation. \
                             The chemical formula H[sub]2[/sub]O appeared next to E=mc[sup]2[/sup].",
                        ),
                ]),
            Slide::chapter("chapter-2", "Chapter 2: The Conspiracy").with_content(
                "She read the [u][b]warning label[/b][/u] carefully: \
                 \"[color=red]DANGER: Contains [font=Courier New][size=14]toxic substances[/size][/font][/color].\" \
                 This changed everything. The conspiracy was deeper than she could have ever imagined.",
            ),
            Slide::chapter("chapter-3", "Chapter 3: The Confrontation")
                .with_status(SlideStatus::NeedsReview)
                .with_content(
                    "The final showdown took place under a stormy sky. Rain lashed down, mixing with the tears \
                     on her face. It was time to end this, once and for all.",
                ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text_forms() {
        assert_eq!(SlideStatus::NeedsReview.to_string(), "needs review");
        assert_eq!("needs_review".parse::<SlideStatus>(), Ok(SlideStatus::NeedsReview));
        assert_eq!("Needs-Review".parse::<SlideStatus>(), Ok(SlideStatus::NeedsReview));
        assert_eq!("COMPLETE".parse::<SlideStatus>(), Ok(SlideStatus::Complete));
        assert_eq!(
            "on hold".parse::<SlideStatus>(),
            Ok(SlideStatus::Other("on hold".to_string()))
        );
        assert_eq!(SlideStatus::Other("on hold".into()).to_string(), "on hold");
    }

    #[test]
    fn test_json_shape_uses_extracts_key() {
        let novel = Novel::sample();
        let json = serde_json::to_value(&novel).unwrap();

        assert_eq!(json["slides"][0]["extracts"][1]["id"], "extract-1-2");
        assert_eq!(json["slides"][2]["status"], "needs review");
        assert!(json["slides"][0]["extracts"][0].get("extracts").is_none());

        let back: Novel = serde_json::from_value(json).unwrap();
        assert_eq!(back, novel);
    }

    #[test]
    fn test_reads_blob_without_extracts_key() {
        let blob = r#"{"title":"T","slides":[{"id":"c","title":"C","content":"x","status":"draft"}]}"#;
        let novel: Novel = serde_json::from_str(blob).unwrap();
        assert_eq!(novel.slides[0].children, None);
        assert_eq!(novel.slides[0].content, "x");
    }

    #[test]
    fn test_sample_respects_container_invariant() {
        let novel = Novel::sample();
        assert_eq!(novel.slides.len(), 3);
        for chapter in &novel.slides {
            assert!(chapter.is_chapter_shaped());
            if chapter.is_container() {
                assert!(chapter.content.is_empty());
            }
        }
        assert_eq!(novel.slides[0].extracts().len(), 2);
    }

    #[test]
    fn test_iter_slides_in_display_order() {
        let ids: Vec<_> = Novel::sample().iter_slides().map(|s| s.id.clone()).collect();
        assert_eq!(
            ids,
            ["chapter-1", "extract-1-1", "extract-1-2", "chapter-2", "chapter-3"]
        );
    }

    #[test]
    fn test_attach_first_extract_clears_content() {
        let mut chapter = Slide::chapter("c", "C").with_content("hello");
        chapter.attach_extract(None, Slide::extract("e", "E"));
        assert_eq!(chapter.content, "");
        assert_eq!(chapter.extracts().len(), 1);
    }
}
