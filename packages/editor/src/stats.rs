use crate::model::{Novel, Slide};
use serde::Serialize;

/// Words read per minute when estimating reading time
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideStats {
    /// Whitespace-separated words of the visible text
    pub words: usize,
    /// Characters of the raw markup
    pub characters: usize,
    pub reading_minutes: usize,
}

impl SlideStats {
    pub fn of(slide: &Slide) -> Self {
        let words = word_count(&slide.content);
        Self {
            words,
            characters: slide.content.chars().count(),
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NovelStats {
    pub chapters: usize,
    pub extracts: usize,
    pub words: usize,
}

impl NovelStats {
    pub fn of(novel: &Novel) -> Self {
        Self {
            chapters: novel.slides.len(),
            extracts: novel.slides.iter().map(|c| c.extracts().len()).sum(),
            words: novel.iter_slides().map(|slide| word_count(&slide.content)).sum(),
        }
    }
}

/// Words in DFN markup, tags excluded
pub fn word_count(markup: &str) -> usize {
    dfn_markup::plain_text(markup).split_whitespace().count()
}
