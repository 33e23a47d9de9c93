//! Title suggestion contract
//!
//! The suggestion service is an opaque text-to-text call. The editor bounds
//! its input, cleans its output and discards results that arrive after the
//! slide was deleted or the document moved on.

use crate::model::{Slide, SlideId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SuggestError {
    #[error("Title service unavailable: {0}")]
    Unavailable(String),

    #[error("Title service failed: {0}")]
    Failed(String),

    #[error("Slide has no text to suggest a title from")]
    EmptyInput,

    #[error("Suggested title was empty")]
    EmptySuggestion,
}

/// External title suggestion service
pub trait TitleSuggester {
    fn suggest_title(&self, input: &str) -> Result<String, SuggestError>;
}

/// An in-flight suggestion, tagged with the document revision it was made from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRequest {
    pub slide_id: SlideId,
    pub revision: u64,
    pub input: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Applied(String),
    /// Slide deleted or document edited since the request
    Stale,
    Failed(String),
}

/// Visible text of a slide; a container contributes its extracts' text
pub fn suggestion_input(slide: &Slide, limit: usize) -> String {
    let text = if slide.is_container() {
        slide
            .extracts()
            .iter()
            .map(|extract| dfn_markup::plain_text(&extract.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        dfn_markup::plain_text(&slide.content)
    };
    truncate_chars(text.trim(), limit).to_string()
}

/// First `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Trim whitespace and one pair of surrounding quotes
pub fn clean_suggestion(raw: &str) -> Option<String> {
    const QUOTES: [(char, char); 4] = [('"', '"'), ('\'', '\''), ('“', '”'), ('‘', '’')];

    let mut title = raw.trim();
    for (open, close) in QUOTES {
        if let Some(inner) = title.strip_prefix(open).and_then(|t| t.strip_suffix(close)) {
            title = inner.trim();
            break;
        }
    }

    (!title.is_empty()).then(|| title.to_string())
}
