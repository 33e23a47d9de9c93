//! # Find and Replace
//!
//! Case-insensitive literal search over every slide that holds content.
//! Container chapters are skipped since their content is always empty.
//!
//! Matches may overlap: after a hit at `start`, scanning resumes one
//! character later, so `"aa"` in `"aaaa"` hits at 0, 1 and 2.
//!
//! Offsets are UTF-8 byte offsets into the slide's raw markup.

use crate::model::{Novel, SlideId};
use crate::operations::{slide_at_mut, slide_path};
use dfn_markup::LiteralMatcher;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One occurrence of the query in a slide's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub slide_id: SlideId,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Every match in display order
pub fn search(novel: &Novel, query: &str) -> Vec<SearchMatch> {
    let Some(matcher) = LiteralMatcher::new(query) else {
        return Vec::new();
    };

    novel
        .iter_slides()
        .filter(|slide| !slide.is_container())
        .flat_map(|slide| {
            matcher
                .find_all(&slide.content)
                .into_iter()
                .map(move |range| SearchMatch {
                    slide_id: slide.id.clone(),
                    start: range.start,
                    end: range.end,
                })
        })
        .collect()
}

/// Replace the text of `matches[index]` in its slide.
///
/// A stale match (unknown slide, span outside the content) leaves the novel
/// unchanged.
pub fn replace_one(novel: &Novel, matches: &[SearchMatch], index: usize, replacement: &str) -> Novel {
    let mut next = novel.clone();
    let Some(found) = matches.get(index) else {
        debug!(index, "replace_one: no such match");
        return next;
    };

    let slide = slide_path(novel, &found.slide_id).and_then(|path| slide_at_mut(&mut next, path));
    match slide {
        Some(slide)
            if found.start <= found.end
                && found.end <= slide.content.len()
                && slide.content.is_char_boundary(found.start)
                && slide.content.is_char_boundary(found.end) =>
        {
            slide.content.replace_range(found.start..found.end, replacement);
        }
        _ => debug!(slide_id = %found.slide_id, "replace_one: stale match"),
    }

    next
}

/// Replace every occurrence of `query`, treated as literal text
pub fn replace_all(novel: &Novel, query: &str, replacement: &str) -> Novel {
    let mut next = novel.clone();
    let Some(matcher) = LiteralMatcher::new(query) else {
        return next;
    };

    for chapter in &mut next.slides {
        chapter.content = matcher.replace_all(&chapter.content, replacement);
        for extract in chapter.children.iter_mut().flatten() {
            extract.content = matcher.replace_all(&extract.content, replacement);
        }
    }

    next
}

/// Query, results and current-match cursor
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Index of the current match, `None` when there are no matches
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_match(&self) -> Option<&SearchMatch> {
        self.current.and_then(|index| self.matches.get(index))
    }

    /// Position of the current match among the matches in the same slide
    pub fn current_occurrence(&self) -> Option<(&str, usize)> {
        let index = self.current?;
        let current = self.matches.get(index)?;
        let occurrence = self.matches[..index]
            .iter()
            .filter(|m| m.slide_id == current.slide_id)
            .count();
        Some((current.slide_id.as_str(), occurrence))
    }

    /// Run a new search; the cursor starts at the first match
    pub fn set_query(&mut self, novel: &Novel, query: &str) {
        self.query = query.to_string();
        self.matches = search(novel, query);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// Re-run the current query, keeping the cursor where possible
    pub fn refresh(&mut self, novel: &Novel) {
        self.matches = search(novel, &self.query);
        self.current = match (self.current, self.matches.len()) {
            (_, 0) => None,
            (Some(index), len) if index < len => Some(index),
            _ => Some(0),
        };
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Move the cursor, wrapping at both ends
    pub fn navigate(&mut self, direction: Direction) -> Option<&SearchMatch> {
        let len = self.matches.len();
        if len == 0 {
            return None;
        }

        let index = self.current.unwrap_or(0);
        let index = match direction {
            Direction::Next => (index + 1) % len,
            Direction::Prev => (index + len - 1) % len,
        };
        self.current = Some(index);
        self.matches.get(index)
    }

    /// Replace the current match and search the new text again
    pub fn replace_current(&mut self, novel: &Novel, replacement: &str) -> Option<Novel> {
        let index = self.current?;
        let next = replace_one(novel, &self.matches, index, replacement);
        self.refresh(&next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Slide;

    fn single(content: &str) -> Novel {
        Novel::new("N").with_slides(vec![Slide::chapter("c", "C").with_content(content)])
    }

    fn spans(matches: &[SearchMatch]) -> Vec<(usize, usize)> {
        matches.iter().map(|m| (m.start, m.end)).collect()
    }

    #[test]
    fn test_search_the_theme() {
        let matches = search(&single("the theme"), "the");
        assert_eq!(spans(&matches), [(0, 3), (4, 7)]);
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(spans(&search(&single("aaaa"), "aa")), [(0, 2), (1, 3), (2, 4)]);
        assert_eq!(spans(&search(&single("aaa"), "aa")), [(0, 2), (1, 3)]);
    }

    #[test]
    fn test_case_insensitive_and_empty_query() {
        assert_eq!(search(&single("The THE the"), "tHe").len(), 3);
        assert!(search(&single("anything"), "").is_empty());
    }

    #[test]
    fn test_document_order_skips_containers() {
        let novel = Novel::sample();
        let matches = search(&novel, "the");
        let slides: Vec<&str> = matches.iter().map(|m| m.slide_id.as_str()).collect();

        assert!(!slides.contains(&"chapter-1"));
        let first_of = |id: &str| slides.iter().position(|s| *s == id).unwrap();
        assert!(first_of("extract-1-1") < first_of("extract-1-2"));
        assert!(first_of("extract-1-2") < first_of("chapter-2"));
        assert!(first_of("chapter-2") < first_of("chapter-3"));
    }

    #[test]
    fn test_navigate_wraps() {
        let novel = single("x x x");
        let mut state = SearchState::new();
        state.set_query(&novel, "x");
        assert_eq!(state.current_index(), Some(0));

        assert_eq!(state.navigate(Direction::Prev).map(|m| m.start), Some(4));
        assert_eq!(state.navigate(Direction::Next).map(|m| m.start), Some(0));
        assert_eq!(state.navigate(Direction::Next).map(|m| m.start), Some(2));
    }

    #[test]
    fn test_empty_results_have_no_cursor() {
        let mut state = SearchState::new();
        state.set_query(&single("abc"), "zzz");
        assert_eq!(state.current_index(), None);
        assert!(state.navigate(Direction::Next).is_none());
    }

    #[test]
    fn test_replace_one_then_research() {
        let novel = single("cat and cat");
        let mut state = SearchState::new();
        state.set_query(&novel, "cat");

        let next = state.replace_current(&novel, "dog").unwrap();
        assert_eq!(next.slides[0].content, "dog and cat");
        assert_eq!(spans(state.matches()), [(8, 11)]);
        assert_eq!(state.current_index(), Some(0));
    }

    #[test]
    fn test_stale_match_is_ignored() {
        let novel = single("short");
        let stale = [SearchMatch {
            slide_id: "c".into(),
            start: 10,
            end: 20,
        }];
        assert_eq!(replace_one(&novel, &stale, 0, "x"), novel);
        assert_eq!(replace_one(&novel, &stale, 5, "x"), novel);
    }

    #[test]
    fn test_replace_all_is_literal() {
        let novel = Novel::new("N").with_slides(vec![
            Slide::chapter("a", "A").with_content("a.b A.B axb"),
            Slide::chapter("b", "B").with_extracts(vec![Slide::extract("e", "E").with_content("A.b")]),
        ]);
        let next = replace_all(&novel, "a.b", "$0");

        assert_eq!(next.slides[0].content, "$0 $0 axb");
        assert_eq!(next.slides[1].extracts()[0].content, "$0");
    }

    #[test]
    fn test_current_occurrence_counts_within_slide() {
        let novel = Novel::new("N").with_slides(vec![
            Slide::chapter("a", "A").with_content("x"),
            Slide::chapter("b", "B").with_content("x x"),
        ]);
        let mut state = SearchState::new();
        state.set_query(&novel, "x");
        state.navigate(Direction::Next);
        state.navigate(Direction::Next);

        assert_eq!(state.current_occurrence(), Some(("b", 1)));
    }
}
