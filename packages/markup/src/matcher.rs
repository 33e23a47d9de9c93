//! Case-insensitive literal matching
//!
//! The query is escaped before compiling, so regex metacharacters in user
//! input are matched literally.

use regex::{NoExpand, Regex, RegexBuilder};
use std::ops::Range;

/// Compiled case-insensitive literal query
#[derive(Debug, Clone)]
pub struct LiteralMatcher {
    query: String,
    regex: Regex,
}

impl LiteralMatcher {
    /// Returns `None` for an empty query
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let regex = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok()?;
        Some(Self {
            query: query.to_string(),
            regex,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Byte ranges of every match, overlapping included.
    ///
    /// After a match at `start`, scanning resumes one character past `start`
    /// rather than at the end of the match.
    pub fn find_all(&self, text: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut from = 0;

        while from <= text.len() {
            let Some(found) = self.regex.find_at(text, from) else {
                break;
            };
            ranges.push(found.range());
            from = next_char_boundary(text, found.start());
        }

        ranges
    }

    pub fn count(&self, text: &str) -> usize {
        self.find_all(text).len()
    }

    /// Number of matches `replace_all` rewrites, i.e. without overlaps
    pub fn count_replaceable(&self, text: &str) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Replace every non-overlapping match. `replacement` is inserted as-is.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        self.regex.replace_all(text, NoExpand(replacement)).into_owned()
    }
}

fn next_char_boundary(text: &str, index: usize) -> usize {
    text[index..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| index + c.len_utf8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_matcher() {
        assert!(LiteralMatcher::new("").is_none());
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = LiteralMatcher::new("MOON").unwrap();
        assert_eq!(matcher.find_all("the moon, the Moon"), vec![4..8, 14..18]);
    }

    #[test]
    fn test_overlapping_matches() {
        let matcher = LiteralMatcher::new("aa").unwrap();
        assert_eq!(matcher.find_all("aaaa"), vec![0..2, 1..3, 2..4]);
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let matcher = LiteralMatcher::new("a.b").unwrap();
        assert_eq!(matcher.count("axb a.b"), 1);

        let matcher = LiteralMatcher::new("(x)").unwrap();
        assert_eq!(matcher.find_all("f(x) = (X)"), vec![1..4, 7..10]);
    }

    #[test]
    fn test_multibyte_text() {
        let matcher = LiteralMatcher::new("é").unwrap();
        assert_eq!(matcher.find_all("éÉé"), vec![0..2, 2..4, 4..6]);
    }

    #[test]
    fn test_replace_all_is_literal() {
        let matcher = LiteralMatcher::new("cat").unwrap();
        assert_eq!(matcher.replace_all("Cat cat CAT", "$1dog"), "$1dog $1dog $1dog");
    }

    #[test]
    fn test_replace_all_non_overlapping() {
        let matcher = LiteralMatcher::new("aa").unwrap();
        assert_eq!(matcher.replace_all("aaaa", "b"), "bb");
        assert_eq!(matcher.count("aaaa"), 3);
        assert_eq!(matcher.count_replaceable("aaaa"), 2);
    }
}
