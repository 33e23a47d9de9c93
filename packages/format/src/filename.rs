use regex::Regex;
use std::sync::OnceLock;

pub const EXTENSION: &str = "dfn";

fn whitespace() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

/// File name for an exported novel, e.g. `The_Crimson_Chronicles.dfn`
pub fn export_filename(title: &str) -> String {
    let joined = whitespace().replace_all(title, "_");
    let stem: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        format!("novel.{EXTENSION}")
    } else {
        format!("{stem}.{EXTENSION}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_becomes_underscores() {
        assert_eq!(export_filename("The Crimson Chronicles"), "The_Crimson_Chronicles.dfn");
        assert_eq!(export_filename("Tabs\tand  spaces"), "Tabs_and_spaces.dfn");
    }

    #[test]
    fn test_unsafe_characters_removed() {
        assert_eq!(export_filename("../etc/passwd"), "etcpasswd.dfn");
        assert_eq!(export_filename("Draft: v2.1 (final)"), "Draft_v2.1_final.dfn");
        assert_eq!(export_filename("Café"), "Caf.dfn");
    }

    #[test]
    fn test_empty_title_falls_back() {
        assert_eq!(export_filename(""), "novel.dfn");
        assert_eq!(export_filename("???"), "novel.dfn");
        assert_eq!(export_filename(".."), "novel.dfn");
    }
}
