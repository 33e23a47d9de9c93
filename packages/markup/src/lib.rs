//! # DFN Markup
//!
//! Codec between DFN bracket-tag markup and a typed styled-span tree.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ "a[b]bc[/b]d"            (durable text)     │
//! └─────────────────────────────────────────────┘
//!              parse ↓        ↑ serialize
//! ┌─────────────────────────────────────────────┐
//! │ StyledDocument           (display tree)     │
//! │  - Text / Element { kind, children }        │
//! │  - Highlight overlay for search results     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Parsing never fails: text the scanner cannot match is kept verbatim, so
//! `serialize(&parse(s)) == s` holds for every input.
//!
//! ## Tags
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `[b]` `[i]` `[u]` `[s]` | bold, italic, underline, strike |
//! | `[sub]` `[sup]` | subscript, superscript |
//! | `[font=NAME]` | font family |
//! | `[color=VALUE]` `[bg=VALUE]` | foreground, background colour |
//! | `[size=N]` | font size in pixels |
//!
//! ## Usage
//!
//! ```rust
//! use dfn_markup::{parse, serialize};
//!
//! let doc = parse("a[b]bc[/b]d");
//! assert_eq!(doc.plain_text(), "abcd");
//! assert_eq!(serialize(&doc), "a[b]bc[/b]d");
//! ```

mod format;
mod highlight;
mod matcher;
mod parser;
mod serializer;
mod tags;
mod tree;

pub use format::{apply_format, FormatCommand, FormatEdit};
pub use highlight::{highlight_occurrence, strip_highlights};
pub use matcher::LiteralMatcher;
pub use parser::{parse, parse_nodes};
pub use serializer::{serialize, serialize_nodes};
pub use tags::{SimpleTag, ValuedTag};
pub use tree::{ElementKind, SpanStyle, StyledDocument, StyledNode};

/// Strip every tag, leaving the text a reader would see
pub fn plain_text(markup: &str) -> String {
    parse(markup).plain_text()
}
