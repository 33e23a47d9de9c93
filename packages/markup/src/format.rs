//! Formatting commands applied directly to DFN source text

use crate::tags::{SimpleTag, ValuedTag};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A toolbar formatting command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "camelCase")]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strike,
    ForeColor(String),
    FontSize(String),
}

impl FormatCommand {
    /// Whether the command may be applied at a bare cursor
    pub fn allows_empty_selection(&self) -> bool {
        matches!(self, FormatCommand::ForeColor(_) | FormatCommand::FontSize(_))
    }

    fn wrap(&self, selected: &str) -> Option<String> {
        let wrapped = match self {
            FormatCommand::Bold => SimpleTag::Bold.wrap(selected),
            FormatCommand::Italic => SimpleTag::Italic.wrap(selected),
            FormatCommand::Underline => SimpleTag::Underline.wrap(selected),
            FormatCommand::Strike => SimpleTag::Strike.wrap(selected),
            FormatCommand::ForeColor(value) if !value.is_empty() => ValuedTag::Color.wrap(value, selected),
            FormatCommand::FontSize(value) if !value.is_empty() => ValuedTag::Size.wrap(value, selected),
            _ => return None,
        };
        Some(wrapped)
    }
}

/// Result of [`apply_format`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatEdit {
    pub content: String,
    /// Byte offset where the cursor should land
    pub cursor: usize,
}

/// Wrap `selection` (byte range) of `content` in the command's tags.
///
/// Returns `None` when the command does not apply: an empty selection for a
/// simple tag, an empty value, or a range outside the content or off a char
/// boundary.
pub fn apply_format(content: &str, selection: Range<usize>, command: &FormatCommand) -> Option<FormatEdit> {
    let Range { start, end } = selection;
    if start > end || end > content.len() || !content.is_char_boundary(start) || !content.is_char_boundary(end) {
        return None;
    }
    if start == end && !command.allows_empty_selection() {
        return None;
    }

    let inserted = command.wrap(&content[start..end])?;
    let cursor = if start == end {
        // just past the opening tag
        start + inserted.find(']').map_or(0, |i| i + 1)
    } else {
        start + inserted.len()
    };

    let mut edited = String::with_capacity(content.len() + inserted.len());
    edited.push_str(&content[..start]);
    edited.push_str(&inserted);
    edited.push_str(&content[end..]);

    Some(FormatEdit {
        content: edited,
        cursor,
    })
}
