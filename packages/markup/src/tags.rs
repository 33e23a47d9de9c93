//! DFN tag vocabulary
//!
//! Two families: simple pairs (`[b]…[/b]`) and valued pairs
//! (`[color=red]…[/color]`).

use crate::tree::{ElementKind, SpanStyle};

/// Paired tag without a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleTag {
    Bold,
    Italic,
    Underline,
    Strike,
    Subscript,
    Superscript,
}

impl SimpleTag {
    pub const ALL: [SimpleTag; 6] = [
        SimpleTag::Bold,
        SimpleTag::Italic,
        SimpleTag::Underline,
        SimpleTag::Strike,
        SimpleTag::Subscript,
        SimpleTag::Superscript,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SimpleTag::Bold => "b",
            SimpleTag::Italic => "i",
            SimpleTag::Underline => "u",
            SimpleTag::Strike => "s",
            SimpleTag::Subscript => "sub",
            SimpleTag::Superscript => "sup",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    pub fn element_kind(self) -> ElementKind {
        match self {
            SimpleTag::Bold => ElementKind::Bold,
            SimpleTag::Italic => ElementKind::Italic,
            SimpleTag::Underline => ElementKind::Underline,
            SimpleTag::Strike => ElementKind::Strike,
            SimpleTag::Subscript => ElementKind::Subscript,
            SimpleTag::Superscript => ElementKind::Superscript,
        }
    }

    /// Inverse of [`SimpleTag::element_kind`]
    pub fn for_kind(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Bold => Some(SimpleTag::Bold),
            ElementKind::Italic => Some(SimpleTag::Italic),
            ElementKind::Underline => Some(SimpleTag::Underline),
            ElementKind::Strike => Some(SimpleTag::Strike),
            ElementKind::Subscript => Some(SimpleTag::Subscript),
            ElementKind::Superscript => Some(SimpleTag::Superscript),
            _ => None,
        }
    }

    pub fn wrap(self, inner: &str) -> String {
        format!("[{name}]{inner}[/{name}]", name = self.name())
    }
}

/// Paired tag carrying a `=value`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuedTag {
    Font,
    Color,
    Background,
    Size,
}

impl ValuedTag {
    pub const ALL: [ValuedTag; 4] = [
        ValuedTag::Font,
        ValuedTag::Color,
        ValuedTag::Background,
        ValuedTag::Size,
    ];

    /// Nesting order used when a span carries several attributes, innermost first
    pub const SERIALIZE_ORDER: [ValuedTag; 4] = [
        ValuedTag::Size,
        ValuedTag::Background,
        ValuedTag::Color,
        ValuedTag::Font,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ValuedTag::Font => "font",
            ValuedTag::Color => "color",
            ValuedTag::Background => "bg",
            ValuedTag::Size => "size",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Span style carrying only this attribute
    pub fn style(self, value: &str) -> SpanStyle {
        let style = SpanStyle::default();
        match self {
            ValuedTag::Font => style.with_font_family(value),
            ValuedTag::Color => style.with_color(value),
            ValuedTag::Background => style.with_background(value),
            ValuedTag::Size => style.with_font_size(value),
        }
    }

    /// Tag value carried by `style`; sizes are written without a `px` unit
    pub fn value_in(self, style: &SpanStyle) -> Option<&str> {
        match self {
            ValuedTag::Font => style.font_family.as_deref(),
            ValuedTag::Color => style.color.as_deref(),
            ValuedTag::Background => style.background.as_deref(),
            ValuedTag::Size => style
                .font_size
                .as_deref()
                .map(|size| size.strip_suffix("px").unwrap_or(size)),
        }
        .filter(|value| !value.is_empty())
    }

    pub fn wrap(self, value: &str, inner: &str) -> String {
        format!("[{name}={value}]{inner}[/{name}]", name = self.name())
    }
}
