//! Styled span tree
//!
//! The in-memory form of rich text. A display surface renders these nodes and
//! hands edited trees back; [`crate::serialize`] turns them into DFN markup.

use serde::{Deserialize, Serialize};

/// A parsed piece of rich text (ordered sequence of root nodes)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledDocument {
    pub nodes: Vec<StyledNode>,
}

impl StyledDocument {
    pub fn new(nodes: Vec<StyledNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Text as it would appear on screen, with every tag removed
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            node.write_plain_text(&mut out);
        }
        out
    }
}

/// Styled tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StyledNode {
    /// Literal text run
    Text { content: String },

    /// Element wrapping other nodes
    Element {
        kind: ElementKind,
        children: Vec<StyledNode>,
    },
}

impl StyledNode {
    pub fn text(content: impl Into<String>) -> Self {
        StyledNode::Text {
            content: content.into(),
        }
    }

    pub fn element(kind: ElementKind, children: Vec<StyledNode>) -> Self {
        StyledNode::Element { kind, children }
    }

    pub fn bold(children: Vec<StyledNode>) -> Self {
        Self::element(ElementKind::Bold, children)
    }

    pub fn italic(children: Vec<StyledNode>) -> Self {
        Self::element(ElementKind::Italic, children)
    }

    pub fn span(style: SpanStyle, children: Vec<StyledNode>) -> Self {
        Self::element(ElementKind::Span(style), children)
    }

    pub fn children(&self) -> Option<&[StyledNode]> {
        match self {
            StyledNode::Element { children, .. } => Some(children),
            StyledNode::Text { .. } => None,
        }
    }

    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self {
            StyledNode::Text { content } => out.push_str(content),
            StyledNode::Element { children, .. } => {
                for child in children {
                    child.write_plain_text(out);
                }
            }
        }
    }
}

/// What an element means when rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum ElementKind {
    Bold,
    Italic,
    Underline,
    Strike,
    Subscript,
    Superscript,

    /// Generic inline container carrying style attributes
    Span(SpanStyle),

    /// Legacy font element produced by some rich-text surfaces
    Font {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        face: Option<String>,
    },

    /// Paragraph/line container. DFN has no block tags, so only children survive.
    Block,

    /// Transient search-result marker, never persisted
    Highlight,
}

/// Inline style attributes of a [`ElementKind::Span`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,

    /// Pixel size without unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
}

impl SpanStyle {
    pub fn with_font_family(mut self, value: impl Into<String>) -> Self {
        self.font_family = Some(value.into());
        self
    }

    pub fn with_color(mut self, value: impl Into<String>) -> Self {
        self.color = Some(value.into());
        self
    }

    pub fn with_background(mut self, value: impl Into<String>) -> Self {
        self.background = Some(value.into());
        self
    }

    pub fn with_font_size(mut self, value: impl Into<String>) -> Self {
        self.font_size = Some(value.into());
        self
    }

    pub fn with_font_weight(mut self, value: impl Into<String>) -> Self {
        self.font_weight = Some(value.into());
        self
    }

    pub fn with_font_style(mut self, value: impl Into<String>) -> Self {
        self.font_style = Some(value.into());
        self
    }

    pub fn with_text_decoration(mut self, value: impl Into<String>) -> Self {
        self.text_decoration = Some(value.into());
        self
    }

    /// `bold` or a numeric weight of at least 700
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref().map(str::trim) {
            Some("bold") | Some("bolder") => true,
            Some(weight) => weight.parse::<u32>().map(|w| w >= 700).unwrap_or(false),
            None => false,
        }
    }

    pub fn is_italic(&self) -> bool {
        self.font_style.as_deref().map(str::trim) == Some("italic")
    }

    pub fn is_underline(&self) -> bool {
        self.text_decoration.as_deref().map(str::trim) == Some("underline")
    }

    pub fn is_line_through(&self) -> bool {
        self.text_decoration.as_deref().map(str::trim) == Some("line-through")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_flattens_elements() {
        let doc = StyledDocument::new(vec![
            StyledNode::text("a"),
            StyledNode::bold(vec![StyledNode::text("bc")]),
            StyledNode::text("d"),
        ]);
        assert_eq!(doc.plain_text(), "abcd");
    }

    #[test]
    fn test_numeric_weight_counts_as_bold() {
        assert!(SpanStyle::default().with_font_weight("700").is_bold());
        assert!(SpanStyle::default().with_font_weight("900").is_bold());
        assert!(!SpanStyle::default().with_font_weight("400").is_bold());
        assert!(SpanStyle::default().with_font_weight("bold").is_bold());
        assert!(!SpanStyle::default().is_bold());
    }

    #[test]
    fn test_tree_json_shape() {
        let node = StyledNode::span(
            SpanStyle::default().with_color("red"),
            vec![StyledNode::text("hi")],
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "Element");
        assert_eq!(json["kind"]["tag"], "span");
        assert_eq!(json["kind"]["color"], "red");
        assert!(json["kind"].get("fontFamily").is_none());

        let back: StyledNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }
}
