//! Styled tree → DFN markup
//!
//! Depth-first walk. Semantic elements map 1:1 to simple tags. A span wraps
//! its content in one valued tag per present attribute, innermost first:
//! `size`, `bg`, `color`, `font`. Style attributes that also mean bold,
//! italic, underline or strike then add `b`, `i`, `u`, `s` in that order,
//! outermost last. Block and highlight elements emit only their children.

use crate::tags::{SimpleTag, ValuedTag};
use crate::tree::{ElementKind, SpanStyle, StyledDocument, StyledNode};

/// Serialize a styled tree back to DFN markup
pub fn serialize(doc: &StyledDocument) -> String {
    serialize_nodes(&doc.nodes)
}

/// Serialize a node list back to DFN markup
pub fn serialize_nodes(nodes: &[StyledNode]) -> String {
    let mut output = String::new();
    for node in nodes {
        serialize_node(node, &mut output);
    }
    output
}

fn serialize_node(node: &StyledNode, output: &mut String) {
    match node {
        StyledNode::Text { content } => output.push_str(content),
        StyledNode::Element { kind, children } => {
            let inner = serialize_nodes(children);
            output.push_str(&wrap_element(kind, inner));
        }
    }
}

fn wrap_element(kind: &ElementKind, inner: String) -> String {
    if let Some(tag) = SimpleTag::for_kind(kind) {
        return tag.wrap(&inner);
    }

    match kind {
        ElementKind::Span(style) => wrap_span(style, inner),
        ElementKind::Font { color, face } => {
            let mut wrapped = inner;
            if let Some(color) = color.as_deref().filter(|c| !c.is_empty()) {
                wrapped = ValuedTag::Color.wrap(color, &wrapped);
            }
            if let Some(face) = face.as_deref().filter(|f| !f.is_empty()) {
                wrapped = ValuedTag::Font.wrap(face, &wrapped);
            }
            wrapped
        }
        ElementKind::Block | ElementKind::Highlight => inner,
        _ => inner,
    }
}

fn wrap_span(style: &SpanStyle, inner: String) -> String {
    let mut wrapped = inner;

    for tag in ValuedTag::SERIALIZE_ORDER {
        if let Some(value) = tag.value_in(style) {
            wrapped = tag.wrap(value, &wrapped);
        }
    }

    if style.is_bold() {
        wrapped = SimpleTag::Bold.wrap(&wrapped);
    }
    if style.is_italic() {
        wrapped = SimpleTag::Italic.wrap(&wrapped);
    }
    if style.is_underline() {
        wrapped = SimpleTag::Underline.wrap(&wrapped);
    }
    if style.is_line_through() {
        wrapped = SimpleTag::Strike.wrap(&wrapped);
    }

    wrapped
}
