//! Search-result overlay
//!
//! Highlights are display-only [`ElementKind::Highlight`] elements. They wrap
//! the text of one match, split across as many text nodes as the match spans,
//! and serialize to nothing.

use crate::matcher::LiteralMatcher;
use crate::tree::{ElementKind, StyledDocument, StyledNode};
use std::ops::Range;

/// Wrap the `occurrence`-th match of `query` in the document's plain text.
///
/// Returns an unchanged copy when the query is empty or has fewer matches.
pub fn highlight_occurrence(doc: &StyledDocument, query: &str, occurrence: usize) -> StyledDocument {
    let Some(matcher) = LiteralMatcher::new(query) else {
        return doc.clone();
    };
    let Some(range) = matcher.find_all(&doc.plain_text()).into_iter().nth(occurrence) else {
        return doc.clone();
    };

    let mut offset = 0;
    StyledDocument::new(highlight_nodes(&doc.nodes, &range, &mut offset))
}

/// Remove every highlight element, keeping its children in place
pub fn strip_highlights(doc: &StyledDocument) -> StyledDocument {
    StyledDocument::new(strip_nodes(&doc.nodes))
}

fn highlight_nodes(nodes: &[StyledNode], range: &Range<usize>, offset: &mut usize) -> Vec<StyledNode> {
    let mut out = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            StyledNode::Text { content } => {
                let start = *offset;
                let end = start + content.len();
                *offset = end;

                if end <= range.start || start >= range.end {
                    out.push(node.clone());
                    continue;
                }

                let from = range.start.saturating_sub(start);
                let to = range.end.min(end) - start;
                if from > 0 {
                    out.push(StyledNode::text(&content[..from]));
                }
                out.push(StyledNode::element(
                    ElementKind::Highlight,
                    vec![StyledNode::text(&content[from..to])],
                ));
                if to < content.len() {
                    out.push(StyledNode::text(&content[to..]));
                }
            }
            StyledNode::Element { kind, children } => {
                let children = highlight_nodes(children, range, offset);
                out.push(StyledNode::element(kind.clone(), children));
            }
        }
    }

    out
}

fn strip_nodes(nodes: &[StyledNode]) -> Vec<StyledNode> {
    let mut out: Vec<StyledNode> = Vec::with_capacity(nodes.len());

    for node in nodes {
        match node {
            StyledNode::Element {
                kind: ElementKind::Highlight,
                children,
            } => {
                for child in strip_nodes(children) {
                    push_merged(&mut out, child);
                }
            }
            StyledNode::Element { kind, children } => {
                out.push(StyledNode::element(kind.clone(), strip_nodes(children)));
            }
            StyledNode::Text { .. } => push_merged(&mut out, node.clone()),
        }
    }

    out
}

fn push_merged(out: &mut Vec<StyledNode>, node: StyledNode) {
    if let (Some(StyledNode::Text { content: last }), StyledNode::Text { content }) = (out.last_mut(), &node) {
        last.push_str(content);
        return;
    }
    out.push(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, serialize};

    fn highlighted_text(nodes: &[StyledNode], out: &mut String) {
        for node in nodes {
            match node {
                StyledNode::Element {
                    kind: ElementKind::Highlight,
                    children,
                } => {
                    for child in children {
                        out.push_str(&child.plain_text());
                    }
                }
                StyledNode::Element { children, .. } => highlighted_text(children, out),
                StyledNode::Text { .. } => {}
            }
        }
    }

    #[test]
    fn test_highlight_inside_single_text_node() {
        let doc = parse("the theme");
        let lit = highlight_occurrence(&doc, "THE", 1);
        assert_eq!(
            lit.nodes,
            vec![
                StyledNode::text("the "),
                StyledNode::element(ElementKind::Highlight, vec![StyledNode::text("the")]),
                StyledNode::text("me"),
            ]
        );
    }

    #[test]
    fn test_highlight_across_elements() {
        let doc = parse("a[b]bc[/b]d");
        let lit = highlight_occurrence(&doc, "cd", 0);

        let mut text = String::new();
        highlighted_text(&lit.nodes, &mut text);
        assert_eq!(text, "cd");
        assert_eq!(serialize(&lit), "a[b]bc[/b]d");
        assert_eq!(lit.plain_text(), "abcd");
    }

    #[test]
    fn test_missing_occurrence_is_unchanged() {
        let doc = parse("only once");
        assert_eq!(highlight_occurrence(&doc, "once", 3), doc);
        assert_eq!(highlight_occurrence(&doc, "", 0), doc);
    }

    #[test]
    fn test_strip_restores_original_tree() {
        let doc = parse("[i]moonlight[/i] over the moon");
        for occurrence in 0..2 {
            let lit = highlight_occurrence(&doc, "moon", occurrence);
            assert_ne!(lit, doc);
            assert_eq!(strip_highlights(&lit), doc);
        }
    }
}
