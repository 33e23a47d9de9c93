//! DFN markup → styled tree
//!
//! A single regex alternation finds the leftmost tag pair (simple or valued,
//! non-greedy, `.` matching newlines). The text before it is kept verbatim,
//! the pair's inner text is parsed recursively, and scanning resumes after the
//! closing tag. Anything the pattern cannot match (unclosed or mismatched
//! tags) stays literal text, so parsing never fails.

use crate::tags::{SimpleTag, ValuedTag};
use crate::tree::{ElementKind, StyledDocument, StyledNode};
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Parse DFN markup into a styled tree
pub fn parse(markup: &str) -> StyledDocument {
    StyledDocument::new(parse_nodes(markup))
}

/// Parse DFN markup into a node list
pub fn parse_nodes(markup: &str) -> Vec<StyledNode> {
    let scanner = TagScanner::shared();
    let mut nodes = Vec::new();
    let mut rest = markup;

    while let Some(caps) = scanner.regex.captures(rest) {
        let Some(whole) = caps.get(0) else { break };
        push_node(&mut nodes, StyledNode::text(&rest[..whole.start()]));
        scanner.emit(&caps, &mut nodes);
        rest = &rest[whole.end()..];
    }
    push_node(&mut nodes, StyledNode::text(rest));

    nodes
}

/// Capture group layout of one alternative in the scanner regex
#[derive(Debug, Clone, Copy)]
enum TagGroups {
    Simple { name: usize, content: usize },
    Valued { name: usize, value: usize, content: usize },
}

struct TagScanner {
    regex: Regex,
    groups: Vec<TagGroups>,
}

impl TagScanner {
    fn shared() -> &'static TagScanner {
        static SCANNER: OnceLock<TagScanner> = OnceLock::new();
        SCANNER.get_or_init(TagScanner::build)
    }

    fn build() -> Self {
        let mut alternatives = Vec::new();
        let mut groups = Vec::new();
        let mut next_group = 1;

        for tag in SimpleTag::ALL {
            let name = regex::escape(tag.name());
            alternatives.push(format!(r"\[({name})\](.*?)\[/{name}\]"));
            groups.push(TagGroups::Simple {
                name: next_group,
                content: next_group + 1,
            });
            next_group += 2;
        }

        for tag in ValuedTag::ALL {
            let name = regex::escape(tag.name());
            alternatives.push(format!(r"\[({name})=([^\]]+?)\](.*?)\[/{name}\]"));
            groups.push(TagGroups::Valued {
                name: next_group,
                value: next_group + 1,
                content: next_group + 2,
            });
            next_group += 3;
        }

        let pattern = format!("(?s){}", alternatives.join("|"));
        let regex = Regex::new(&pattern).expect("DFN tag pattern is a valid regex");

        Self { regex, groups }
    }

    /// Append the node(s) for one matched tag pair
    fn emit(&self, caps: &Captures<'_>, nodes: &mut Vec<StyledNode>) {
        for groups in &self.groups {
            match *groups {
                TagGroups::Simple { name, content } => {
                    let Some(name) = caps.get(name) else { continue };
                    let inner = parse_nodes(caps.get(content).map_or("", |m| m.as_str()));
                    match SimpleTag::from_name(name.as_str()) {
                        Some(tag) => push_node(nodes, StyledNode::element(tag.element_kind(), inner)),
                        None => extend_nodes(nodes, inner),
                    }
                    return;
                }
                TagGroups::Valued {
                    name,
                    value,
                    content,
                } => {
                    let Some(name) = caps.get(name) else { continue };
                    let value = caps.get(value).map_or("", |m| m.as_str());
                    let inner = parse_nodes(caps.get(content).map_or("", |m| m.as_str()));
                    match ValuedTag::from_name(name.as_str()) {
                        Some(tag) => push_node(
                            nodes,
                            StyledNode::element(ElementKind::Span(tag.style(value)), inner),
                        ),
                        None => extend_nodes(nodes, inner),
                    }
                    return;
                }
            }
        }
    }
}

fn extend_nodes(nodes: &mut Vec<StyledNode>, inner: Vec<StyledNode>) {
    for node in inner {
        push_node(nodes, node);
    }
}

/// Push a node, dropping empty text and merging adjacent text runs
fn push_node(nodes: &mut Vec<StyledNode>, node: StyledNode) {
    if let StyledNode::Text { content } = &node {
        if content.is_empty() {
            return;
        }
        if let Some(StyledNode::Text { content: last }) = nodes.last_mut() {
            last.push_str(content);
            return;
        }
    }
    nodes.push(node);
}
