//! Bounded rendering of open-ended backend metadata.
//!
//! Backend analysis results carry nested values with no fixed schema (codec
//! metadata, detection findings, extracted-string lists, whatever a future
//! analyzer adds). This module walks any `serde_json::Value` into a display
//! tree with hard depth and width bounds, so hostile or merely enormous
//! structures truncate instead of hanging the client.

use serde_json::Value as JsonValue;

use crate::defaults::{RENDER_MAX_DEPTH, RENDER_MAX_ENTRIES};

/// One node of the display tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayNode {
    /// Humanized key or index label; None at the root.
    pub label: Option<String>,
    pub kind: NodeKind,
}

/// What a display node shows.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Explicit null, distinct from an absent or empty value.
    Null,
    /// Scalar rendered via its string form.
    Leaf(String),
    /// Composite with rendered children.
    Branch(Vec<DisplayNode>),
    /// Subtree cut off because it exceeded the depth bound.
    Truncated,
    /// Summary for entries beyond the width bound ("and N more").
    Elided(usize),
}

impl DisplayNode {
    fn new(label: Option<String>, kind: NodeKind) -> Self {
        Self { label, kind }
    }

    /// Total node count of this subtree, itself included. Bounded by
    /// construction, handy for tests and cost accounting.
    pub fn node_count(&self) -> usize {
        match &self.kind {
            NodeKind::Branch(children) => 1 + children.iter().map(Self::node_count).sum::<usize>(),
            _ => 1,
        }
    }
}

/// Render an arbitrary JSON-like value into a bounded display tree.
///
/// Works for any shape: video/audio stream metadata, detection findings, or
/// fields the backend grows later.
pub fn render(value: &JsonValue) -> DisplayNode {
    render_at(None, value, 0)
}

fn render_at(label: Option<String>, value: &JsonValue, depth: usize) -> DisplayNode {
    if depth > RENDER_MAX_DEPTH {
        return DisplayNode::new(label, NodeKind::Truncated);
    }

    match value {
        JsonValue::Null => DisplayNode::new(label, NodeKind::Null),
        JsonValue::Bool(b) => DisplayNode::new(label, NodeKind::Leaf(b.to_string())),
        JsonValue::Number(n) => DisplayNode::new(label, NodeKind::Leaf(n.to_string())),
        JsonValue::String(s) => DisplayNode::new(label, NodeKind::Leaf(s.clone())),
        JsonValue::Array(items) => {
            let mut children: Vec<DisplayNode> = items
                .iter()
                .take(RENDER_MAX_ENTRIES)
                .enumerate()
                .map(|(i, item)| render_at(Some(i.to_string()), item, depth + 1))
                .collect();
            if items.len() > RENDER_MAX_ENTRIES {
                children.push(DisplayNode::new(
                    None,
                    NodeKind::Elided(items.len() - RENDER_MAX_ENTRIES),
                ));
            }
            DisplayNode::new(label, NodeKind::Branch(children))
        }
        JsonValue::Object(map) => {
            let mut children: Vec<DisplayNode> = map
                .iter()
                .take(RENDER_MAX_ENTRIES)
                .map(|(key, item)| render_at(Some(humanize_key(key)), item, depth + 1))
                .collect();
            if map.len() > RENDER_MAX_ENTRIES {
                children.push(DisplayNode::new(
                    None,
                    NodeKind::Elided(map.len() - RENDER_MAX_ENTRIES),
                ));
            }
            DisplayNode::new(label, NodeKind::Branch(children))
        }
    }
}

/// Cosmetic key normalization: separators become spaces. The underlying key
/// is never altered for any other purpose.
fn humanize_key(key: &str) -> String {
    key.replace(['_', '-'], " ")
}
