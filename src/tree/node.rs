//! Comment tree nodes
//!
//! A node is either a real comment from the fetched page or a placeholder
//! for an ancestor that the page referenced by path but did not include.
//! Links are ids into the owning [`CommentForest`](super::CommentForest),
//! never references.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::comment::{CommentId, ThreadedComment};

/// Ancestor known only by id and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MissingComment {
    /// Id taken from a descendant's path.
    pub id: CommentId,
    /// Path prefix of the descendant, ending in `id`.
    pub path: String,
}

/// What a node stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind<C> {
    /// Comment present in the input list.
    Present(C),
    /// Synthesized ancestor.
    Placeholder(MissingComment),
}

/// Node of a comment forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentNode<C> {
    kind: NodeKind<C>,
    depth: i32,
    children: Vec<CommentId>,
    parent: Option<CommentId>,
}

impl<C> CommentNode<C> {
    pub(crate) fn present(comment: C, depth: i32) -> Self {
        Self::with_kind(NodeKind::Present(comment), depth)
    }

    pub(crate) fn placeholder(missing: MissingComment, depth: i32) -> Self {
        Self::with_kind(NodeKind::Placeholder(missing), depth)
    }

    fn with_kind(kind: NodeKind<C>, depth: i32) -> Self {
        Self {
            kind,
            depth,
            children: Vec::new(),
            parent: None,
        }
    }

    /// Display depth after sub-thread offset correction.
    ///
    /// May be negative for comments shallower than the sub-thread anchor.
    #[inline]
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Child ids in arrival order.
    #[inline]
    pub fn children(&self) -> &[CommentId] {
        &self.children
    }

    /// Parent id, `None` for forest roots and flattened nodes.
    #[inline]
    pub fn parent(&self) -> Option<CommentId> {
        self.parent
    }

    /// Node payload.
    pub fn kind(&self) -> &NodeKind<C> {
        &self.kind
    }

    /// Wrapped comment, if this node is not a placeholder.
    pub fn comment(&self) -> Option<&C> {
        match &self.kind {
            NodeKind::Present(comment) => Some(comment),
            NodeKind::Placeholder(_) => None,
        }
    }

    /// True for synthesized ancestors.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, NodeKind::Placeholder(_))
    }

    pub(crate) fn push_child(&mut self, child: CommentId) {
        self.children.push(child);
    }

    pub(crate) fn set_parent(&mut self, parent: CommentId) {
        self.parent = Some(parent);
    }

    pub(crate) fn replace_comment(&mut self, comment: C) -> Option<C> {
        match &mut self.kind {
            NodeKind::Present(current) => Some(std::mem::replace(current, comment)),
            NodeKind::Placeholder(_) => None,
        }
    }
}

impl<C: ThreadedComment> CommentNode<C> {
    /// Comment id (placeholder id for missing ancestors).
    pub fn id(&self) -> CommentId {
        match &self.kind {
            NodeKind::Present(comment) => comment.id(),
            NodeKind::Placeholder(missing) => missing.id,
        }
    }

    /// Materialized path of the node.
    pub fn path(&self) -> &str {
        match &self.kind {
            NodeKind::Present(comment) => comment.path(),
            NodeKind::Placeholder(missing) => &missing.path,
        }
    }
}

impl<C: ThreadedComment> fmt::Display for CommentNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_placeholder() {
            write!(f, "[missing #{}]", self.id())
        } else {
            write!(f, "#{}", self.id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentRecord;

    #[test]
    fn test_present_node_accessors() {
        let node = CommentNode::present(CommentRecord::new(9, "0.1.4.9"), 2);

        assert_eq!(node.id(), 9);
        assert_eq!(node.path(), "0.1.4.9");
        assert_eq!(node.depth(), 2);
        assert!(!node.is_placeholder());
        assert!(node.children().is_empty());
        assert_eq!(node.parent(), None);
        assert_eq!(node.to_string(), "#9");
    }

    #[test]
    fn test_placeholder_node_accessors() {
        let node: CommentNode<CommentRecord> = CommentNode::placeholder(
            MissingComment {
                id: 4,
                path: "0.1.4".to_string(),
            },
            1,
        );

        assert_eq!(node.id(), 4);
        assert_eq!(node.path(), "0.1.4");
        assert!(node.is_placeholder());
        assert!(node.comment().is_none());
        assert_eq!(node.to_string(), "[missing #4]");
    }

    #[test]
    fn test_replace_comment_skips_placeholders() {
        let mut node: CommentNode<CommentRecord> = CommentNode::placeholder(
            MissingComment {
                id: 4,
                path: "0.4".to_string(),
            },
            0,
        );

        assert!(node.replace_comment(CommentRecord::new(4, "0.4")).is_none());
        assert!(node.is_placeholder());
    }

    #[test]
    fn test_placeholder_serializes_with_kind_tag() {
        let node: CommentNode<CommentRecord> = CommentNode::placeholder(
            MissingComment {
                id: 3,
                path: "0.3".to_string(),
            },
            0,
        );

        let value = serde_json::to_value(&node).expect("node serializes");
        assert_eq!(value["kind"]["placeholder"]["id"], 3);
        assert_eq!(value["depth"], 0);
        assert_eq!(value["parent"], serde_json::Value::Null);
    }
}
