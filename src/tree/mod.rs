//! Comment forest reconstruction
//!
//! The API returns a thread as a flat page of comments, each tagged with its
//! materialized path. This module turns that page back into a forest:
//!
//! ```text
//! 0.1      ->  #1
//! 0.1.2    ->  └─ #2
//! 0.3.7    ->  [missing #3]
//!              └─ #7
//! ```
//!
//! The forest is an arena: nodes keyed by id, each holding child ids and an
//! optional parent id. It is rebuilt from scratch on every data change.

mod builder;
mod node;
mod traversal;

pub use builder::{build_tree, flatten};
pub use node::{CommentNode, MissingComment, NodeKind};
pub use traversal::{Ancestors, DepthFirst};

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::comment::{CommentId, ThreadedComment};
use crate::path::PathError;

/// Errors raised while building a forest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A comment path is malformed.
    #[error(transparent)]
    Path(#[from] PathError),

    /// A comment's id differs from the last segment of its path.
    #[error("comment {id} has path '{path}' which ends in a different id")]
    IdMismatch {
        /// Comment id
        id: CommentId,
        /// Comment path
        path: String,
    },

    /// Linking a node would make it its own ancestor.
    #[error("cyclic comment paths detected at comment {id}")]
    CycleDetected {
        /// Node that would have become its own ancestor
        id: CommentId,
    },
}

/// Forest of comment nodes built from one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentForest<C> {
    nodes: HashMap<CommentId, CommentNode<C>>,
    roots: Vec<CommentId>,
}

impl<C> CommentForest<C> {
    /// Ids of the top-level nodes, in input order.
    pub fn root_ids(&self) -> &[CommentId] {
        &self.roots
    }

    /// Top-level nodes, in input order.
    pub fn roots(&self) -> impl Iterator<Item = &CommentNode<C>> + '_ {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Look up a node by id.
    pub fn get(&self, id: CommentId) -> Option<&CommentNode<C>> {
        self.nodes.get(&id)
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: CommentId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Children of `id` in arrival order (empty for unknown ids).
    pub fn children(&self, id: CommentId) -> impl Iterator<Item = &CommentNode<C>> + '_ {
        self.nodes
            .get(&id)
            .map(CommentNode::children)
            .unwrap_or_default()
            .iter()
            .filter_map(|child| self.nodes.get(child))
    }

    /// Parent node of `id`.
    pub fn parent(&self, id: CommentId) -> Option<&CommentNode<C>> {
        let parent = self.nodes.get(&id)?.parent()?;
        self.nodes.get(&parent)
    }

    /// Parent chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: CommentId) -> Ancestors<'_, C> {
        Ancestors::new(self, id)
    }

    /// Pre-order walk: each root followed by its subtree, siblings in
    /// arrival order. This is the order rows are displayed in.
    pub fn iter_depth_first(&self) -> DepthFirst<'_, C> {
        DepthFirst::new(self)
    }

    /// Total number of nodes, placeholders included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the page was empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of synthesized ancestors.
    pub fn placeholder_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_placeholder()).count()
    }
}

impl<C: ThreadedComment> CommentForest<C> {
    /// Swap in a newer copy of a comment (e.g. after a vote or edit).
    ///
    /// Returns `false` without changing anything if no present node has this
    /// id or the path differs; a moved comment needs a rebuild.
    pub fn replace_record(&mut self, comment: C) -> bool {
        match self.nodes.get_mut(&comment.id()) {
            Some(node) if !node.is_placeholder() && node.path() == comment.path() => {
                node.replace_comment(comment);
                true
            }
            _ => false,
        }
    }
}
