//! Forest traversal
//!
//! Both walks use an explicit stack, so thread depth never touches the call
//! stack of the renderer.

use super::{CommentForest, CommentNode};
use crate::comment::CommentId;

/// Pre-order iterator over a forest.
#[derive(Debug)]
pub struct DepthFirst<'a, C> {
    forest: &'a CommentForest<C>,
    stack: Vec<CommentId>,
}

impl<'a, C> DepthFirst<'a, C> {
    pub(super) fn new(forest: &'a CommentForest<C>) -> Self {
        Self {
            forest,
            stack: forest.root_ids().iter().rev().copied().collect(),
        }
    }
}

impl<'a, C> Iterator for DepthFirst<'a, C> {
    type Item = &'a CommentNode<C>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(node) = self.forest.get(id) {
                self.stack.extend(node.children().iter().rev().copied());
                return Some(node);
            }
        }
    }
}

/// Walk from a node's parent up to its forest root.
#[derive(Debug)]
pub struct Ancestors<'a, C> {
    forest: &'a CommentForest<C>,
    next: Option<CommentId>,
}

impl<'a, C> Ancestors<'a, C> {
    pub(super) fn new(forest: &'a CommentForest<C>, id: CommentId) -> Self {
        Self {
            forest,
            next: forest.get(id).and_then(CommentNode::parent),
        }
    }
}

impl<'a, C> Iterator for Ancestors<'a, C> {
    type Item = &'a CommentNode<C>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.forest.get(self.next?)?;
        self.next = node.parent();
        Some(node)
    }
}
