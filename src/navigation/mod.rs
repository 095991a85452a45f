//! Jumping between top-level comments in a displayed thread.
//!
//! Rows are numbered in display order (see
//! [`CommentForest::iter_depth_first`]). A thread screen keeps the row
//! indexes of every top-level comment and moves the viewport to the nearest
//! one after or before the first visible row.

use crate::tree::CommentForest;

/// Display-row indexes of the forest's top-level nodes, ascending.
pub fn top_level_indexes<C>(forest: &CommentForest<C>) -> Vec<usize> {
    forest
        .iter_depth_first()
        .enumerate()
        .filter(|(_, node)| node.parent().is_none())
        .map(|(index, _)| index)
        .collect()
}

/// First top-level row strictly below `first_visible`.
pub fn next_top_level(indexes: &[usize], first_visible: usize) -> Option<usize> {
    indexes.iter().copied().find(|&index| index > first_visible)
}

/// Last top-level row strictly above `first_visible`.
pub fn previous_top_level(indexes: &[usize], first_visible: usize) -> Option<usize> {
    indexes.iter().rev().copied().find(|&index| index < first_visible)
}
