//! Flat page to forest reconstruction
//!
//! Two passes over the input:
//! 1. Insert every comment into the id map with its offset-corrected depth.
//! 2. In input order, link each comment under its parent. A parent that is
//!    not in the map gets a placeholder, which is linked the same way, so a
//!    chain of missing ancestors is woven in one level at a time.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use tracing::{debug, trace, warn};

use super::{CommentForest, CommentNode, MissingComment, TreeError};
use crate::comment::{CommentId, ThreadedComment};
use crate::path;

/// Wrap each comment in a depth-0 node with no links.
///
/// Keeps input order and duplicates; used for flat feeds.
pub fn flatten<C, I>(comments: I) -> Vec<CommentNode<C>>
where
    I: IntoIterator<Item = C>,
{
    comments
        .into_iter()
        .map(|comment| CommentNode::present(comment, 0))
        .collect()
}

/// Rebuild the reply forest of a flat comment page.
///
/// `root_comment_id` marks the page as a sub-thread anchored at that comment:
/// depths are shifted by the anchor's position in the first comment's path,
/// so a page opening at the anchor puts it at depth 0, and the anchor never
/// gets a synthesized parent. A page opening with one of the anchor's
/// ancestors keeps the raw offset (see [`path::depth_of_id_within_path`]).
///
/// Duplicate ids keep their first occurrence. Sibling order follows input
/// order; nothing is sorted.
pub fn build_tree<C, I>(
    comments: I,
    root_comment_id: Option<CommentId>,
) -> Result<CommentForest<C>, TreeError>
where
    C: ThreadedComment,
    I: IntoIterator<Item = C>,
{
    let comments: Vec<C> = comments.into_iter().collect();

    let depth_offset = match (root_comment_id, comments.first()) {
        (Some(root), Some(first)) => path::depth_of_id_within_path(first.path(), root)?,
        _ => 0,
    };

    let mut builder = TreeBuilder::new(comments.len(), root_comment_id);
    let mut order = Vec::with_capacity(comments.len());

    for comment in comments {
        let id = comment.id();
        if path::leaf_id(comment.path())? != id {
            return Err(TreeError::IdMismatch {
                id,
                path: comment.path().to_string(),
            });
        }
        let depth = path::depth(comment.path())? - depth_offset;

        match builder.nodes.entry(id) {
            Entry::Occupied(_) => {
                warn!(id, "duplicate comment id in page, keeping first occurrence");
            }
            Entry::Vacant(slot) => {
                slot.insert(CommentNode::present(comment, depth));
                order.push(id);
            }
        }
    }

    for id in order {
        let node_path = builder.path_of(id).to_string();
        builder.link(&node_path, id)?;
    }

    debug!(
        comments = builder.nodes.len() - builder.placeholders,
        roots = builder.roots.len(),
        placeholders = builder.placeholders,
        depth_offset,
        "built comment tree"
    );

    Ok(CommentForest {
        nodes: builder.nodes,
        roots: builder.roots,
    })
}

struct TreeBuilder<C> {
    nodes: HashMap<CommentId, CommentNode<C>>,
    roots: Vec<CommentId>,
    root_comment_id: Option<CommentId>,
    placeholders: usize,
}

impl<C: ThreadedComment> TreeBuilder<C> {
    fn new(capacity: usize, root_comment_id: Option<CommentId>) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
            roots: Vec::new(),
            root_comment_id,
            placeholders: 0,
        }
    }

    fn path_of(&self, id: CommentId) -> &str {
        self.nodes.get(&id).map(CommentNode::path).unwrap_or_default()
    }

    fn depth_of(&self, id: CommentId) -> i32 {
        self.nodes.get(&id).map(CommentNode::depth).unwrap_or_default()
    }

    /// Place `id` (whose path is `node_path`) under its parent or at the root.
    ///
    /// Each recursive call works on a strictly shorter path.
    fn link(&mut self, node_path: &str, id: CommentId) -> Result<(), TreeError> {
        let Some(parent_id) = path::parent_id(node_path)? else {
            self.roots.push(id);
            return Ok(());
        };

        if self.nodes.contains_key(&parent_id) {
            if self.is_ancestor_or_self(id, parent_id) {
                return Err(TreeError::CycleDetected { id });
            }
            self.attach(parent_id, id);
            return Ok(());
        }

        // Ancestors of the sub-thread anchor are outside the fetched window.
        if Some(id) == self.root_comment_id {
            self.roots.push(id);
            return Ok(());
        }

        let parent_path = path::parent_path(node_path)?.to_string();
        let placeholder = CommentNode::placeholder(
            MissingComment {
                id: parent_id,
                path: parent_path.clone(),
            },
            self.depth_of(id) - 1,
        );
        trace!(id = parent_id, child = id, "synthesized placeholder for missing parent");

        self.nodes.insert(parent_id, placeholder);
        self.placeholders += 1;
        self.attach(parent_id, id);

        self.link(&parent_path, parent_id)
    }

    fn attach(&mut self, parent_id: CommentId, child_id: CommentId) {
        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.push_child(child_id);
        }
        if let Some(child) = self.nodes.get_mut(&child_id) {
            child.set_parent(parent_id);
        }
    }

    /// Whether `ancestor` is `node` itself or one of its linked ancestors.
    fn is_ancestor_or_self(&self, ancestor: CommentId, node: CommentId) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(node);

        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            if !visited.insert(id) {
                return false;
            }
            current = self.nodes.get(&id).and_then(CommentNode::parent);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentRecord;
    use crate::path::PathError;

    fn record(id: CommentId, path: &str) -> CommentRecord {
        CommentRecord::new(id, path)
    }

    #[test]
    fn test_flatten_keeps_order_and_depth_zero() {
        let nodes = flatten(vec![record(1, "0.5.1"), record(2, "0.5.2")]);

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id(), 1);
        assert_eq!(nodes[1].id(), 2);
        for node in &nodes {
            assert_eq!(node.depth(), 0);
            assert!(node.children().is_empty());
            assert_eq!(node.parent(), None);
        }
    }

    #[test]
    fn test_empty_page() {
        let forest = build_tree(Vec::<CommentRecord>::new(), None).unwrap();
        assert!(forest.is_empty());
        assert!(forest.root_ids().is_empty());

        let forest = build_tree(Vec::<CommentRecord>::new(), Some(3)).unwrap();
        assert!(forest.is_empty());
    }

    #[test]
    fn test_chain_of_missing_ancestors() {
        let forest = build_tree(vec![record(9, "0.1.4.9")], None).unwrap();

        assert_eq!(forest.root_ids(), &[1]);
        let one = forest.get(1).unwrap();
        let four = forest.get(4).unwrap();
        let nine = forest.get(9).unwrap();

        assert!(one.is_placeholder() && four.is_placeholder());
        assert_eq!(one.path(), "0.1");
        assert_eq!(four.path(), "0.1.4");
        assert_eq!((one.depth(), four.depth(), nine.depth()), (0, 1, 2));
        assert_eq!(one.children(), &[4]);
        assert_eq!(four.children(), &[9]);
        assert_eq!(nine.parent(), Some(4));
    }

    #[test]
    fn test_placeholder_is_shared_by_siblings() {
        let forest = build_tree(vec![record(5, "0.1.5"), record(6, "0.1.6")], None).unwrap();

        assert_eq!(forest.root_ids(), &[1]);
        assert_eq!(forest.get(1).unwrap().children(), &[5, 6]);
        assert_eq!(forest.placeholder_count(), 1);
    }

    #[test]
    fn test_child_before_parent_in_input() {
        let forest = build_tree(vec![record(2, "0.1.2"), record(1, "0.1")], None).unwrap();

        assert_eq!(forest.root_ids(), &[1]);
        assert!(!forest.get(1).unwrap().is_placeholder());
        assert_eq!(forest.get(1).unwrap().children(), &[2]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let forest = build_tree(
            vec![
                record(1, "0.1").with_score(10),
                record(2, "0.1.2"),
                record(1, "0.1").with_score(-3),
            ],
            None,
        )
        .unwrap();

        assert_eq!(forest.len(), 2);
        assert_eq!(forest.root_ids(), &[1]);
        let one = forest.get(1).unwrap();
        assert_eq!(one.comment().map(|c| c.score), Some(10));
        assert_eq!(one.children(), &[2]);
    }

    #[test]
    fn test_malformed_path_propagates() {
        let err = build_tree(vec![record(1, "0.1"), record(2, "0.x.2")], None).unwrap_err();
        assert!(matches!(
            err,
            TreeError::Path(PathError::InvalidSegment { .. })
        ));
    }

    #[test]
    fn test_id_must_match_path_leaf() {
        let err = build_tree(vec![record(3, "0.1.2")], None).unwrap_err();
        assert_eq!(
            err,
            TreeError::IdMismatch {
                id: 3,
                path: "0.1.2".to_string(),
            }
        );
    }

    #[test]
    fn test_context_page_led_by_anchor_ancestor() {
        // anchor 5 is not on the first path, so every depth shifts by two
        let forest = build_tree(
            vec![record(1, "0.1"), record(5, "0.1.5"), record(6, "0.1.5.6")],
            Some(5),
        )
        .unwrap();

        assert_eq!(forest.root_ids(), &[1]);
        assert_eq!(forest.get(1).unwrap().children(), &[5]);
        assert_eq!(forest.get(5).unwrap().children(), &[6]);
        assert_eq!(forest.placeholder_count(), 0);

        let depths: Vec<_> = [1, 5, 6]
            .iter()
            .map(|&id| forest.get(id).unwrap().depth())
            .collect();
        assert_eq!(depths, vec![2, 3, 4]);
    }

    #[test]
    fn test_mutually_referencing_paths_are_rejected() {
        let err = build_tree(vec![record(1, "0.2.1"), record(2, "0.1.2")], None).unwrap_err();
        assert_eq!(err, TreeError::CycleDetected { id: 2 });
    }

    #[test]
    fn test_repeated_id_within_path_is_rejected() {
        let err = build_tree(vec![record(5, "0.1.2.1.5")], None).unwrap_err();
        assert_eq!(err, TreeError::CycleDetected { id: 2 });
    }
}
