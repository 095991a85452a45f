//! # Comment thread reconstruction
//!
//! Lemmy returns the comments of a post (or of a single comment's
//! sub-thread) as a flat, paginated list. Each comment carries a
//! materialized path such as `0.1.4.9`: the synthetic root `0`, then every
//! ancestor id, then its own id. This crate rebuilds the reply forest from
//! such a page.
//!
//! ## Core Algorithm
//!
//! 1. **Depth offset**: a sub-thread page is shifted so its anchor comment
//!    sits at depth 0
//! 2. **Insert**: every comment becomes a node keyed by id (first occurrence wins)
//! 3. **Link**: in page order, each node is attached to its parent; missing
//!    parents are synthesized as placeholders and linked recursively
//!
//! ## Usage Example
//!
//! ```
//! use comment_tree::{CommentRecord, ThreadConfig, ThreadView};
//!
//! let page = vec![
//!     CommentRecord::new(1, "0.1"),
//!     CommentRecord::new(2, "0.1.2"),
//!     CommentRecord::new(9, "0.5.9"),
//! ];
//!
//! let view = ThreadView::build(page, &ThreadConfig::full_thread())?;
//! let rows: Vec<_> = view.rows().map(|node| (node.id(), node.depth())).collect();
//! assert_eq!(rows, vec![(1, 0), (2, 1), (5, 0), (9, 1)]);
//! # Ok::<(), comment_tree::TreeError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod comment;    // Comment records and the threading trait
pub mod navigation; // Top-level comment jumps
pub mod path;       // Materialized-path arithmetic
pub mod tree;       // Forest reconstruction

// Re-exports for convenience
pub use comment::{update_comment, CommentId, CommentRecord, ThreadedComment};
pub use path::PathError;
pub use tree::{
    build_tree, flatten, CommentForest, CommentNode, MissingComment, NodeKind, TreeError,
};

/// How a page of comments is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Reply tree with placeholders for missing ancestors.
    #[default]
    Tree,
    /// One depth-0 row per comment, in page order.
    Flat,
}

/// Parameters for laying out a comment page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadConfig {
    /// Tree or flat layout.
    pub mode: DisplayMode,

    /// Anchor comment when the page is a sub-thread (tree mode only).
    pub root_comment_id: Option<CommentId>,
}

impl ThreadConfig {
    /// Whole post thread, rooted at the post.
    pub fn full_thread() -> Self {
        Self::default()
    }

    /// Sub-thread anchored at `root_comment_id`.
    pub fn sub_thread(root_comment_id: CommentId) -> Self {
        Self::full_thread().with_root_comment_id(Some(root_comment_id))
    }

    /// Flat, unthreaded listing (profiles, inbox, search results).
    pub fn flat() -> Self {
        Self {
            mode: DisplayMode::Flat,
            root_comment_id: None,
        }
    }

    /// Set or clear the sub-thread anchor.
    pub fn with_root_comment_id(mut self, root_comment_id: Option<CommentId>) -> Self {
        self.root_comment_id = root_comment_id;
        self
    }
}

/// A page of comments laid out for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadView<C> {
    /// Unlinked depth-0 nodes in page order.
    Flat(Vec<CommentNode<C>>),
    /// Reconstructed reply forest.
    Tree(CommentForest<C>),
}

impl<C: ThreadedComment> ThreadView<C> {
    /// Lay out `comments` according to `config`.
    pub fn build<I>(comments: I, config: &ThreadConfig) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = C>,
    {
        match config.mode {
            DisplayMode::Flat => Ok(Self::Flat(flatten(comments))),
            DisplayMode::Tree => build_tree(comments, config.root_comment_id).map(Self::Tree),
        }
    }
}

impl<C> ThreadView<C> {
    /// Rows in display order.
    pub fn rows(&self) -> Box<dyn Iterator<Item = &CommentNode<C>> + '_> {
        match self {
            Self::Flat(nodes) => Box::new(nodes.iter()),
            Self::Tree(forest) => Box::new(forest.iter_depth_first()),
        }
    }

    /// Row indexes of top-level comments, for next/previous jumps.
    pub fn top_level_indexes(&self) -> Vec<usize> {
        match self {
            Self::Flat(nodes) => (0..nodes.len()).collect(),
            Self::Tree(forest) => navigation::top_level_indexes(forest),
        }
    }

    /// Forest, if this view is threaded.
    pub fn forest(&self) -> Option<&CommentForest<C>> {
        match self {
            Self::Tree(forest) => Some(forest),
            Self::Flat(_) => None,
        }
    }
}
