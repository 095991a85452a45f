//! Comment records as supplied by the API layer.
//!
//! The tree builder only needs two things from a comment: its id and its
//! materialized path. Everything else (author, body, score) rides along
//! untouched, so the builder is generic over [`ThreadedComment`].

use serde::{Deserialize, Serialize};

/// Comment identifier, unique within an instance.
pub type CommentId = i32;

/// Anything that can be placed in a comment thread.
pub trait ThreadedComment {
    /// Comment id; must equal the last segment of [`path`](Self::path).
    fn id(&self) -> CommentId;

    /// Dotted ancestor chain from the synthetic root, e.g. `"0.1.4.9"`.
    fn path(&self) -> &str;
}

/// Comment record as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    /// Comment id.
    pub id: CommentId,
    /// Materialized path ending in `id`.
    pub path: String,
    /// Author of the comment.
    #[serde(default)]
    pub creator_id: i32,
    /// Markdown body.
    #[serde(default)]
    pub content: String,
    /// Net score (upvotes minus downvotes).
    #[serde(default)]
    pub score: i64,
    /// Publication timestamp, as sent by the server.
    #[serde(default)]
    pub published: Option<String>,
}

impl CommentRecord {
    /// Construct a record with an empty payload.
    pub fn new(id: CommentId, path: impl Into<String>) -> Self {
        Self {
            id,
            path: path.into(),
            creator_id: 0,
            content: String::new(),
            score: 0,
            published: None,
        }
    }

    /// Attach a body.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attach a score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }
}

impl ThreadedComment for CommentRecord {
    fn id(&self) -> CommentId {
        self.id
    }

    fn path(&self) -> &str {
        &self.path
    }
}

impl<T: ThreadedComment + ?Sized> ThreadedComment for &T {
    fn id(&self) -> CommentId {
        (**self).id()
    }

    fn path(&self) -> &str {
        (**self).path()
    }
}

/// Replace the first record sharing `updated`'s id, returning the old one.
///
/// Leaves `comments` untouched and returns `None` when no record matches.
pub fn update_comment<C: ThreadedComment>(comments: &mut [C], updated: C) -> Option<C> {
    let slot = comments.iter_mut().find(|c| c.id() == updated.id())?;
    Some(std::mem::replace(slot, updated))
}
