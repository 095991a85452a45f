//! Materialized-path arithmetic
//!
//! A path is the dotted ancestor chain of a comment, starting at the
//! synthetic root marker `0` and ending with the comment's own id:
//!
//! ```text
//! 0.1.4.9   comment 9, child of 4, child of top-level comment 1
//! ```
//!
//! Grammar: `^0(\.\d+)+$`. Every helper validates the whole path and fails
//! with [`PathError`] instead of guessing.

use thiserror::Error;

use crate::comment::CommentId;

/// Literal first segment of every path.
pub const ROOT_MARKER: &str = "0";

const SEPARATOR: char = '.';

/// A path that does not follow the dotted-integer grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Empty string.
    #[error("comment path is empty")]
    Empty,

    /// First segment is not the root marker `0`.
    #[error("comment path '{path}' does not start with the root marker 0")]
    MissingRootMarker {
        /// Offending path
        path: String,
    },

    /// A segment is empty or not a non-negative integer.
    #[error("comment path '{path}' has invalid segment '{segment}'")]
    InvalidSegment {
        /// Offending path
        path: String,
        /// Segment that failed to parse
        segment: String,
    },

    /// Path is only the root marker.
    #[error("comment path '{path}' has no comment segments")]
    NoSegments {
        /// Offending path
        path: String,
    },
}

/// Parse the comment segments of `path`, excluding the root marker.
pub fn segments(path: &str) -> Result<Vec<CommentId>, PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }

    let mut parts = path.split(SEPARATOR);
    if parts.next() != Some(ROOT_MARKER) {
        return Err(PathError::MissingRootMarker {
            path: path.to_string(),
        });
    }

    let ids = parts
        .map(|segment| parse_segment(path, segment))
        .collect::<Result<Vec<_>, _>>()?;

    if ids.is_empty() {
        return Err(PathError::NoSegments {
            path: path.to_string(),
        });
    }

    Ok(ids)
}

fn parse_segment(path: &str, segment: &str) -> Result<CommentId, PathError> {
    let invalid = || PathError::InvalidSegment {
        path: path.to_string(),
        segment: segment.to_string(),
    };

    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse().map_err(|_| invalid())
}

/// Check `path` against the grammar.
pub fn validate(path: &str) -> Result<(), PathError> {
    segments(path).map(|_| ())
}

/// Id of the comment the path belongs to (its last segment).
pub fn leaf_id(path: &str) -> Result<CommentId, PathError> {
    let ids = segments(path)?;
    // segments() never returns an empty list
    Ok(ids[ids.len() - 1])
}

/// Parent comment id, or `None` for a top-level comment (`0.X`).
pub fn parent_id(path: &str) -> Result<Option<CommentId>, PathError> {
    let ids = segments(path)?;
    if ids.len() < 2 {
        return Ok(None);
    }
    Ok(Some(ids[ids.len() - 2]))
}

/// Path with its last segment removed.
///
/// `0.1.2.3` becomes `0.1.2`; a top-level `0.1` becomes the bare root marker.
pub fn parent_path(path: &str) -> Result<&str, PathError> {
    validate(path)?;
    Ok(path
        .rsplit_once(SEPARATOR)
        .map(|(parent, _)| parent)
        .unwrap_or(ROOT_MARKER))
}

/// Depth below the synthetic root: a top-level comment has depth 0.
///
/// Equal to the number of segments minus two (root marker and self id).
pub fn depth(path: &str) -> Result<i32, PathError> {
    let ids = segments(path)?;
    Ok(ids.len() as i32 - 1)
}

/// Offset of a missing id: "not found" (-1) shifted past the root marker.
pub const ID_NOT_IN_PATH_DEPTH: i32 = -2;

/// Depth `id` would have if it were the comment at its position in `path`.
///
/// Used to shift a sub-thread so its anchor comment displays at depth 0.
/// An id that is not on the path yields [`ID_NOT_IN_PATH_DEPTH`], which
/// pushes every depth two levels down; a context page that starts with the
/// anchor's ancestors is laid out with that raw offset.
pub fn depth_of_id_within_path(path: &str, id: CommentId) -> Result<i32, PathError> {
    let ids = segments(path)?;
    // index counts from the first comment segment, i.e. one past the root marker
    Ok(ids
        .iter()
        .position(|&segment| segment == id)
        .map_or(ID_NOT_IN_PATH_DEPTH, |index| index as i32))
}
