//! Shared helpers for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use comment_tree::{CommentForest, CommentId, CommentNode, CommentRecord};

/// Page of payload-free records.
pub fn page(entries: &[(CommentId, &str)]) -> Vec<CommentRecord> {
    entries
        .iter()
        .map(|&(id, path)| CommentRecord::new(id, path))
        .collect()
}

/// `(id, depth, is_placeholder)` for every row in display order.
pub fn rows(forest: &CommentForest<CommentRecord>) -> Vec<(CommentId, i32, bool)> {
    forest
        .iter_depth_first()
        .map(|node| (node.id(), node.depth(), node.is_placeholder()))
        .collect()
}

/// Indented text rendering, one row per line.
pub fn render(forest: &CommentForest<CommentRecord>) -> String {
    forest.iter_depth_first().map(render_row).collect()
}

fn render_row(node: &CommentNode<CommentRecord>) -> String {
    let indent = "  ".repeat(node.depth().max(0) as usize);
    match node.comment() {
        Some(comment) => format!(
            "{indent}#{} ({:+}) {}\n",
            comment.id, comment.score, comment.content
        ),
        None => format!("{indent}{node}\n"),
    }
}

/// Compare the rendered layout of `forest` with `tests/snapshots/<name>`,
/// row by row. `COMMENT_TREE_UPDATE_SNAPSHOTS=1` rewrites the file instead.
pub fn assert_layout_snapshot(name: &str, forest: &CommentForest<CommentRecord>) {
    let rendered = render(forest);
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name);

    if std::env::var_os("COMMENT_TREE_UPDATE_SNAPSHOTS").is_some() {
        fs::write(&path, &rendered).expect("write layout snapshot");
        return;
    }

    let expected = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("layout snapshot {} unreadable: {err}", path.display()));
    let expected_rows: Vec<&str> = expected.lines().collect();
    let actual_rows: Vec<&str> = rendered.lines().collect();

    if let Some(row) = (0..expected_rows.len().max(actual_rows.len()))
        .find(|&row| expected_rows.get(row) != actual_rows.get(row))
    {
        panic!(
            "layout {name} differs at row {row}: expected {:?}, got {:?}\n\
             set COMMENT_TREE_UPDATE_SNAPSHOTS=1 to accept the new layout\n{rendered}",
            expected_rows.get(row),
            actual_rows.get(row),
        );
    }
}
