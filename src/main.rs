use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comment_tree::{CommentId, CommentNode, CommentRecord, ThreadConfig, ThreadView};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "comment-tree",
    about = "Lay out a flat page of Lemmy comments as a reply tree"
)]
struct Cli {
    /// Log build details to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rebuild the reply tree, synthesizing missing ancestors.
    Tree {
        /// JSON array of comments (`-` for stdin).
        comments: PathBuf,
        /// Anchor comment id when the page is a sub-thread.
        #[arg(long)]
        root: Option<CommentId>,
    },
    /// List comments in page order without threading.
    Flat {
        /// JSON array of comments (`-` for stdin).
        comments: PathBuf,
    },
}

impl Commands {
    /// Input location and layout settings for this subcommand.
    fn into_parts(self) -> (PathBuf, ThreadConfig) {
        match self {
            Self::Tree { comments, root } => (
                comments,
                ThreadConfig::full_thread().with_root_comment_id(root),
            ),
            Self::Flat { comments } => (comments, ThreadConfig::flat()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (path, config) = cli.command.into_parts();
    let records = read_comments(&path)?;

    let stdout = io::stdout();
    write_thread(&mut stdout.lock(), records, &config)
}

/// Lay out `records` per `config` and write one rendered row per line.
fn write_thread<W: Write>(
    out: &mut W,
    records: Vec<CommentRecord>,
    config: &ThreadConfig,
) -> Result<()> {
    info!(count = records.len(), mode = ?config.mode, "loaded comments");

    let view = ThreadView::build(records, config).context("failed to lay out comment thread")?;
    for node in view.rows() {
        writeln!(out, "{}", render_row(node))?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_comments(path: &Path) -> Result<Vec<CommentRecord>> {
    let raw = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read comments from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read comments from {}", path.display()))?
    };

    parse_comments(&raw).with_context(|| format!("invalid comment JSON in {}", path.display()))
}

fn parse_comments(raw: &str) -> Result<Vec<CommentRecord>> {
    Ok(serde_json::from_str(raw)?)
}

fn render_row(node: &CommentNode<CommentRecord>) -> String {
    let indent = "  ".repeat(node.depth().max(0) as usize);
    match node.comment() {
        Some(comment) => format!(
            "{indent}#{id} ({score:+}) {content}",
            id = comment.id,
            score = comment.score,
            content = comment.content.lines().next().unwrap_or_default()
        ),
        None => format!("{indent}{node}"),
    }
}
