use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::debug;

use crate::error::WalkError;
use crate::filter::{Filtered, PathFilter};

/// Execute a blocking, depth-first walk rooted at `root`.
///
/// Recursion depth is the tree depth — the call stack is the traversal
/// state. Children are visited in the order the filesystem reports them,
/// which is not guaranteed to be sorted.
///
/// Called by `WalkBuilder::run_sync()` after configuration.
pub(crate) fn run(
    root: &Path,
    filter: &dyn PathFilter,
    ignore: Option<&Regex>,
) -> Result<Vec<PathBuf>, WalkError> {
    let mut results = Vec::new();
    visit(root, filter, ignore, &mut results)?;
    debug!(found = results.len(), "sync walk finished");
    Ok(results)
}

/// Process one path, pre-order: ignore check first, then classify, then
/// either recurse (directory) or filter (file). Any filesystem error
/// propagates straight out, aborting the whole walk with no partial results.
fn visit(
    path: &Path,
    filter: &dyn PathFilter,
    ignore: Option<&Regex>,
    results: &mut Vec<PathBuf>,
) -> Result<(), WalkError> {
    // Ignored subtrees are skipped before any filesystem call is made on them.
    if let Some(ignore) = ignore {
        if ignore.is_match(&path.to_string_lossy()) {
            debug!(path = %path.display(), "ignored");
            return Ok(());
        }
    }

    let meta = fs::metadata(path).map_err(|e| WalkError::from_io(path, e))?;

    if meta.is_dir() {
        debug!(path = %path.display(), "scanning directory");
        for entry in fs::read_dir(path).map_err(|e| WalkError::from_io(path, e))? {
            let entry = entry.map_err(|e| WalkError::from_io(path, e))?;
            visit(&entry.path(), filter, ignore, results)?;
        }
    } else if meta.is_file() {
        debug!(path = %path.display(), "scanning file");
        if let Filtered::Accepted(value) = filter.apply(path) {
            debug!(value = %value.display(), "accepted");
            results.push(value);
        }
    }
    // Anything else (sockets, devices) yields nothing.

    Ok(())
}
