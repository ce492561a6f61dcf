use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;

use crate::blocking;
use crate::engine::{self, EngineOptions};
use crate::error::WalkError;
use crate::filter::{Filtered, PathFilter};

// ---------------------------------------------------------------------------
// WalkBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring and executing a walk.
///
/// Created via [`trawl::walk()`](crate::walk). Configure with chained builder
/// methods, then execute with [`run_sync()`](WalkBuilder::run_sync) (blocking,
/// depth-first, deterministic order) or [`run()`](WalkBuilder::run)
/// (non-blocking, concurrent, arrival order).
///
/// # Example
///
/// ```rust,ignore
/// let routes = trawl::walk("routes")
///     .filter(trawl::extension_filter("js")?)
///     .ignore(Regex::new("node_modules")?)
///     .run_sync()?;
/// ```
pub struct WalkBuilder {
    root: PathBuf,
    filter: Option<Arc<dyn PathFilter>>,
    ignore: Option<Regex>,
}

impl WalkBuilder {
    pub(crate) fn new(root: PathBuf) -> Self {
        Self {
            root,
            filter: None,
            ignore: None,
        }
    }

    // ── Filter ────────────────────────────────────────────────────────────

    /// Set the filter applied to every discovered file.
    ///
    /// Any type implementing [`PathFilter`] is accepted, closures included.
    /// Without a filter, every file path is collected as-is.
    pub fn filter(mut self, f: impl PathFilter + 'static) -> Self {
        self.filter = Some(Arc::new(f));
        self
    }

    // ── Ignore ────────────────────────────────────────────────────────────

    /// Skip every path matching `pattern` — file or directory — before any
    /// filesystem call is made on it. A matching directory's entire subtree
    /// is never visited, classified, or included, regardless of the filter.
    pub fn ignore(mut self, pattern: Regex) -> Self {
        self.ignore = Some(pattern);
        self
    }

    // ── Execute ───────────────────────────────────────────────────────────

    /// Walk the tree sequentially and return every accepted value, in
    /// depth-first visiting order.
    ///
    /// # Errors
    ///
    /// Fails fast: the first filesystem error anywhere in the tree aborts
    /// the whole walk with no partial results.
    pub fn run_sync(self) -> Result<Vec<PathBuf>, WalkError> {
        let filter = self.filter.unwrap_or_else(|| Arc::new(AcceptAll));
        blocking::run(&self.root, filter.as_ref(), self.ignore.as_ref())
    }

    /// Walk the tree concurrently and return every accepted value.
    ///
    /// Every discovered entry spawns its own filesystem operation
    /// immediately; results arrive in whatever order those operations
    /// resolve, which is not deterministic across runs. The returned future
    /// settles exactly once, after every discovered entry has been visited.
    ///
    /// # Errors
    ///
    /// Fails fast: the first filesystem error anywhere in the tree settles
    /// the future with `Err` and no partial results.
    pub async fn run(self) -> Result<Vec<PathBuf>, WalkError> {
        let opts = EngineOptions {
            filter: self.filter.unwrap_or_else(|| Arc::new(AcceptAll)),
            ignore: self.ignore,
        };
        engine::run(self.root, opts).await
    }
}

// ---------------------------------------------------------------------------
// Built-in filters
// ---------------------------------------------------------------------------

/// Accepts every file, recording the raw path. Used when no filter is set.
struct AcceptAll;

impl PathFilter for AcceptAll {
    fn apply(&self, path: &Path) -> Filtered {
        Filtered::Accepted(path.to_path_buf())
    }
}
