//! # trawl
//!
//! Recursive file discovery — sync and async walkers, filterable, embeddable.
//!
//! trawl owns the traversal engine: the recursive descent, the fan-out/join
//! accounting the async walker uses to detect when every outstanding
//! filesystem operation has resolved, and the filter/ignore composition. It
//! does **not** own output formatting or what you do with the discovered
//! paths — route registration, indexing, and the like belong to the caller.
//!
//! # Quick Start
//!
//! ```rust
//! use trawl::{extension_filter, walk};
//!
//! # fn main() -> Result<(), trawl::WalkError> {
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("index.js"), "").unwrap();
//! std::fs::create_dir(dir.path().join("lib")).unwrap();
//! std::fs::write(dir.path().join("lib").join("util.js"), "").unwrap();
//! std::fs::write(dir.path().join("notes.txt"), "").unwrap();
//!
//! let scripts = walk(dir.path())
//!     .filter(extension_filter("js")?)
//!     .run_sync()?;
//!
//! assert_eq!(scripts.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Sync vs. async
//!
//! [`WalkBuilder::run_sync`] recurses on the calling thread and returns
//! results in depth-first visiting order. [`WalkBuilder::run`] issues every
//! filesystem operation concurrently — each discovered entry spawns its own
//! task the moment it is found — and returns results in arrival order, which
//! is **not** deterministic across runs. Both deliver the same *set* of
//! accepted values for the same tree and filter, and both fail fast: the
//! first filesystem error anywhere aborts the walk with no partial results.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), trawl::WalkError> {
//! let everything = trawl::walk("assets").run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Filters
//!
//! A [`PathFilter`] both decides inclusion and chooses the recorded value —
//! it may transform the path on acceptance. [`extension_filter`] covers the
//! common "match file extension" case; implement the trait (or pass a
//! closure) for anything else:
//!
//! ```rust
//! use std::path::Path;
//! use trawl::{Filtered, PathFilter};
//!
//! /// Accepts TOML manifests, recording their parent directory.
//! struct ManifestDirs;
//!
//! impl PathFilter for ManifestDirs {
//!     fn apply(&self, path: &Path) -> Filtered {
//!         match (path.file_name(), path.parent()) {
//!             (Some(name), Some(dir)) if name == "Cargo.toml" => {
//!                 Filtered::Accepted(dir.to_path_buf())
//!             }
//!             _ => Filtered::Rejected,
//!         }
//!     }
//! }
//! ```
//!
//! # Logging
//!
//! The walkers emit [`tracing`] debug events — one per visited path, tagged
//! with the live pending-operation count on the async side. Without a
//! subscriber installed these are no-ops; trawl never installs one itself.

#![forbid(unsafe_code)]

mod blocking;
mod builder;
mod engine;
mod error;
mod filter;
mod ledger;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::WalkBuilder;
pub use error::WalkError;
pub use filter::{extension_filter, ExtensionFilter, Filtered, PathFilter};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`WalkBuilder`] rooted at `root`.
///
/// # Example
///
/// ```rust
/// use trawl::walk;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::write(dir.path().join("a.txt"), "").unwrap();
/// std::fs::write(dir.path().join("b.txt"), "").unwrap();
///
/// let files = walk(dir.path()).run_sync().unwrap();
/// assert_eq!(files.len(), 2);
/// ```
pub fn walk(root: impl Into<std::path::PathBuf>) -> WalkBuilder {
    WalkBuilder::new(root.into())
}
