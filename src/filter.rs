use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::WalkError;

// ---------------------------------------------------------------------------
// Filtered
// ---------------------------------------------------------------------------

/// The outcome of running a [`PathFilter`] over one file path.
///
/// An explicit two-case result rather than an `Option`-of-truthy value: the
/// accepted value may legitimately differ from the input path (filters are
/// transforms, not just predicates), so acceptance and the value carried are
/// one and the same case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filtered {
    /// The path passed the filter; this value goes into the results.
    /// It need not equal the input path.
    Accepted(PathBuf),

    /// The path is excluded from the results.
    Rejected,
}

// ---------------------------------------------------------------------------
// PathFilter
// ---------------------------------------------------------------------------

/// Decides whether a discovered file belongs in the results, and what value
/// to record for it.
///
/// Implement this for custom matching logic — extension filtering, regex,
/// metadata checks, or path rewriting. Filters are applied to files only;
/// directories are always descended into (use
/// [`WalkBuilder::ignore`](crate::WalkBuilder::ignore) to skip subtrees).
///
/// # Thread Safety
///
/// `Send + Sync` are required — the async walker shares the filter across
/// concurrently running entry tasks.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use trawl::{Filtered, PathFilter};
///
/// /// Accepts markdown sources, recording the page they render to.
/// struct RenderedPages;
///
/// impl PathFilter for RenderedPages {
///     fn apply(&self, path: &Path) -> Filtered {
///         match path.extension() {
///             Some(ext) if ext == "md" => Filtered::Accepted(path.with_extension("html")),
///             _ => Filtered::Rejected,
///         }
///     }
/// }
/// ```
pub trait PathFilter: Send + Sync {
    /// Inspect one file path and decide its fate.
    fn apply(&self, path: &Path) -> Filtered;
}

/// Plain closures work as filters.
///
/// ```rust
/// use std::path::Path;
/// use trawl::{Filtered, PathFilter};
///
/// let hidden = |path: &Path| {
///     match path.file_name().map(|n| n.to_string_lossy().starts_with('.')) {
///         Some(true) => Filtered::Accepted(path.to_path_buf()),
///         _ => Filtered::Rejected,
///     }
/// };
/// assert_eq!(hidden.apply(Path::new("a/.env")), Filtered::Accepted("a/.env".into()));
/// ```
impl<F> PathFilter for F
where
    F: Fn(&Path) -> Filtered + Send + Sync,
{
    fn apply(&self, path: &Path) -> Filtered {
        self(path)
    }
}

// ---------------------------------------------------------------------------
// ExtensionFilter
// ---------------------------------------------------------------------------

/// Accepts paths ending in `.<extension>`, produced by [`extension_filter`].
///
/// On acceptance the path is recorded unchanged.
#[derive(Debug)]
pub struct ExtensionFilter {
    pattern: Regex,
}

impl PathFilter for ExtensionFilter {
    fn apply(&self, path: &Path) -> Filtered {
        if self.pattern.is_match(&path.to_string_lossy()) {
            Filtered::Accepted(path.to_path_buf())
        } else {
            Filtered::Rejected
        }
    }
}

/// Build a filter that accepts files with the given extension.
///
/// `"js"` accepts `a/b/c.js` and `c.js`, rejects `c.jsx` and `c.js2` — the
/// extension must be the final one, not merely a prefix of it.
///
/// # Errors
///
/// [`WalkError::InvalidExtension`] if `ext` is empty or contains characters
/// outside `[A-Za-z0-9/]`. Validated before any use, never retried.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use trawl::{extension_filter, Filtered, PathFilter};
///
/// let js = extension_filter("js").unwrap();
/// assert_eq!(js.apply(Path::new("a/b/c.js")), Filtered::Accepted("a/b/c.js".into()));
/// assert_eq!(js.apply(Path::new("c.jsx")), Filtered::Rejected);
///
/// assert!(extension_filter("").is_err());
/// ```
pub fn extension_filter(ext: &str) -> Result<ExtensionFilter, WalkError> {
    if ext.is_empty() || !ext.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'/') {
        return Err(WalkError::InvalidExtension(ext.to_string()));
    }

    // Validation above guarantees `ext` contains no regex metacharacters.
    let pattern = Regex::new(&format!(r"[\w\-/]+\.{ext}$"))
        .map_err(|_| WalkError::InvalidExtension(ext.to_string()))?;

    Ok(ExtensionFilter { pattern })
}
