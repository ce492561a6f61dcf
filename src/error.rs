use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    // Config — detected before any filesystem access
    #[error("invalid extension: {0:?}")]
    InvalidExtension(String),

    // Traversal — any one of these aborts the whole walk
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "failed at: <path>" without pattern
    /// matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p) | Self::Io { path: p, .. } => Some(p),
            Self::InvalidExtension(_) => None,
        }
    }

    /// Classify an `io::Error` raised while inspecting `path`.
    ///
    /// A vanished path (root missing, or a child deleted between listing and
    /// classification) gets its own variant; everything else is a plain IO
    /// fault. Both abort the walk — there is no recoverable traversal error.
    pub(crate) fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.to_path_buf())
        } else {
            Self::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
