use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use tokio::fs;
use tracing::debug;

use crate::error::WalkError;
use crate::filter::{Filtered, PathFilter};
use crate::ledger::WorkLedger;

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Internal options passed from the builder to `run()`.
pub(crate) struct EngineOptions {
    pub filter: Arc<dyn PathFilter>,
    pub ignore: Option<Regex>,
}

// ---------------------------------------------------------------------------
// run()
// ---------------------------------------------------------------------------

/// Execute a non-blocking walk rooted at `root`.
///
/// This is the core async engine. Every discovered entry immediately spawns
/// its own task — fan-out is unbounded, and sibling completion order is
/// whatever order the filesystem resolves in. The [`WorkLedger`] is the sole
/// completion mechanism: the future returned here settles exactly once, with
/// either every accepted path or the walk's first fault.
///
/// Called by `WalkBuilder::run()` after configuration.
pub(crate) async fn run(root: PathBuf, opts: EngineOptions) -> Result<Vec<PathBuf>, WalkError> {
    let ledger = Arc::new(WorkLedger::new());
    let opts = Arc::new(opts);

    visit(Arc::clone(&ledger), opts, root);

    let results = ledger.wait().await?;
    debug!(found = results.len(), "async walk finished");
    Ok(results)
}

/// Spawn the task that classifies and processes one path.
///
/// Directories list their children, count them in the ledger, spawn a task
/// per child, and only then finish their own unit. Counting the children
/// strictly before the directory's own `finish` keeps the ledger from
/// reaching zero while descendants are still outstanding.
fn visit(ledger: Arc<WorkLedger>, opts: Arc<EngineOptions>, path: PathBuf) {
    tokio::spawn(async move {
        // Once a fault is recorded the walk's outcome is fixed; entries
        // still in flight drain without touching the filesystem.
        if ledger.faulted() {
            return;
        }

        if let Some(ignore) = &opts.ignore {
            if ignore.is_match(&path.to_string_lossy()) {
                debug!(pending = ledger.pending(), path = %path.display(), "ignored");
                ledger.finish(None);
                return;
            }
        }

        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) => {
                ledger.fail(WalkError::from_io(&path, e));
                return;
            }
        };

        if meta.is_dir() {
            debug!(pending = ledger.pending(), path = %path.display(), "scanning directory");

            let mut entries = match fs::read_dir(&path).await {
                Ok(entries) => entries,
                Err(e) => {
                    ledger.fail(WalkError::from_io(&path, e));
                    return;
                }
            };

            let mut children = Vec::new();
            loop {
                match entries.next_entry().await {
                    Ok(Some(entry)) => children.push(entry.file_name()),
                    Ok(None) => break,
                    Err(e) => {
                        ledger.fail(WalkError::from_io(&path, e));
                        return;
                    }
                }
            }

            ledger.fork(children.len());
            for name in children {
                visit(Arc::clone(&ledger), Arc::clone(&opts), path.join(name));
            }
            ledger.finish(None);
        } else if meta.is_file() {
            debug!(pending = ledger.pending(), path = %path.display(), "scanning file");

            match opts.filter.apply(&path) {
                Filtered::Accepted(value) => {
                    debug!(pending = ledger.pending(), value = %value.display(), "accepted");
                    ledger.finish(Some(value));
                }
                Filtered::Rejected => ledger.finish(None),
            }
        } else {
            // Sockets, devices, and other non-file entries resolve to nothing.
            ledger.finish(None);
        }
    });
}
