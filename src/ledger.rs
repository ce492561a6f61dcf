use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::Notify;

use crate::error::WalkError;

// ---------------------------------------------------------------------------
// WorkLedger
// ---------------------------------------------------------------------------

/// Accounting for one async walk: outstanding work units, accumulated
/// results, and the first fault, behind a single completion trigger.
///
/// Recursive fan-out over a filesystem has no parent task to await — new
/// entries are discovered while others are still resolving. The ledger is the
/// completion barrier: it counts every unit of work from the moment it is
/// discovered ([`fork`](Self::fork)) to the moment it resolves
/// ([`finish`](Self::finish)), and releases [`wait`](Self::wait) exactly once
/// when the count reaches zero.
///
/// Invariant: a fresh ledger counts 1 (the root), `fork(n)` runs strictly
/// before the n counted units exist, and every `finish` corresponds to a unit
/// previously counted. Under that discipline the count cannot reach zero
/// while any discovered work is outstanding.
///
/// Owned by exactly one walk invocation; concurrent walks do not share state.
pub(crate) struct WorkLedger {
    state: Mutex<State>,
    done: Notify,
}

struct State {
    pending: usize,
    results: Vec<PathBuf>,
    fault: Option<WalkError>,
}

impl WorkLedger {
    /// A fresh ledger counts the root itself as one pending unit.
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State {
                pending: 1,
                results: Vec::new(),
                fault: None,
            }),
            done: Notify::new(),
        }
    }

    // A poisoned lock only means some entry task panicked mid-update; the
    // counts are still usable, so take the state as-is.
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count `n` newly discovered units of work.
    ///
    /// Callers must fork before spawning the units, and before finishing the
    /// unit that discovered them.
    pub(crate) fn fork(&self, n: usize) {
        self.lock().pending += n;
    }

    /// Resolve one unit of work, optionally recording an accepted value.
    ///
    /// Resolving the last outstanding unit releases [`wait`](Self::wait).
    pub(crate) fn finish(&self, accepted: Option<PathBuf>) {
        let mut state = self.lock();
        if state.fault.is_none() {
            if let Some(value) = accepted {
                state.results.push(value);
            }
        }
        state.pending -= 1;
        let settled = state.pending == 0;
        drop(state);
        if settled {
            self.done.notify_one();
        }
    }

    /// Record the walk's first fault and release [`wait`](Self::wait) with it.
    ///
    /// The faulting unit is deliberately not marked finished, so the count
    /// can never reach zero afterwards — normal completion is permanently
    /// suppressed once a fault is recorded.
    pub(crate) fn fail(&self, err: WalkError) {
        let mut state = self.lock();
        if state.fault.is_none() {
            state.fault = Some(err);
        }
        drop(state);
        self.done.notify_one();
    }

    /// Whether a fault has been recorded. Entry tasks still in flight use
    /// this to drain without issuing further filesystem calls.
    pub(crate) fn faulted(&self) -> bool {
        self.lock().fault.is_some()
    }

    /// Current number of outstanding units, for progress reporting.
    pub(crate) fn pending(&self) -> usize {
        self.lock().pending
    }

    /// Resolve exactly once: the accumulated results when every counted unit
    /// has finished, or the first recorded fault, whichever comes first.
    pub(crate) async fn wait(&self) -> Result<Vec<PathBuf>, WalkError> {
        loop {
            {
                let mut state = self.lock();
                if let Some(err) = state.fault.take() {
                    return Err(err);
                }
                if state.pending == 0 {
                    return Ok(std::mem::take(&mut state.results));
                }
            }
            // notify_one stores a permit, so a trigger that fires between the
            // check above and this await is not lost.
            self.done.notified().await;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    fn p(name: &str) -> PathBuf {
        PathBuf::from(name)
    }

    #[tokio::test]
    async fn completes_once_all_units_finish_in_any_order() {
        let ledger = Arc::new(WorkLedger::new());

        ledger.fork(10);
        ledger.finish(None); // the root's own unit

        for i in 0..10usize {
            let ledger = Arc::clone(&ledger);
            tokio::spawn(async move {
                // Stagger completions so arrival order differs from spawn order.
                sleep(Duration::from_millis(((i * 7) % 10) as u64)).await;
                ledger.finish(Some(p(&format!("file-{i}"))));
            });
        }

        let results = timeout(Duration::from_secs(5), ledger.wait())
            .await
            .expect("walk should settle")
            .expect("no fault was recorded");
        assert_eq!(results.len(), 10);
    }

    #[tokio::test]
    async fn does_not_complete_while_work_is_outstanding() {
        let ledger = WorkLedger::new();

        ledger.fork(2);
        ledger.finish(None); // root
        ledger.finish(Some(p("done"))); // one of two children

        let waited = timeout(Duration::from_millis(100), ledger.wait()).await;
        assert!(waited.is_err(), "wait must not resolve with a unit pending");
    }

    #[tokio::test]
    async fn fault_resolves_wait_even_with_units_outstanding() {
        let ledger = Arc::new(WorkLedger::new());

        ledger.fork(5);
        ledger.finish(Some(p("already-found")));
        ledger.fail(WalkError::NotFound(p("ghost")));

        let err = timeout(Duration::from_secs(5), ledger.wait())
            .await
            .expect("fault should settle the walk")
            .expect_err("fault must surface as an error");
        assert!(matches!(err, WalkError::NotFound(_)));
        assert!(ledger.faulted());
    }

    #[tokio::test]
    async fn first_fault_wins() {
        let ledger = WorkLedger::new();

        ledger.fork(2);
        ledger.fail(WalkError::NotFound(p("first")));
        ledger.fail(WalkError::NotFound(p("second")));

        match ledger.wait().await {
            Err(WalkError::NotFound(path)) => assert_eq!(path, p("first")),
            other => panic!("expected the first fault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn results_arrive_in_completion_order() {
        let ledger = WorkLedger::new();

        ledger.fork(3);
        ledger.finish(None); // root
        ledger.finish(Some(p("b")));
        ledger.finish(Some(p("a")));
        ledger.finish(Some(p("c")));

        let results = ledger.wait().await.unwrap();
        assert_eq!(results, vec![p("b"), p("a"), p("c")]);
    }
}
