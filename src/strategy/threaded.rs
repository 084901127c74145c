//! OS-thread worker pool
//!
//! Spawns one named thread per account (`ledger-worker-<id>`) and joins all
//! of them before returning. Each thread blocks only while waiting for an
//! account guard it does not hold.

use crate::core::{Ledger, Worker, WorkerPool, WorkerRun};
use crate::types::{AccountId, LedgerError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::error;

/// One dedicated thread per account
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPool;

impl WorkerPool for ThreadPool {
    fn execute(
        &self,
        ledger: Arc<Ledger>,
        accounts: Vec<AccountId>,
    ) -> Result<Vec<WorkerRun>, LedgerError> {
        let mut handles = Vec::with_capacity(accounts.len());
        let mut failure = None;

        for id in accounts {
            let ledger = Arc::clone(&ledger);
            let spawned = thread::Builder::new()
                .name(format!("ledger-worker-{}", id))
                .spawn(move || Worker::new(&ledger, id)?.run_to_completion());

            match spawned {
                Ok(handle) => handles.push((id, handle)),
                Err(e) => {
                    error!(account = id, error = %e, "failed to spawn worker thread");
                    failure = Some(LedgerError::from(e));
                    break;
                }
            }
        }

        join_workers(handles, failure)
    }

    fn name(&self) -> &'static str {
        "threads"
    }
}

/// Join every started worker, even after a failure
///
/// `failure` carries an error raised before joining (a failed spawn). The
/// first failure wins; a panicked worker becomes `WorkerPanicked`.
fn join_workers(
    handles: Vec<(AccountId, JoinHandle<Result<WorkerRun, LedgerError>>)>,
    mut failure: Option<LedgerError>,
) -> Result<Vec<WorkerRun>, LedgerError> {
    let mut runs = Vec::with_capacity(handles.len());
    for (id, handle) in handles {
        match handle.join() {
            Ok(Ok(run)) => runs.push(run),
            Ok(Err(e)) => {
                error!(account = id, error = %e, "worker failed");
                failure.get_or_insert(e);
            }
            Err(_) => {
                error!(account = id, "worker panicked");
                failure.get_or_insert(LedgerError::worker_panicked(id));
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(runs),
    }
}
