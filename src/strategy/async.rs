//! Tokio worker pool
//!
//! Builds a multi-threaded tokio runtime and spawns one task per account.
//! Each task applies one operation at a time and yields between operations,
//! so accounts interleave even when the runtime has a single worker thread.
//!
//! # Thread Safety
//!
//! Account guards are plain blocking mutexes. They are only taken inside a
//! synchronous `Worker::step` call and are always released before the task
//! reaches an `.await`, so a task never parks while holding a guard.
//!
//! `execute` drives its own runtime with `block_on`; it must not be called
//! from inside another tokio runtime.

use crate::core::{Ledger, Worker, WorkerPool, WorkerRun};
use crate::types::{AccountId, LedgerError};
use futures::future::join_all;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, warn};

/// Configuration for the async worker pool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Number of runtime worker threads the account tasks are scheduled on
    pub worker_threads: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            worker_threads: num_cpus::get(),
        }
    }
}

impl DispatchConfig {
    /// Create a config, falling back to the default for a zero thread count
    pub fn new(worker_threads: usize) -> Self {
        let default = Self::default();

        let worker_threads = if worker_threads == 0 {
            warn!(
                requested = worker_threads,
                using = default.worker_threads,
                "invalid worker_threads, using default"
            );
            default.worker_threads
        } else {
            worker_threads
        };

        Self { worker_threads }
    }
}

/// One tokio task per account on a dedicated runtime
#[derive(Debug, Clone)]
pub struct AsyncPool {
    config: DispatchConfig,
}

impl AsyncPool {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }
}

impl WorkerPool for AsyncPool {
    fn execute(
        &self,
        ledger: Arc<Ledger>,
        accounts: Vec<AccountId>,
    ) -> Result<Vec<WorkerRun>, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.worker_threads)
            .thread_name("ledger-async-worker")
            .build()
            .map_err(LedgerError::runtime)?;

        runtime.block_on(async {
            let tasks = accounts
                .into_iter()
                .map(|id| {
                    let ledger = Arc::clone(&ledger);
                    let task = tokio::spawn(async move {
                        let mut worker = Worker::new(&ledger, id)?;
                        while worker.step()? {
                            tokio::task::yield_now().await;
                        }
                        Ok::<_, LedgerError>(worker.finish())
                    });
                    (id, task)
                })
                .collect();

            join_workers(tasks).await
        })
    }

    fn name(&self) -> &'static str {
        "async"
    }
}

/// Await every spawned worker, then report the first failure
///
/// A panicked task surfaces as `WorkerPanicked` only once all tasks have
/// completed.
async fn join_workers(
    tasks: Vec<(AccountId, JoinHandle<Result<WorkerRun, LedgerError>>)>,
) -> Result<Vec<WorkerRun>, LedgerError> {
    let (ids, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();

    let mut runs = Vec::with_capacity(handles.len());
    let mut failure = None;
    for (id, joined) in ids.into_iter().zip(join_all(handles).await) {
        match joined {
            Ok(Ok(run)) => runs.push(run),
            Ok(Err(e)) => {
                error!(account = id, error = %e, "worker failed");
                failure.get_or_insert(e);
            }
            Err(e) => {
                error!(account = id, error = %e, "worker panicked");
                failure.get_or_insert(LedgerError::worker_panicked(id));
            }
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(runs),
    }
}
