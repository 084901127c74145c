//! Core trait for pluggable worker pools
//!
//! The Dispatcher decides *what* runs (one worker per account with pending
//! operations); a `WorkerPool` decides *where* it runs. Both the OS-thread
//! and the tokio implementations honour the same contract.

use super::dispatcher::WorkerRun;
use super::Ledger;
use crate::types::{AccountId, LedgerError};
use std::sync::Arc;

/// Executes one worker per account and joins them all
pub trait WorkerPool: Send + Sync {
    /// Run one worker for each account in `accounts` and wait for all of them
    ///
    /// Each worker must drain its account's queue in FIFO order via
    /// [`Worker`](super::Worker). The call returns only after every worker
    /// has terminated; a worker failure is reported after the remaining
    /// workers have been joined.
    fn execute(
        &self,
        ledger: Arc<Ledger>,
        accounts: Vec<AccountId>,
    ) -> Result<Vec<WorkerRun>, LedgerError>;

    /// Short name used in logs
    fn name(&self) -> &'static str;
}
