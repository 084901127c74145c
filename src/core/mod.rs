//! Core ledger module
//!
//! This module contains the concurrency-critical components:
//! - `ledger` - Account registry: open, resolve, enqueue, final balances
//! - `transfer` - Deadlock-free two-account atomic transfers
//! - `dispatcher` - One worker per account, joined into a batch report
//! - `traits` - The `WorkerPool` seam the dispatcher runs on

pub mod dispatcher;
pub mod ledger;
pub mod traits;
pub mod transfer;

pub use dispatcher::{BatchReport, Dispatcher, Worker, WorkerRun};
pub use ledger::Ledger;
pub use traits::WorkerPool;
pub use transfer::{transfer, transfer_between};
