//! Concurrent Ledger Engine Library
//! # Overview
//!
//! This library applies a batch of queued operations to a fixed set of
//! accounts, running one worker per account in parallel while keeping every
//! account's final balance equal to the sequential effect of its own queue.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Operation, Outcome, errors)
//! - [`core`] - The concurrency-critical components:
//!   - [`core::ledger`] - Account registry (open, resolve, enqueue)
//!   - [`core::transfer`] - Deadlock-free two-account atomic transfers
//!   - [`core::dispatcher`] - One worker per account, joined into a report
//! - [`strategy`] - Worker pools: OS threads or tokio tasks
//! - [`io`] - CSV loader and reporter
//! - [`cli`] - CLI arguments parsing
//!
//! # Operation Types
//!
//! - **Credit**: Add funds to the originating account
//! - **Debit**: Remove funds if covered; refused otherwise, never clamped
//! - **Transfer**: Atomically move funds to another account
//!
//! # Concurrency Guarantees
//!
//! - Per-account FIFO: an account's operations apply in enqueue order
//! - Transfer atomicity: no observer sees one side of a transfer applied
//! - Deadlock freedom: transfer guards are always taken in ascending
//!   account order
//! - No negative balances: debits and transfers that would overdraw are
//!   recorded as `InsufficientFunds`

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod strategy;
pub mod types;

pub use core::{BatchReport, Dispatcher, Ledger, WorkerPool};
pub use io::{write_balances_csv, write_outcomes_csv};
pub use types::{
    Account, AccountId, Amount, Balance, LedgerError, Operation, OperationResult, OperationType,
    Outcome,
};
