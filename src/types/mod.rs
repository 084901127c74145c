//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account identifiers, balances and the guarded `Account`
//! - `operation`: Queued operations, amounts and per-operation outcomes
//! - `error`: Error types for the ledger engine

pub mod account;
pub mod error;
pub mod operation;

pub use account::{Account, AccountId, Balance};
pub use error::LedgerError;
pub use operation::{Amount, Operation, OperationResult, OperationType, Outcome};
