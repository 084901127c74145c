//! Error types for the ledger engine
//!
//! This module defines all error types that can occur while loading a ledger
//! and running a batch. Errors are designed to be descriptive and
//! user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Structural Errors**: duplicate or unknown accounts, raised synchronously
//!   by `open` / `enqueue`
//! - **Input Errors**: file not found, malformed CSV rows, invalid amounts
//! - **Execution Errors**: runtime construction failures and worker panics
//!
//! Insufficient funds is *not* an error: it is an `Outcome` recorded per
//! operation in the batch report.

use super::account::{AccountId, Balance};
use thiserror::Error;

/// Main error type for the ledger engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// An account with this identifier is already open
    ///
    /// Raised by `open`; the ledger is unchanged.
    #[error("Account {account} already exists")]
    DuplicateAccount {
        /// The duplicated account ID
        account: AccountId,
    },

    /// The originating account of an operation is not in the ledger
    ///
    /// Raised by `enqueue` and `resolve`; only this operation is rejected.
    #[error("Unknown account {account}")]
    UnknownAccount {
        /// The unresolved account ID
        account: AccountId,
    },

    /// The destination of a transfer is not in the ledger at enqueue time
    #[error("Unknown destination account {destination} for transfer from account {account}")]
    UnknownDestination {
        /// The originating account
        account: AccountId,
        /// The unresolved destination account
        destination: AccountId,
    },

    /// A negative opening balance was supplied
    #[error("Account {account} cannot open with negative balance {balance}")]
    NegativeOpeningBalance {
        /// The account being opened
        account: AccountId,
        /// The refused opening balance
        balance: Balance,
    },

    /// Amount is zero, negative or malformed
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The invalid amount as written
        amount: String,
    },

    /// Amount field is missing for an operation row
    #[error("{op_type} operation for account {account} requires an amount")]
    MissingAmount {
        /// Operation type that requires an amount
        op_type: String,
        /// Originating account
        account: AccountId,
    },

    /// Transfer row without a destination column
    #[error("transfer from account {account} requires a destination")]
    MissingDestination {
        /// Originating account
        account: AccountId,
    },

    /// Unrecognised operation verb
    #[error("Invalid operation type '{op_type}'")]
    InvalidOperationType {
        /// The verb as written
        op_type: String,
    },

    /// File not found at the specified path
    ///
    /// This is a fatal error that prevents loading from starting.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed row is skipped
    /// and loading continues with the next row.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The async worker runtime could not be built
    #[error("Runtime error: {message}")]
    RuntimeError {
        /// Description of the failure
        message: String,
    },

    /// A worker panicked while draining an account's queue
    #[error("Worker for account {account} panicked")]
    WorkerPanicked {
        /// The account the worker was bound to
        account: AccountId,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    pub fn duplicate_account(account: AccountId) -> Self {
        LedgerError::DuplicateAccount { account }
    }

    pub fn unknown_account(account: AccountId) -> Self {
        LedgerError::UnknownAccount { account }
    }

    pub fn unknown_destination(account: AccountId, destination: AccountId) -> Self {
        LedgerError::UnknownDestination {
            account,
            destination,
        }
    }

    pub fn negative_opening_balance(account: AccountId, balance: Balance) -> Self {
        LedgerError::NegativeOpeningBalance { account, balance }
    }

    pub fn invalid_amount(amount: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    pub fn missing_amount(op_type: &str, account: AccountId) -> Self {
        LedgerError::MissingAmount {
            op_type: op_type.to_string(),
            account,
        }
    }

    pub fn missing_destination(account: AccountId) -> Self {
        LedgerError::MissingDestination { account }
    }

    pub fn invalid_operation_type(op_type: &str) -> Self {
        LedgerError::InvalidOperationType {
            op_type: op_type.to_string(),
        }
    }

    pub fn runtime(message: impl std::fmt::Display) -> Self {
        LedgerError::RuntimeError {
            message: message.to_string(),
        }
    }

    pub fn worker_panicked(account: AccountId) -> Self {
        LedgerError::WorkerPanicked { account }
    }

    /// Whether loading may continue past this error
    ///
    /// Row-level problems and structural rejections only drop the offending
    /// row; everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            LedgerError::FileNotFound { .. }
                | LedgerError::IoError { .. }
                | LedgerError::RuntimeError { .. }
                | LedgerError::WorkerPanicked { .. }
        )
    }
}
