//! Operation-related types for the ledger engine
//!
//! This module defines the queued operations, the strictly positive `Amount`
//! they carry, and the per-operation `Outcome` recorded in the batch report.

use super::account::{AccountId, Balance};
use super::error::LedgerError;
use std::fmt;
use std::str::FromStr;

/// A strictly positive amount in integer currency units
///
/// The only way to obtain an `Amount` is through [`Amount::new`] (or
/// `TryFrom<i64>`), so every operation carries a valid amount by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Balance);

impl Amount {
    /// Create an amount, refusing zero and negative values
    pub fn new(value: Balance) -> Result<Self, LedgerError> {
        if value <= 0 {
            return Err(LedgerError::invalid_amount(&value.to_string()));
        }
        Ok(Amount(value))
    }

    pub fn get(self) -> Balance {
        self.0
    }
}

impl TryFrom<Balance> for Amount {
    type Error = LedgerError;

    fn try_from(value: Balance) -> Result<Self, Self::Error> {
        Amount::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kinds of operation an account can queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    /// Add funds to the originating account
    Credit,

    /// Remove funds from the originating account if covered
    Debit,

    /// Move funds from the originating account to another account atomically
    Transfer,
}

impl OperationType {
    pub fn as_str(self) -> &'static str {
        match self {
            OperationType::Credit => "credit",
            OperationType::Debit => "debit",
            OperationType::Transfer => "transfer",
        }
    }
}

impl FromStr for OperationType {
    type Err = LedgerError;

    /// Parse an operation verb, accepting the `deposit` / `withdraw` aliases
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "credit" | "deposit" => Ok(OperationType::Credit),
            "debit" | "withdraw" | "withdrawal" => Ok(OperationType::Debit),
            "transfer" => Ok(OperationType::Transfer),
            other => Err(LedgerError::invalid_operation_type(other)),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued operation
///
/// The originating account is the account whose queue holds the operation;
/// it never changes after enqueue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Credit { amount: Amount },
    Debit { amount: Amount },
    Transfer { amount: Amount, destination: AccountId },
}

impl Operation {
    pub fn credit(amount: Amount) -> Self {
        Operation::Credit { amount }
    }

    pub fn debit(amount: Amount) -> Self {
        Operation::Debit { amount }
    }

    pub fn transfer(amount: Amount, destination: AccountId) -> Self {
        Operation::Transfer {
            amount,
            destination,
        }
    }

    pub fn kind(&self) -> OperationType {
        match self {
            Operation::Credit { .. } => OperationType::Credit,
            Operation::Debit { .. } => OperationType::Debit,
            Operation::Transfer { .. } => OperationType::Transfer,
        }
    }

    pub fn amount(&self) -> Amount {
        match *self {
            Operation::Credit { amount }
            | Operation::Debit { amount }
            | Operation::Transfer { amount, .. } => amount,
        }
    }

    /// Destination account for transfers, `None` otherwise
    pub fn destination(&self) -> Option<AccountId> {
        match *self {
            Operation::Transfer { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Value-level result of applying one operation
///
/// Refusals are ordinary values collected into the batch report; they never
/// abort the worker or any other operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The operation's effect was fully applied
    Applied,

    /// The debited account could not cover the amount; nothing was mutated
    InsufficientFunds { balance: Balance, requested: Amount },

    /// Crediting `account` would overflow its balance; nothing was mutated
    BalanceOverflow { account: AccountId },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Applied => "applied",
            Outcome::InsufficientFunds { .. } => "insufficient_funds",
            Outcome::BalanceOverflow { .. } => "balance_overflow",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => f.write_str("applied"),
            Outcome::InsufficientFunds { balance, requested } => write!(
                f,
                "insufficient funds: balance {}, requested {}",
                balance, requested
            ),
            Outcome::BalanceOverflow { account } => {
                write!(f, "balance overflow on account {}", account)
            }
        }
    }
}

/// Result of executing a single queued operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    /// The originating account
    pub account: AccountId,

    /// Position of the operation in the account's execution order (0-based)
    pub seq: usize,

    /// The operation that was executed
    pub operation: Operation,

    /// What happened
    pub outcome: Outcome,
}
