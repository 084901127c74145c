//! CSV format handling for loader input and reporter output
//!
//! This module centralizes all CSV format concerns, providing:
//! - `AccountRecord` / `OperationRecord` structures for deserialization
//! - Conversion from operation records to domain `Operation`s
//! - Balance and per-operation outcome serialization
//!
//! Conversion functions are pure (no I/O) for easy testing.

use crate::core::BatchReport;
use crate::types::{AccountId, Amount, Balance, LedgerError, Operation, OperationType};
use serde::Deserialize;
use std::io::Write;

/// Opening balance row: `account,balance`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub account: AccountId,
    pub balance: Balance,
}

/// Operation row: `type,account,amount,destination`
///
/// `amount` is kept as text so malformed values surface as `InvalidAmount`
/// rather than a generic parse error. `destination` may be empty or absent
/// for credits and debits.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    #[serde(rename = "type")]
    pub op_type: String,
    pub account: AccountId,
    pub amount: Option<String>,
    pub destination: Option<AccountId>,
}

/// Convert an `OperationRecord` into its originating account and `Operation`
///
/// Validates that:
/// - the verb is one of `credit`/`deposit`, `debit`/`withdraw`/`withdrawal`,
///   or `transfer`
/// - an amount is present, an integer, and strictly positive
/// - transfers name a destination
pub fn convert_operation_record(
    record: OperationRecord,
) -> Result<(AccountId, Operation), LedgerError> {
    let op_type: OperationType = record.op_type.parse()?;

    let amount = match record.amount.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text
            .parse::<Balance>()
            .map_err(|_| LedgerError::invalid_amount(text))
            .and_then(Amount::new)?,
        _ => return Err(LedgerError::missing_amount(op_type.as_str(), record.account)),
    };

    let operation = match op_type {
        OperationType::Credit => Operation::credit(amount),
        OperationType::Debit => Operation::debit(amount),
        OperationType::Transfer => {
            let destination = record
                .destination
                .ok_or_else(|| LedgerError::missing_destination(record.account))?;
            Operation::transfer(amount, destination)
        }
    };

    Ok((record.account, operation))
}

/// Write final balances to CSV format
///
/// Writes rows with columns `account,balance`, sorted by account ID for
/// deterministic output.
pub fn write_balances_csv(
    balances: &[(AccountId, Balance)],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "balance"])?;

    let mut sorted = balances.to_vec();
    sorted.sort_by_key(|(account, _)| *account);

    for (account, balance) in sorted {
        writer.write_record(&[account.to_string(), balance.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Write every per-operation outcome of a batch to CSV format
///
/// Columns: `account,seq,type,amount,destination,outcome`. Rows are grouped
/// by ascending account and follow each account's execution order.
pub fn write_outcomes_csv(report: &BatchReport, output: &mut dyn Write) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(["account", "seq", "type", "amount", "destination", "outcome"])?;

    for result in report.iter() {
        writer.write_record(&[
            result.account.to_string(),
            result.seq.to_string(),
            result.operation.kind().to_string(),
            result.operation.amount().to_string(),
            result
                .operation
                .destination()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            result.outcome.as_str().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
