//! End-to-end batch pipeline
//!
//! Loader → Ledger → Dispatcher → Reporter, wired the same way for every
//! worker pool:
//! 1. Load accounts and operations from CSV (bad rows skipped)
//! 2. Hand the ledger to a `Dispatcher` running on the chosen pool
//! 3. Wait for every worker, then write final balances as CSV
//!
//! Only unreadable inputs, runtime failures and worker panics are returned
//! as errors; refused operations are part of the returned report.

use crate::core::{BatchReport, Dispatcher, WorkerPool};
use crate::io::{load_ledger, write_balances_csv};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Run one batch from input files and write final balances to `output`
pub fn process(
    accounts_path: &Path,
    operations_path: &Path,
    pool: Box<dyn WorkerPool>,
    output: &mut dyn Write,
) -> Result<BatchReport, LedgerError> {
    let summary = load_ledger(accounts_path, operations_path)?;

    let mut dispatcher = Dispatcher::new(summary.ledger, pool);
    let report = dispatcher.run()?;

    write_balances_csv(&report.balances, output)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::ThreadPool;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_process_writes_final_balances() {
        let accounts = create_temp_csv("account,balance\n1,100\n2,50\n");
        let operations = create_temp_csv(
            "type,account,amount,destination\ncredit,1,20,\ndebit,1,30,\ntransfer,1,40,2\n",
        );
        let mut output = Vec::new();

        let report = process(
            accounts.path(),
            operations.path(),
            Box::new(ThreadPool),
            &mut output,
        )
        .unwrap();

        assert_eq!(report.applied_count(), 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,balance\n1,50\n2,90\n"
        );
    }

    #[test]
    fn test_process_missing_accounts_file() {
        let operations = create_temp_csv("type,account,amount,destination\n");
        let mut output = Vec::new();

        let result = process(
            Path::new("nonexistent.csv"),
            operations.path(),
            Box::new(ThreadPool),
            &mut output,
        );

        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
        assert!(output.is_empty());
    }
}
