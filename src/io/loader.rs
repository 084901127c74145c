//! Ledger loader
//!
//! Builds a `Ledger` from two CSV sources: an accounts file
//! (`account,balance`) and an operations file
//! (`type,account,amount,destination`). Only failing to open a source is
//! fatal; every malformed or rejected row is logged and skipped so the rest
//! of the batch still loads.

use crate::core::Ledger;
use crate::io::csv_format::{convert_operation_record, AccountRecord, OperationRecord};
use crate::io::reader::CsvRowReader;
use crate::types::LedgerError;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// A loaded ledger and what happened while loading it
#[derive(Debug)]
pub struct LoadSummary {
    pub ledger: Ledger,
    pub accounts_opened: usize,
    pub operations_enqueued: usize,
    /// Rows skipped across both files
    pub rows_rejected: usize,
}

/// Load accounts and operations from CSV files
pub fn load_ledger(accounts_path: &Path, operations_path: &Path) -> Result<LoadSummary, LedgerError> {
    let accounts = CsvRowReader::<_, AccountRecord>::from_path(accounts_path)?;
    let operations = CsvRowReader::<_, OperationRecord>::from_path(operations_path)?;
    Ok(load(accounts, operations))
}

/// Load accounts and operations from in-memory or streamed CSV text
pub fn load_from_readers<A: Read, O: Read>(accounts: A, operations: O) -> LoadSummary {
    load(
        CsvRowReader::from_reader(accounts),
        CsvRowReader::from_reader(operations),
    )
}

fn load<A: Read, O: Read>(
    accounts: CsvRowReader<A, AccountRecord>,
    operations: CsvRowReader<O, OperationRecord>,
) -> LoadSummary {
    let mut ledger = Ledger::new();
    let mut accounts_opened = 0;
    let mut operations_enqueued = 0;
    let mut rows_rejected = 0;

    // All accounts must exist before any operation is enqueued, so that
    // transfer destinations resolve regardless of row order.
    for row in accounts {
        let opened = row.and_then(|record| ledger.open(record.account, record.balance));
        match opened {
            Ok(()) => accounts_opened += 1,
            Err(e) => {
                warn!(error = %e, "skipping account row");
                rows_rejected += 1;
            }
        }
    }

    for row in operations {
        let enqueued = row
            .and_then(convert_operation_record)
            .and_then(|(account, operation)| ledger.enqueue(account, operation));
        match enqueued {
            Ok(()) => operations_enqueued += 1,
            Err(e) => {
                warn!(error = %e, "skipping operation row");
                rows_rejected += 1;
            }
        }
    }

    info!(
        accounts = accounts_opened,
        operations = operations_enqueued,
        rejected = rows_rejected,
        "ledger loaded"
    );

    LoadSummary {
        ledger,
        accounts_opened,
        operations_enqueued,
        rows_rejected,
    }
}
