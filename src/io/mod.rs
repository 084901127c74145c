//! I/O module
//!
//! The Loader and Reporter collaborators around the ledger core.
//!
//! # Components
//!
//! - `csv_format` - CSV row types, operation conversion, output serialization
//! - `reader` - Synchronous CSV reader with iterator interface
//! - `loader` - Builds a `Ledger` from account and operation files

pub mod csv_format;
pub mod loader;
pub mod reader;

pub use csv_format::{
    convert_operation_record, write_balances_csv, write_outcomes_csv, AccountRecord,
    OperationRecord,
};
pub use loader::{load_from_readers, load_ledger, LoadSummary};
pub use reader::CsvRowReader;
