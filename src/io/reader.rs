//! Synchronous CSV row reader with iterator interface
//!
//! Provides a streaming iterator over typed rows of a CSV file. The reader
//! is configured to:
//! - Trim whitespace from all fields
//! - Allow flexible field counts (trailing optional columns may be omitted)
//! - Use an 8KB buffer for efficient I/O
//!
//! Individual row errors are yielded as `Err` items carrying the 1-based
//! line number (the header is line 1), so callers can skip and continue.

use crate::types::LedgerError;
use csv::{DeserializeRecordsIntoIter, ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Streaming CSV reader yielding one typed row at a time
pub struct CsvRowReader<R: Read, T: DeserializeOwned> {
    rows: DeserializeRecordsIntoIter<R, T>,
    line_num: u64,
}

impl<T: DeserializeOwned> CsvRowReader<File, T> {
    /// Open a CSV file for reading
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `IoError` for any other
    /// failure to open it.
    pub fn from_path(path: &Path) -> Result<Self, LedgerError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LedgerError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => LedgerError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), e),
            },
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read, T: DeserializeOwned> CsvRowReader<R, T> {
    /// Wrap any reader producing CSV text with a header row
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            rows: reader.into_deserialize(),
            line_num: 1,
        }
    }

    /// Line number of the most recently yielded row
    pub fn line(&self) -> u64 {
        self.line_num
    }
}

impl<R: Read, T: DeserializeOwned> Iterator for CsvRowReader<R, T> {
    type Item = Result<T, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.next()?;
        self.line_num += 1;
        let line = self.line_num;

        Some(row.map_err(|e| LedgerError::ParseError {
            line: Some(e.position().map(|pos| pos.line()).unwrap_or(line)),
            message: e.to_string(),
        }))
    }
}
