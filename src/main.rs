//! Ledger Engine CLI
//!
//! Command-line interface for applying a batch of ledger operations.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv operations.csv > balances.csv
//! cargo run -- --strategy async --worker-threads 4 accounts.csv operations.csv
//! cargo run -- --outcomes outcomes.csv accounts.csv operations.csv
//! ```
//!
//! Final balances are written to stdout as CSV. Diagnostics go to stderr
//! through `tracing`; set `RUST_LOG=info` (or `debug`) for more detail.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, unreadable input, worker failure, etc.)

use ledger_engine::cli;
use ledger_engine::pipeline;
use ledger_engine::strategy;
use ledger_engine::{write_outcomes_csv, LedgerError};
use std::fs::File;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();
    let pool = strategy::create_pool(args.strategy, args.to_dispatch_config());

    let mut output = std::io::stdout().lock();
    let report = match pipeline::process(
        &args.accounts_file,
        &args.operations_file,
        pool,
        &mut output,
    ) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if let Some(path) = &args.outcomes_file {
        let written = File::create(path)
            .map_err(LedgerError::from)
            .and_then(|mut file| write_outcomes_csv(&report, &mut file));
        if let Err(e) = written {
            eprintln!("Error: failed to write outcomes to '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}
