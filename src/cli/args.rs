use crate::strategy::DispatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Apply queued credits, debits and transfers to a set of accounts in parallel
#[derive(Parser, Debug)]
#[command(name = "ledger-engine")]
#[command(about = "Apply queued ledger operations with one worker per account", long_about = None)]
pub struct CliArgs {
    /// Accounts CSV (`account,balance`)
    #[arg(value_name = "ACCOUNTS", help = "Path to the accounts CSV file")]
    pub accounts_file: PathBuf,

    /// Operations CSV (`type,account,amount,destination`)
    #[arg(value_name = "OPERATIONS", help = "Path to the operations CSV file")]
    pub operations_file: PathBuf,

    /// Worker pool to run accounts on
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "threads",
        help = "Worker pool: 'threads' for one OS thread per account or 'async' for tokio tasks"
    )]
    pub strategy: StrategyType,

    /// Runtime worker threads (async strategy only)
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Runtime worker threads for the async strategy (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Optional path for the per-operation outcome report
    #[arg(
        long = "outcomes",
        value_name = "PATH",
        help = "Also write per-operation outcomes as CSV to this path"
    )]
    pub outcomes_file: Option<PathBuf>,
}

/// Available worker pools
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Threads,
    Async,
}

impl CliArgs {
    /// Create a DispatchConfig from CLI arguments
    ///
    /// Falls back to the default thread count when none (or zero) is given.
    pub fn to_dispatch_config(&self) -> DispatchConfig {
        match self.worker_threads {
            Some(count) => DispatchConfig::new(count),
            None => DispatchConfig::default(),
        }
    }
}
