//! Worker pool strategies for the dispatcher
//!
//! This module provides the concrete `WorkerPool` implementations the
//! Dispatcher can run on, selected at runtime:
//!
//! - **threads**: one dedicated OS thread per account
//! - **async**: one tokio task per account on a multi-threaded runtime

use crate::cli::StrategyType;
use crate::core::WorkerPool;

pub mod r#async;
pub mod threaded;

pub use self::r#async::{AsyncPool, DispatchConfig};
pub use threaded::ThreadPool;

/// Create a worker pool based on the specified strategy type
///
/// `config` only affects the async pool; the thread pool always starts
/// exactly one thread per account.
pub fn create_pool(strategy_type: StrategyType, config: DispatchConfig) -> Box<dyn WorkerPool> {
    match strategy_type {
        StrategyType::Threads => Box::new(ThreadPool),
        StrategyType::Async => Box::new(AsyncPool::new(config)),
    }
}
