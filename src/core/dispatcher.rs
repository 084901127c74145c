//! Batch dispatch with one worker per account
//!
//! The `Dispatcher` owns the loaded `Ledger`, hands it to a `WorkerPool`
//! which starts exactly one worker per account with queued operations, and
//! collects a `BatchReport` once every worker has been joined.
//!
//! # Ordering
//!
//! - Each account's operations are applied in enqueue order by its single
//!   worker.
//! - Operations on different accounts interleave freely.
//! - Transfers are atomic with respect to every other operation touching
//!   either account (see [`transfer`](super::transfer)).

use super::traits::WorkerPool;
use super::transfer::transfer;
use super::Ledger;
use crate::types::{Account, AccountId, Balance, LedgerError, Operation, OperationResult, Outcome};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Results produced by one worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerRun {
    /// The account the worker was bound to
    pub account: AccountId,

    /// Outcome of every operation, in execution order
    pub results: Vec<OperationResult>,
}

/// Sequential consumer of a single account's pending queue
///
/// A worker borrows the ledger for resolving transfer destinations and pops
/// operations from its own account only.
#[derive(Debug)]
pub struct Worker<'a> {
    ledger: &'a Ledger,
    account: &'a Account,
    results: Vec<OperationResult>,
}

impl<'a> Worker<'a> {
    /// Bind a worker to account `id`
    ///
    /// Only started from within [`Dispatcher::run`].
    pub(crate) fn new(ledger: &'a Ledger, id: AccountId) -> Result<Self, LedgerError> {
        let account = ledger.resolve(id)?;
        Ok(Self {
            ledger,
            account,
            results: Vec::with_capacity(account.pending_len()),
        })
    }

    /// Apply the next pending operation
    ///
    /// Returns `Ok(false)` once the queue is exhausted. No guard is held
    /// when this returns.
    pub fn step(&mut self) -> Result<bool, LedgerError> {
        let Some(operation) = self.account.pop_pending() else {
            return Ok(false);
        };

        let outcome = self.apply(operation)?;
        if !outcome.is_applied() {
            info!(
                account = self.account.id(),
                kind = %operation.kind(),
                amount = %operation.amount(),
                reason = %outcome,
                "operation refused"
            );
        }

        self.results.push(OperationResult {
            account: self.account.id(),
            seq: self.results.len(),
            operation,
            outcome,
        });
        Ok(true)
    }

    /// Drain the whole queue
    pub fn run_to_completion(mut self) -> Result<WorkerRun, LedgerError> {
        while self.step()? {}
        Ok(self.finish())
    }

    pub fn finish(self) -> WorkerRun {
        debug!(
            account = self.account.id(),
            operations = self.results.len(),
            "worker finished"
        );
        WorkerRun {
            account: self.account.id(),
            results: self.results,
        }
    }

    fn apply(&self, operation: Operation) -> Result<Outcome, LedgerError> {
        let outcome = match operation {
            Operation::Credit { amount } => self.account.credit(amount),
            Operation::Debit { amount } => self.account.debit(amount),
            Operation::Transfer {
                amount,
                destination,
            } => {
                let to = self
                    .ledger
                    .resolve(destination)
                    .map_err(|_| LedgerError::unknown_destination(self.account.id(), destination))?;
                transfer(self.account, to, amount)
            }
        };
        Ok(outcome)
    }
}

/// Per-operation outcomes and final balances of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcomes per originating account, each in execution order
    pub results: BTreeMap<AccountId, Vec<OperationResult>>,

    /// Balances after every worker terminated, ascending by account
    pub balances: Vec<(AccountId, Balance)>,
}

impl BatchReport {
    /// Outcomes recorded for `account` (empty if it had no operations)
    pub fn results_for(&self, account: AccountId) -> &[OperationResult] {
        self.results
            .get(&account)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn balance_of(&self, account: AccountId) -> Option<Balance> {
        self.balances
            .iter()
            .find(|(id, _)| *id == account)
            .map(|(_, balance)| *balance)
    }

    pub fn total_operations(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }

    pub fn applied_count(&self) -> usize {
        self.iter().filter(|result| result.outcome.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.total_operations() - self.applied_count()
    }

    /// Every result, grouped by ascending account
    pub fn iter(&self) -> impl Iterator<Item = &OperationResult> + '_ {
        self.results.values().flatten()
    }
}

/// Runs a loaded ledger's queued operations on a worker pool
pub struct Dispatcher {
    ledger: Arc<Ledger>,
    pool: Box<dyn WorkerPool>,
}

impl Dispatcher {
    /// Take ownership of a loaded ledger
    ///
    /// No further `open` / `enqueue` is possible until
    /// [`into_ledger`](Self::into_ledger) hands it back.
    pub fn new(ledger: Ledger, pool: Box<dyn WorkerPool>) -> Self {
        Self {
            ledger: Arc::new(ledger),
            pool,
        }
    }

    /// Apply every queued operation and wait for all workers
    ///
    /// Starts one worker per account with at least one pending operation.
    /// The returned report is only built after every worker has terminated,
    /// so its balances are final. Exclusive access means every account
    /// queue has exactly one consumer.
    pub fn run(&mut self) -> Result<BatchReport, LedgerError> {
        let accounts = self.ledger.accounts_with_pending();
        info!(
            pool = self.pool.name(),
            workers = accounts.len(),
            "dispatching batch"
        );

        let runs = if accounts.is_empty() {
            Vec::new()
        } else {
            self.pool.execute(Arc::clone(&self.ledger), accounts)?
        };

        let results: BTreeMap<_, _> = runs
            .into_iter()
            .map(|run| (run.account, run.results))
            .collect();
        let report = BatchReport {
            results,
            balances: self.ledger.final_balances(),
        };

        info!(
            operations = report.total_operations(),
            applied = report.applied_count(),
            rejected = report.rejected_count(),
            "batch complete"
        );
        Ok(report)
    }

    /// Balances in ascending account order
    pub fn final_balances(&self) -> Vec<(AccountId, Balance)> {
        self.ledger.final_balances()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Hand the ledger back once no worker holds a reference to it
    ///
    /// Returns `None` only if a detached worker outlived `run`, which the
    /// provided pools never allow.
    pub fn into_ledger(self) -> Option<Ledger> {
        Arc::into_inner(self.ledger)
    }
}
