//! Account-related types for the ledger engine
//!
//! An `Account` owns its balance behind an exclusive guard together with the
//! FIFO of operations that originate from it.

use super::operation::{Amount, Operation, Outcome};
use parking_lot::{Mutex, MutexGuard};
use std::collections::VecDeque;
use tracing::debug;

/// Account identifier
///
/// The numeric order of identifiers is the global lock order used by transfers.
pub type AccountId = u32;

/// Signed balance in integer currency units
pub type Balance = i64;

/// A single ledger account
///
/// The balance is only ever read or written while `guard` is held. The
/// pending queue is filled during loading (through `&mut self`, no locking)
/// and drained by exactly one worker during dispatch.
#[derive(Debug)]
pub struct Account {
    /// Immutable identifier
    id: AccountId,

    /// Exclusive-access guard wrapping the balance
    guard: Mutex<Balance>,

    /// Operations originating from this account, in enqueue order
    pending: Mutex<VecDeque<Operation>>,
}

impl Account {
    /// Create an account with the given opening balance and an empty queue
    pub fn new(id: AccountId, opening_balance: Balance) -> Self {
        Account {
            id,
            guard: Mutex::new(opening_balance),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Read the current balance under the guard
    pub fn balance(&self) -> Balance {
        *self.guard.lock()
    }

    /// Add `amount` to the balance
    ///
    /// Refused with `Outcome::BalanceOverflow` if the result does not fit a
    /// `Balance`; the balance is unchanged in that case.
    pub fn credit(&self, amount: Amount) -> Outcome {
        let mut balance = self.lock();
        match balance.checked_add(amount.get()) {
            Some(updated) => {
                *balance = updated;
                debug!(account = self.id, %amount, balance = updated, "credit applied");
                Outcome::Applied
            }
            None => Outcome::BalanceOverflow { account: self.id },
        }
    }

    /// Subtract `amount` from the balance if it is covered
    ///
    /// Debits are refused rather than clamped: an uncovered debit leaves the
    /// balance untouched and reports `Outcome::InsufficientFunds`.
    pub fn debit(&self, amount: Amount) -> Outcome {
        let mut balance = self.lock();
        if *balance < amount.get() {
            return Outcome::InsufficientFunds {
                balance: *balance,
                requested: amount,
            };
        }
        *balance -= amount.get();
        debug!(account = self.id, %amount, balance = *balance, "debit applied");
        Outcome::Applied
    }

    /// Acquire the balance guard
    ///
    /// Blocks until the guard is available. Callers holding more than one
    /// account guard must acquire them in ascending `AccountId` order.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Balance> {
        self.guard.lock()
    }

    /// Append an operation to the pending queue (load phase only)
    pub(crate) fn push_pending(&mut self, operation: Operation) {
        self.pending.get_mut().push_back(operation);
    }

    /// Pop the oldest pending operation
    pub(crate) fn pop_pending(&self) -> Option<Operation> {
        self.pending.lock().pop_front()
    }

    /// Number of operations still waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }
}
