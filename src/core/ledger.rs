//! Account registry
//!
//! The `Ledger` owns every `Account` for its whole lifetime. It is populated
//! during loading (`open` / `enqueue` take `&mut self`) and is structurally
//! read-only while workers run, so concurrent `resolve` calls need no
//! synchronization beyond each account's own guard.

use crate::types::{Account, AccountId, Balance, LedgerError, Operation};
use std::collections::BTreeMap;

/// Mapping from account identifier to account
///
/// Backed by a `BTreeMap` so iteration (and therefore reporting) follows
/// ascending account order.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<AccountId, Account>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    /// Open a new account with an opening balance
    ///
    /// # Errors
    ///
    /// - `DuplicateAccount` if `id` is already open
    /// - `NegativeOpeningBalance` if `balance < 0`
    ///
    /// The ledger is unchanged on error.
    pub fn open(&mut self, id: AccountId, balance: Balance) -> Result<(), LedgerError> {
        if self.accounts.contains_key(&id) {
            return Err(LedgerError::duplicate_account(id));
        }
        if balance < 0 {
            return Err(LedgerError::negative_opening_balance(id, balance));
        }

        self.accounts.insert(id, Account::new(id, balance));
        Ok(())
    }

    /// Resolve an identifier to its account
    pub fn resolve(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .get(&id)
            .ok_or_else(|| LedgerError::unknown_account(id))
    }

    /// Queue an operation on its originating account
    ///
    /// Transfer destinations are resolved here, not at execution time: an
    /// absent destination rejects the operation with `UnknownDestination`.
    /// A rejected operation is never queued.
    pub fn enqueue(&mut self, id: AccountId, operation: Operation) -> Result<(), LedgerError> {
        if let Some(destination) = operation.destination() {
            if !self.accounts.contains_key(&destination) {
                if !self.accounts.contains_key(&id) {
                    return Err(LedgerError::unknown_account(id));
                }
                return Err(LedgerError::unknown_destination(id, destination));
            }
        }

        let account = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| LedgerError::unknown_account(id))?;
        account.push_pending(operation);
        Ok(())
    }

    /// Snapshot of every balance in ascending account order
    ///
    /// Meaningful as a final report only once no worker is running.
    pub fn final_balances(&self) -> Vec<(AccountId, Balance)> {
        self.accounts
            .iter()
            .map(|(id, account)| (*id, account.balance()))
            .collect()
    }

    /// Sum of all balances, widened so it cannot overflow
    pub fn total_balance(&self) -> i128 {
        self.accounts
            .values()
            .map(|account| i128::from(account.balance()))
            .sum()
    }

    /// Identifiers of accounts that have at least one queued operation
    pub fn accounts_with_pending(&self) -> Vec<AccountId> {
        self.accounts
            .values()
            .filter(|account| account.pending_len() > 0)
            .map(Account::id)
            .collect()
    }

    /// Number of operations queued on `id`
    pub fn pending_len(&self, id: AccountId) -> Result<usize, LedgerError> {
        Ok(self.resolve(id)?.pending_len())
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Amount;
    use rstest::rstest;

    fn amount(value: i64) -> Amount {
        Amount::new(value).unwrap()
    }

    fn ledger_with(accounts: &[(AccountId, Balance)]) -> Ledger {
        let mut ledger = Ledger::new();
        for (id, balance) in accounts {
            ledger.open(*id, *balance).unwrap();
        }
        ledger
    }

    #[test]
    fn test_new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.len(), 0);
        assert!(ledger.final_balances().is_empty());
    }

    #[test]
    fn test_open_inserts_account() {
        let ledger = ledger_with(&[(1, 100), (2, 50)]);

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.resolve(1).unwrap().balance(), 100);
        assert_eq!(ledger.resolve(2).unwrap().balance(), 50);
    }

    #[test]
    fn test_open_duplicate_account_fails_and_keeps_original() {
        let mut ledger = ledger_with(&[(1, 100)]);

        let result = ledger.open(1, 5);

        assert_eq!(result, Err(LedgerError::DuplicateAccount { account: 1 }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.resolve(1).unwrap().balance(), 100);
    }

    #[test]
    fn test_open_negative_balance_fails() {
        let mut ledger = Ledger::new();

        let result = ledger.open(1, -1);

        assert_eq!(
            result,
            Err(LedgerError::NegativeOpeningBalance {
                account: 1,
                balance: -1
            })
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_resolve_unknown_account_fails() {
        let ledger = ledger_with(&[(1, 100)]);

        assert!(matches!(
            ledger.resolve(2),
            Err(LedgerError::UnknownAccount { account: 2 })
        ));
    }

    #[rstest]
    #[case::credit(Operation::credit(amount(20)))]
    #[case::debit(Operation::debit(amount(30)))]
    #[case::transfer(Operation::transfer(amount(40), 2))]
    #[case::self_transfer(Operation::transfer(amount(40), 1))]
    fn test_enqueue_accepts_operation(#[case] operation: Operation) {
        let mut ledger = ledger_with(&[(1, 100), (2, 50)]);

        ledger.enqueue(1, operation).unwrap();

        assert_eq!(ledger.pending_len(1).unwrap(), 1);
        assert_eq!(ledger.pending_len(2).unwrap(), 0);
    }

    #[test]
    fn test_enqueue_unknown_account_fails() {
        let mut ledger = ledger_with(&[(1, 100)]);

        let result = ledger.enqueue(7, Operation::credit(amount(10)));

        assert_eq!(result, Err(LedgerError::UnknownAccount { account: 7 }));
        assert_eq!(ledger.pending_len(1).unwrap(), 0);
    }

    #[test]
    fn test_enqueue_unknown_destination_fails() {
        let mut ledger = ledger_with(&[(1, 100)]);

        let result = ledger.enqueue(1, Operation::transfer(amount(10), 99));

        assert_eq!(
            result,
            Err(LedgerError::UnknownDestination {
                account: 1,
                destination: 99
            })
        );
        assert_eq!(ledger.pending_len(1).unwrap(), 0);
        assert_eq!(ledger.final_balances(), vec![(1, 100)]);
    }

    #[test]
    fn test_enqueue_unknown_source_and_destination_reports_source() {
        let mut ledger = ledger_with(&[(1, 100)]);

        let result = ledger.enqueue(5, Operation::transfer(amount(10), 6));

        assert_eq!(result, Err(LedgerError::UnknownAccount { account: 5 }));
    }

    #[test]
    fn test_enqueue_rejection_does_not_affect_other_operations() {
        let mut ledger = ledger_with(&[(1, 100), (2, 0)]);

        ledger.enqueue(1, Operation::credit(amount(1))).unwrap();
        assert!(ledger
            .enqueue(1, Operation::transfer(amount(1), 3))
            .is_err());
        ledger.enqueue(1, Operation::transfer(amount(1), 2)).unwrap();

        assert_eq!(ledger.pending_len(1).unwrap(), 2);
        assert_eq!(ledger.accounts_with_pending(), vec![1]);
    }

    #[test]
    fn test_final_balances_are_ordered_by_id() {
        let ledger = ledger_with(&[(30, 3), (10, 1), (20, 2)]);

        assert_eq!(ledger.final_balances(), vec![(10, 1), (20, 2), (30, 3)]);
        assert_eq!(ledger.total_balance(), 6);
    }
}
