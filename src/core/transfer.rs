//! Two-account atomic transfers
//!
//! A transfer holds the guards of both participating accounts at once. To
//! rule out circular waits, every transfer acquires the two guards in the
//! same global order: ascending `AccountId`. Two transfers sharing an account
//! therefore always contend on the lower-id guard first, and neither can hold
//! one guard while waiting on a guard the other already owns.
//!
//! Balances are re-checked only after both guards are held, so the decision
//! and the mutation happen in one critical section: either both sides move or
//! neither does.

use super::Ledger;
use crate::types::{Account, AccountId, Amount, LedgerError, Outcome};
use tracing::debug;

/// Move `amount` from `source` to `destination` as one atomic step
///
/// A self-transfer takes the single guard once, validates the amount against
/// the balance and changes nothing.
pub fn transfer(source: &Account, destination: &Account, amount: Amount) -> Outcome {
    if source.id() == destination.id() {
        return self_transfer(source, amount);
    }

    let source_first = source.id() < destination.id();
    let (first, second) = if source_first {
        (source, destination)
    } else {
        (destination, source)
    };

    // Guards drop in reverse declaration order: second, then first.
    let mut first_guard = first.lock();
    let mut second_guard = second.lock();

    let (source_balance, destination_balance) = if source_first {
        (&mut *first_guard, &mut *second_guard)
    } else {
        (&mut *second_guard, &mut *first_guard)
    };

    if *source_balance < amount.get() {
        return Outcome::InsufficientFunds {
            balance: *source_balance,
            requested: amount,
        };
    }

    let Some(credited) = destination_balance.checked_add(amount.get()) else {
        return Outcome::BalanceOverflow {
            account: destination.id(),
        };
    };

    *source_balance -= amount.get();
    *destination_balance = credited;

    debug!(
        source = source.id(),
        destination = destination.id(),
        %amount,
        source_balance = *source_balance,
        destination_balance = *destination_balance,
        "transfer applied"
    );
    Outcome::Applied
}

/// Resolve both identifiers through the ledger, then [`transfer`]
pub fn transfer_between(
    ledger: &Ledger,
    source: AccountId,
    destination: AccountId,
    amount: Amount,
) -> Result<Outcome, LedgerError> {
    let from = ledger.resolve(source)?;
    let to = ledger
        .resolve(destination)
        .map_err(|_| LedgerError::unknown_destination(source, destination))?;
    Ok(transfer(from, to, amount))
}

fn self_transfer(account: &Account, amount: Amount) -> Outcome {
    let balance = account.lock();
    if *balance < amount.get() {
        return Outcome::InsufficientFunds {
            balance: *balance,
            requested: amount,
        };
    }
    Outcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Balance;
    use std::sync::Arc;
    use std::thread;

    fn amount(value: i64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_transfer_moves_funds() {
        let a = Account::new(1, 100);
        let b = Account::new(2, 50);

        assert_eq!(transfer(&a, &b, amount(40)), Outcome::Applied);
        assert_eq!(a.balance(), 60);
        assert_eq!(b.balance(), 90);
    }

    #[test]
    fn test_transfer_from_higher_to_lower_id() {
        let a = Account::new(1, 0);
        let b = Account::new(2, 50);

        assert_eq!(transfer(&b, &a, amount(50)), Outcome::Applied);
        assert_eq!(a.balance(), 50);
        assert_eq!(b.balance(), 0);
    }

    #[test]
    fn test_transfer_insufficient_funds_mutates_nothing() {
        let a = Account::new(1, 10);
        let b = Account::new(2, 50);

        assert_eq!(
            transfer(&a, &b, amount(11)),
            Outcome::InsufficientFunds {
                balance: 10,
                requested: amount(11)
            }
        );
        assert_eq!(a.balance(), 10);
        assert_eq!(b.balance(), 50);
    }

    #[test]
    fn test_transfer_destination_overflow_mutates_nothing() {
        let a = Account::new(1, 100);
        let b = Account::new(2, Balance::MAX);

        assert_eq!(
            transfer(&a, &b, amount(1)),
            Outcome::BalanceOverflow { account: 2 }
        );
        assert_eq!(a.balance(), 100);
        assert_eq!(b.balance(), Balance::MAX);
    }

    #[test]
    fn test_self_transfer_is_a_no_op() {
        let a = Account::new(1, 100);

        assert_eq!(transfer(&a, &a, amount(100)), Outcome::Applied);
        assert_eq!(a.balance(), 100);
    }

    #[test]
    fn test_self_transfer_still_validates_amount() {
        let a = Account::new(1, 100);

        assert_eq!(
            transfer(&a, &a, amount(101)),
            Outcome::InsufficientFunds {
                balance: 100,
                requested: amount(101)
            }
        );
        assert_eq!(a.balance(), 100);
    }

    #[test]
    fn test_transfer_between_resolves_accounts() {
        let mut ledger = Ledger::new();
        ledger.open(1, 100).unwrap();
        ledger.open(2, 0).unwrap();

        assert_eq!(
            transfer_between(&ledger, 1, 2, amount(30)),
            Ok(Outcome::Applied)
        );
        assert_eq!(ledger.final_balances(), vec![(1, 70), (2, 30)]);
    }

    #[test]
    fn test_transfer_between_unknown_destination() {
        let mut ledger = Ledger::new();
        ledger.open(1, 100).unwrap();

        assert_eq!(
            transfer_between(&ledger, 1, 9, amount(30)),
            Err(LedgerError::UnknownDestination {
                account: 1,
                destination: 9
            })
        );
        assert_eq!(
            transfer_between(&ledger, 4, 1, amount(30)),
            Err(LedgerError::UnknownAccount { account: 4 })
        );
    }

    #[test]
    fn test_opposite_transfers_do_not_deadlock_and_conserve() {
        let a = Arc::new(Account::new(1, 1_000));
        let b = Arc::new(Account::new(2, 1_000));

        let forward = {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            thread::spawn(move || {
                for _ in 0..10_000 {
                    transfer(&a, &b, amount(3));
                }
            })
        };
        let backward = {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            thread::spawn(move || {
                for _ in 0..10_000 {
                    transfer(&b, &a, amount(3));
                }
            })
        };

        forward.join().unwrap();
        backward.join().unwrap();

        assert_eq!(a.balance() + b.balance(), 2_000);
        assert!(a.balance() >= 0);
        assert!(b.balance() >= 0);
    }
}
