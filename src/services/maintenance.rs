//! Housekeeping run by the maintenance binary, not by request handlers.

use chrono::{Duration, NaiveDateTime};

use crate::domain::bonus::{BonusTransactionKind, NewBonusTransaction};
use crate::repository::{BonusReader, BonusWriter, ReplacementWriter};
use crate::services::ServiceResult;

/// Expires pending replacement requests whose tour has already departed.
/// Returns how many requests were expired.
pub fn expire_replacements<R>(repo: &R, now: NaiveDateTime) -> ServiceResult<usize>
where
    R: ReplacementWriter + ?Sized,
{
    Ok(repo.expire_stale_replacements(now)?)
}

/// Zeroes bonus balances untouched for `expiry_days`, writing an expiry
/// entry to each ledger. Returns how many accounts were drained.
pub fn expire_bonus_points<R>(
    repo: &R,
    now: NaiveDateTime,
    expiry_days: i64,
) -> ServiceResult<usize>
where
    R: BonusReader + BonusWriter + ?Sized,
{
    let cutoff = now - Duration::days(expiry_days);
    let accounts = repo.list_stale_bonus_accounts(cutoff)?;

    let mut expired = 0;
    for account in accounts {
        if account.available_points <= 0.0 {
            continue;
        }
        let tx = NewBonusTransaction::new(
            account.tourist_id,
            -account.available_points,
            BonusTransactionKind::Expired,
            format!("Points expired after {expiry_days} days of inactivity"),
        );
        match repo.record_bonus_transaction(&tx) {
            Ok(_) => expired += 1,
            Err(err) => {
                log::error!(
                    "Failed to expire points for tourist {}: {err}",
                    account.tourist_id
                );
            }
        }
    }

    Ok(expired)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;

    use super::*;
    use crate::domain::bonus::{BonusAccount, BonusTransaction};
    use crate::repository::Pagination;
    use crate::repository::errors::RepositoryResult;

    struct MockRepo {
        accounts: Vec<BonusAccount>,
        recorded: RefCell<Vec<NewBonusTransaction>>,
    }

    impl BonusReader for MockRepo {
        fn get_bonus_account(&self, _tourist_id: i32) -> RepositoryResult<Option<BonusAccount>> {
            Ok(None)
        }

        fn list_bonus_transactions(
            &self,
            _tourist_id: i32,
            _pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<BonusTransaction>)> {
            Ok((0, Vec::new()))
        }

        fn list_stale_bonus_accounts(
            &self,
            _cutoff: NaiveDateTime,
        ) -> RepositoryResult<Vec<BonusAccount>> {
            Ok(self.accounts.clone())
        }
    }

    impl BonusWriter for MockRepo {
        fn create_bonus_account(&self, _tourist_id: i32) -> RepositoryResult<BonusAccount> {
            unreachable!("not used in these tests")
        }

        fn record_bonus_transaction(
            &self,
            tx: &NewBonusTransaction,
        ) -> RepositoryResult<BonusAccount> {
            self.recorded.borrow_mut().push(tx.clone());
            let now = Utc::now().naive_utc();
            Ok(BonusAccount {
                id: 1,
                tourist_id: tx.tourist_id,
                available_points: 0.0,
                created_at: now,
                updated_at: now,
            })
        }
    }

    fn account(tourist_id: i32, points: f64) -> BonusAccount {
        let now = Utc::now().naive_utc();
        BonusAccount {
            id: tourist_id,
            tourist_id,
            available_points: points,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn drains_stale_accounts_with_points() {
        let repo = MockRepo {
            accounts: vec![account(1, 30.0), account(2, 0.0), account(3, 12.5)],
            recorded: RefCell::new(Vec::new()),
        };

        let expired = expire_bonus_points(&repo, Utc::now().naive_utc(), 365)
            .expect("should expire");

        assert_eq!(expired, 2);
        let recorded = repo.recorded.borrow();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].amount, -30.0);
        assert_eq!(recorded[0].kind, BonusTransactionKind::Expired);
        assert_eq!(recorded[1].tourist_id, 3);
        assert_eq!(recorded[1].amount, -12.5);
    }
}
