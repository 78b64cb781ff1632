//! Bonus point balance and ledger services for tourists.

use crate::TOURIST_ROLE;
use crate::domain::bonus::{BonusAccount, BonusTransaction};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{BonusReader, BonusWriter, Pagination};
use crate::services::{ServiceResult, ensure_role};

/// The caller's bonus balance. Accounts opened before the balance feature
/// existed are created lazily here.
pub fn get_bonus_points<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<BonusAccount>
where
    R: BonusReader + BonusWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    match repo.get_bonus_account(user.user_id)? {
        Some(account) => Ok(account),
        None => Ok(repo.create_bonus_account(user.user_id)?),
    }
}

/// The caller's bonus ledger, newest entries first.
pub fn transaction_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<BonusTransaction>)>
where
    R: BonusReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    Ok(repo.list_bonus_transactions(user.user_id, Some(pagination))?)
}
