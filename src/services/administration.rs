//! Account administration services.

use crate::ADMINISTRATOR_ROLE;
use crate::domain::user::{LoginState, User};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// All currently blocked accounts.
pub fn list_blocked_users<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, ADMINISTRATOR_ROLE)?;
    Ok(repo.list_blocked_users()?)
}

/// Lifts the block on an account, unless the account has been blocked too
/// many times already.
pub fn unblock_user<R>(repo: &R, user: &AuthenticatedUser, user_id: i32) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_role(user, ADMINISTRATOR_ROLE)?;

    let account = repo
        .get_user_by_id(user_id)?
        .ok_or(ServiceError::NotFound)?;
    if !account.blocked {
        return Err(ServiceError::Conflict("User is not blocked".to_string()));
    }
    if !account.can_be_unblocked() {
        return Err(ServiceError::Conflict(
            "User has been blocked too many times to be unblocked".to_string(),
        ));
    }

    repo.set_login_state(
        user_id,
        LoginState {
            failed_logins: 0,
            blocked: false,
            block_count: account.block_count,
        },
    )
    .map_err(|err| {
        log::error!("Failed to unblock user {user_id}: {err}");
        err.into()
    })
}
