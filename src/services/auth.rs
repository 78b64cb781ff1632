//! Registration, login and tourist profile services.

use validator::Validate;

use crate::TOURIST_ROLE;
use crate::domain::catalog;
use crate::domain::user::{LoginState, MAX_FAILED_LOGINS, NewUser, UpdateProfile, User, UserRole};
use crate::forms::auth::{LoginForm, ProfileForm, RegisterForm};
use crate::models::auth::{self, AuthenticatedUser};
use crate::repository::{BonusWriter, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn validate_interests(interest_ids: &[i32]) -> ServiceResult<()> {
    if let Some(id) = interest_ids.iter().find(|id| !catalog::is_valid_interest(**id)) {
        return Err(ServiceError::Validation(format!("Unknown interest id {id}")));
    }
    Ok(())
}

/// Creates a tourist account with a hashed password, the chosen interests
/// and an empty bonus account.
pub fn register<R>(repo: &R, form: RegisterForm) -> ServiceResult<(User, Vec<i32>)>
where
    R: UserReader + UserWriter + BonusWriter + ?Sized,
{
    form.validate()?;
    validate_interests(&form.interests_ids)?;

    if repo.get_user_by_username(form.username.trim())?.is_some() {
        return Err(ServiceError::Conflict("Username is already taken".to_string()));
    }

    let password_hash = auth::hash_password(&form.password).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal("Failed to process credentials".to_string())
    })?;

    let RegisterForm {
        name,
        surname,
        email,
        username,
        interests_ids,
        ..
    } = form;

    let new_user = NewUser::new(
        username,
        email,
        password_hash,
        name,
        surname,
        UserRole::Tourist,
    );

    let user = repo.create_user(&new_user)?;
    repo.set_user_interests(user.id, &interests_ids)?;
    repo.create_bonus_account(user.id)?;

    Ok((user, interests_ids))
}

/// Checks the credentials and maintains the failed-login counters.
///
/// Unknown usernames and wrong passwords are both `NotFound` so the
/// response does not reveal which part was wrong. A blocked account is
/// `Forbidden`, including the attempt that trips the block.
pub fn login<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    form.validate()?;

    let Some(user) = repo.get_user_by_username(form.username.trim())? else {
        return Err(ServiceError::NotFound);
    };

    if user.blocked {
        return Err(ServiceError::Forbidden);
    }

    if auth::verify_password(&form.password, &user.password_hash) {
        if user.failed_logins != 0 {
            let user = repo.set_login_state(
                user.id,
                LoginState {
                    failed_logins: 0,
                    blocked: false,
                    block_count: user.block_count,
                },
            )?;
            return Ok(user);
        }
        return Ok(user);
    }

    let failed_logins = user.failed_logins + 1;
    if failed_logins >= MAX_FAILED_LOGINS {
        repo.set_login_state(
            user.id,
            LoginState {
                failed_logins: 0,
                blocked: true,
                block_count: user.block_count + 1,
            },
        )?;
        return Err(ServiceError::Forbidden);
    }

    repo.set_login_state(
        user.id,
        LoginState {
            failed_logins,
            blocked: false,
            block_count: user.block_count,
        },
    )?;
    Err(ServiceError::NotFound)
}

/// Loads the caller's tourist profile with their interest ids.
pub fn get_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<(User, Vec<i32>)>
where
    R: UserReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let account = repo
        .get_user_by_id(user.user_id)?
        .ok_or(ServiceError::NotFound)?;
    let interests = repo.list_user_interests(user.user_id)?;

    Ok((account, interests))
}

/// Replaces the caller's interests and recommendation opt-in.
pub fn update_profile<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ProfileForm,
) -> ServiceResult<(User, Vec<i32>)>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    validate_interests(&form.interest_ids)?;

    if repo.get_user_by_id(user.user_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    repo.set_user_interests(user.user_id, &form.interest_ids)?;
    let account = repo.update_profile(
        user.user_id,
        &UpdateProfile {
            receive_recommendations: form.receive_recommendations,
        },
    )?;

    Ok((account, form.interest_ids))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::Utc;

    use super::*;
    use crate::repository::errors::RepositoryResult;

    struct MockRepo {
        user: RefCell<Option<User>>,
        login_states: RefCell<Vec<LoginState>>,
    }

    impl MockRepo {
        fn with_user(user: User) -> Self {
            Self {
                user: RefCell::new(Some(user)),
                login_states: RefCell::new(Vec::new()),
            }
        }
    }

    impl UserReader for MockRepo {
        fn get_user_by_id(&self, _id: i32) -> RepositoryResult<Option<User>> {
            Ok(self.user.borrow().clone())
        }

        fn get_user_by_username(&self, _username: &str) -> RepositoryResult<Option<User>> {
            Ok(self.user.borrow().clone())
        }

        fn list_blocked_users(&self) -> RepositoryResult<Vec<User>> {
            Ok(Vec::new())
        }

        fn list_user_interests(&self, _user_id: i32) -> RepositoryResult<Vec<i32>> {
            Ok(Vec::new())
        }
    }

    impl UserWriter for MockRepo {
        fn create_user(&self, _new_user: &NewUser) -> RepositoryResult<User> {
            unreachable!("not used in these tests")
        }

        fn set_login_state(&self, _user_id: i32, state: LoginState) -> RepositoryResult<User> {
            self.login_states.borrow_mut().push(state);
            let mut user = self.user.borrow().clone().expect("user exists");
            user.failed_logins = state.failed_logins;
            user.blocked = state.blocked;
            user.block_count = state.block_count;
            *self.user.borrow_mut() = Some(user.clone());
            Ok(user)
        }

        fn update_profile(
            &self,
            _user_id: i32,
            _updates: &UpdateProfile,
        ) -> RepositoryResult<User> {
            Ok(self.user.borrow().clone().expect("user exists"))
        }

        fn set_user_interests(&self, _user_id: i32, _interest_ids: &[i32]) -> RepositoryResult<()> {
            Ok(())
        }
    }

    fn tourist(password: &str) -> User {
        let now = Utc::now().naive_utc();
        User {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: auth::hash_password(password).unwrap(),
            name: "Ana".to_string(),
            surname: "Ivic".to_string(),
            role: UserRole::Tourist,
            receive_recommendations: false,
            failed_logins: 0,
            blocked: false,
            block_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn login_form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_succeeds_with_valid_credentials() {
        let repo = MockRepo::with_user(tourist("hunter2"));

        let user = login(&repo, login_form("ana", "hunter2")).expect("should log in");

        assert_eq!(user.username, "ana");
        assert!(repo.login_states.borrow().is_empty());
    }

    #[test]
    fn login_resets_failure_counter_on_success() {
        let mut user = tourist("hunter2");
        user.failed_logins = 2;
        let repo = MockRepo::with_user(user);

        login(&repo, login_form("ana", "hunter2")).expect("should log in");

        let states = repo.login_states.borrow();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].failed_logins, 0);
        assert!(!states[0].blocked);
    }

    #[test]
    fn login_blocks_after_third_consecutive_failure() {
        let mut user = tourist("hunter2");
        user.failed_logins = 2;
        let repo = MockRepo::with_user(user);

        let result = login(&repo, login_form("ana", "wrong"));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
        let states = repo.login_states.borrow();
        assert_eq!(states.len(), 1);
        assert!(states[0].blocked);
        assert_eq!(states[0].block_count, 1);
        assert_eq!(states[0].failed_logins, 0);
    }

    #[test]
    fn login_counts_failures_below_the_limit() {
        let repo = MockRepo::with_user(tourist("hunter2"));

        let result = login(&repo, login_form("ana", "wrong"));

        assert!(matches!(result, Err(ServiceError::NotFound)));
        let states = repo.login_states.borrow();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].failed_logins, 1);
        assert!(!states[0].blocked);
    }

    #[test]
    fn login_rejects_blocked_account() {
        let mut user = tourist("hunter2");
        user.blocked = true;
        user.block_count = 1;
        let repo = MockRepo::with_user(user);

        let result = login(&repo, login_form("ana", "hunter2"));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
        assert!(repo.login_states.borrow().is_empty());
    }

    #[test]
    fn profile_update_rejects_unknown_interest() {
        let repo = MockRepo::with_user(tourist("hunter2"));
        let user = AuthenticatedUser {
            user_id: 1,
            username: "ana".to_string(),
            role: TOURIST_ROLE.to_string(),
        };
        let form = ProfileForm {
            interest_ids: vec![1, 9],
            receive_recommendations: true,
        };

        let result = update_profile(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
