use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

/// Consecutive failed logins that trigger an automatic block.
pub const MAX_FAILED_LOGINS: i32 = 3;
/// Blocks after which an administrator can no longer unblock the account.
pub const MAX_BLOCKS: i32 = 3;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: UserRole,
    pub receive_recommendations: bool,
    pub failed_logins: i32,
    pub blocked: bool,
    pub block_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl User {
    /// Full display name used in listings and notifications.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Whether an administrator may still lift the block.
    #[must_use]
    pub fn can_be_unblocked(&self) -> bool {
        self.blocked && self.block_count < MAX_BLOCKS
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum UserRole {
    Tourist,
    Guide,
    Administrator,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            UserRole::Tourist => "tourist",
            UserRole::Guide => "guide",
            UserRole::Administrator => "administrator",
        }
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tourist" => Ok(UserRole::Tourist),
            "guide" => Ok(UserRole::Guide),
            "administrator" => Ok(UserRole::Administrator),
            other => Err(UnknownValue::new("user role", other)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: UserRole,
}

impl NewUser {
    #[must_use]
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        name: String,
        surname: String,
        role: UserRole,
    ) -> Self {
        Self {
            username: username.trim().to_string(),
            email: email.to_lowercase().trim().to_string(),
            password_hash,
            name: name.trim().to_string(),
            surname: surname.trim().to_string(),
            role,
        }
    }
}

/// Login counters recalculated by the authentication service after each
/// attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginState {
    pub failed_logins: i32,
    pub blocked: bool,
    pub block_count: i32,
}

/// Profile fields a tourist may edit themselves.
#[derive(Clone, Debug)]
pub struct UpdateProfile {
    pub receive_recommendations: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        for role in [UserRole::Tourist, UserRole::Guide, UserRole::Administrator] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
        assert!("manager".parse::<UserRole>().is_err());
    }

    #[test]
    fn new_user_normalizes_fields() {
        let user = NewUser::new(
            " ana ".to_string(),
            " Ana@Example.COM ".to_string(),
            "hash".to_string(),
            " Ana ".to_string(),
            " Ivic ".to_string(),
            UserRole::Tourist,
        );
        assert_eq!(user.username, "ana");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.name, "Ana");
        assert_eq!(user.surname, "Ivic");
    }

    #[test]
    fn unblock_allowed_below_block_limit() {
        let mut user = User {
            id: 1,
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            password_hash: "h".to_string(),
            name: "U".to_string(),
            surname: "S".to_string(),
            role: UserRole::Tourist,
            receive_recommendations: false,
            failed_logins: 3,
            blocked: true,
            block_count: 2,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: chrono::Utc::now().naive_utc(),
        };
        assert!(user.can_be_unblocked());
        user.block_count = MAX_BLOCKS;
        assert!(!user.can_be_unblocked());
        user.blocked = false;
        assert!(!user.can_be_unblocked());
    }
}
