use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::user::{
    LoginState, NewUser as DomainNewUser, UpdateProfile as DomainUpdateProfile, User as DomainUser,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub surname: String,
    pub role: String,
    pub receive_recommendations: bool,
    pub failed_logins: i32,
    pub blocked: bool,
    pub block_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub role: &'a str,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Login counters written after an authentication attempt.
pub struct LoginStateChangeset {
    pub failed_logins: i32,
    pub blocked: bool,
    pub block_count: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::users)]
/// Self-service profile fields.
pub struct UpdateProfileChangeset {
    pub receive_recommendations: bool,
}

impl TryFrom<User> for DomainUser {
    type Error = UnknownValue;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            surname: user.surname,
            role: user.role.parse()?,
            receive_recommendations: user.receive_recommendations,
            failed_logins: user.failed_logins,
            blocked: user.blocked,
            block_count: user.block_count,
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            username: user.username.as_str(),
            email: user.email.as_str(),
            password_hash: user.password_hash.as_str(),
            name: user.name.as_str(),
            surname: user.surname.as_str(),
            role: user.role.as_str(),
        }
    }
}

impl From<LoginState> for LoginStateChangeset {
    fn from(state: LoginState) -> Self {
        Self {
            failed_logins: state.failed_logins,
            blocked: state.blocked,
            block_count: state.block_count,
        }
    }
}

impl From<&DomainUpdateProfile> for UpdateProfileChangeset {
    fn from(update: &DomainUpdateProfile) -> Self {
        Self {
            receive_recommendations: update.receive_recommendations,
        }
    }
}
