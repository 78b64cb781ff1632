use serde::{Deserialize, Serialize};

use crate::domain::user::User;

/// Body of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseDto {
    pub id: i32,
    pub username: String,
    pub role: String,
    pub access_token: String,
}

impl LoginResponseDto {
    #[must_use]
    pub fn new(user: &User, access_token: String) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role.to_string(),
            access_token,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouristProfileDto {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub interest_ids: Vec<i32>,
    pub receive_recommendations: bool,
}

impl From<(User, Vec<i32>)> for TouristProfileDto {
    fn from((user, interest_ids): (User, Vec<i32>)) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            email: user.email,
            interest_ids,
            receive_recommendations: user.receive_recommendations,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedUserDto {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub surname: String,
    pub role: String,
    pub block_count: i32,
    pub can_be_unblocked: bool,
}

impl From<&User> for BlockedUserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            role: user.role.to_string(),
            block_count: user.block_count,
            can_be_unblocked: user.can_be_unblocked(),
        }
    }
}
