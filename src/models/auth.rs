//! Bearer token authentication and password hashing.
//!
//! Access tokens are HS256 JWTs carrying the user id, username and role.
//! Handlers receive an [`AuthenticatedUser`] through the actix `FromRequest`
//! extractor; a missing or invalid token short-circuits with `401` before the
//! handler runs.

use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, dev::Payload, web};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};
use thiserror::Error;

use crate::domain::user::User;
use crate::dto::ErrorBody;
use crate::models::config::ServerConfig;

/// Identity attached to a request after token validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub username: String,
    pub role: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    username: String,
    role: String,
    exp: usize,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid bearer token")]
    InvalidToken,
    #[error("server configuration missing")]
    MissingConfig,
    #[error("failed to issue token")]
    TokenCreation,
    #[error("failed to hash password")]
    PasswordHash,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

/// Issues a signed access token for the given user.
pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, AuthError> {
    let expires_at = Utc::now() + Duration::hours(ttl_hours);
    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: usize::try_from(expires_at.timestamp()).map_err(|_| AuthError::TokenCreation)?,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::TokenCreation)
}

/// Validates a token and returns the identity it carries.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;
    Ok(AuthenticatedUser {
        user_id: data.claims.sub,
        username: data.claims.username,
        role: data.claims.role,
    })
}

/// Hashes a password with Argon2id and a random salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::PasswordHash)?
        .to_string())
}

/// Verifies a password against a stored Argon2 hash.
#[must_use]
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

fn extract_bearer(req: &HttpRequest) -> Result<&str, AuthError> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;
    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = req
            .app_data::<web::Data<ServerConfig>>()
            .ok_or(AuthError::MissingConfig)
            .and_then(|config| {
                let token = extract_bearer(req)?;
                decode_token(token, &config.secret)
            });
        ready(result)
    }
}
