//! Business logic for the booking platform, independent of the HTTP layer.
//!
//! Services take the repository through the reader/writer traits so tests
//! can substitute mocks.

use crate::models::auth::AuthenticatedUser;

pub mod administration;
pub mod auth;
pub mod bonus;
pub mod browsing;
pub mod cart;
pub mod errors;
pub mod keypoints;
pub mod maintenance;
pub mod problems;
pub mod purchases;
pub mod replacements;
pub mod reviews;
pub mod tours;

pub use errors::{ServiceError, ServiceResult};

/// Rejects callers whose token does not carry the requested role.
pub fn ensure_role(user: &AuthenticatedUser, role: &str) -> ServiceResult<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(ServiceError::Forbidden)
    }
}
