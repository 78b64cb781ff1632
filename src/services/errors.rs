//! Error types shared by all service functions.

use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Failures surfaced by the service layer. Routes map these onto HTTP
/// status codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Access denied")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            RepositoryError::ConstraintViolation(message) => ServiceError::Conflict(message),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<crate::domain::UnknownValue> for ServiceError {
    fn from(err: crate::domain::UnknownValue) -> Self {
        ServiceError::Validation(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err.to_string())
    }
}
