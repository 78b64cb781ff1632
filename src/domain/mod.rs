//! Domain aggregates exposed by the booking service layer.

use thiserror::Error;

pub mod bonus;
pub mod cart;
pub mod catalog;
pub mod keypoint;
pub mod problem;
pub mod purchase;
pub mod replacement;
pub mod review;
pub mod tour;
pub mod user;

/// Error produced when a persisted code or label does not map to a domain
/// enum variant.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownValue {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownValue {
    #[must_use]
    pub fn new(kind: &'static str, value: impl ToString) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
