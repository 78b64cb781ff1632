//! HTTP handlers, grouped by API area. Handlers stay thin: extract, call
//! the service, serialize.

use actix_web::HttpResponse;

use crate::dto::ErrorBody;
use crate::services::ServiceError;

pub mod administration;
pub mod auth;
pub mod bonus;
pub mod browsing;
pub mod cart;
pub mod keypoints;
pub mod problems;
pub mod purchases;
pub mod replacements;
pub mod reviews;
pub mod tours;

/// Maps a service failure to its HTTP response.
pub(crate) fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Unauthorized => {
            HttpResponse::Unauthorized().json(ErrorBody::new("Unauthorized"))
        }
        ServiceError::Forbidden => HttpResponse::Forbidden().json(ErrorBody::new("Access denied")),
        ServiceError::NotFound => HttpResponse::NotFound().json(ErrorBody::new("Not found")),
        ServiceError::Validation(message) => {
            HttpResponse::BadRequest().json(ErrorBody::new(message))
        }
        ServiceError::Conflict(message) => HttpResponse::Conflict().json(ErrorBody::new(message)),
        err => {
            log::error!("Request failed: {err}");
            HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"))
        }
    }
}
