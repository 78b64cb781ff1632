//! Guide-to-guide tour replacement handlers.

use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::dto::replacement::{AvailableReplacementDto, TourReplacementDto};
use crate::dto::{PageQuery, PagedResult};
use crate::forms::replacement::ReplacementRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::replacements as replacements_service;

#[post("/guide/tour-replacement/request")]
pub async fn request_replacement(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReplacementRequestForm>,
) -> impl Responder {
    match replacements_service::request_replacement(repo.get_ref(), &user, form) {
        Ok(replacement) => HttpResponse::Created().json(TourReplacementDto::from(replacement)),
        Err(err) => error_response(err),
    }
}

/// Requests from other guides whose tours are still up for grabs.
#[get("/guide/tour-replacement/available")]
pub async fn available_replacements(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match replacements_service::available_replacements(repo.get_ref(), &user, page.pagination()) {
        Ok((total, records)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            records
                .into_iter()
                .map(AvailableReplacementDto::from)
                .collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[get("/guide/tour-replacement/my-requests")]
pub async fn my_requests(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match replacements_service::my_requests(repo.get_ref(), &user, page.pagination()) {
        Ok((total, records)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            records
                .into_iter()
                .map(|(replacement, _)| TourReplacementDto::from(replacement))
                .collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[get("/guide/tour-replacement/{id}")]
pub async fn replacement_details(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match replacements_service::replacement_details(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(AvailableReplacementDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[post("/guide/tour-replacement/{id}/accept")]
pub async fn accept_replacement(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match replacements_service::accept_replacement(repo.get_ref(), &user, path.into_inner()) {
        Ok(replacement) => HttpResponse::Ok().json(TourReplacementDto::from(replacement)),
        Err(err) => error_response(err),
    }
}

#[delete("/guide/tour-replacement/{id}/cancel")]
pub async fn cancel_replacement(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match replacements_service::cancel_replacement(repo.get_ref(), &user, path.into_inner()) {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
