//! Tour authoring handlers for guides.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::tour::TourDto;
use crate::dto::{PageQuery, PagedResult};
use crate::forms::tour::{CreateTourForm, UpdateTourForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::tours as tours_service;

#[get("/author/tours")]
pub async fn list_tours(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match tours_service::list_own_tours(repo.get_ref(), &user, page.pagination()) {
        Ok((total, tours)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            tours.into_iter().map(TourDto::from).collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[post("/author/tours")]
pub async fn create_tour(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateTourForm>,
) -> impl Responder {
    match tours_service::create_tour(repo.get_ref(), &user, form) {
        Ok(tour) => HttpResponse::Created().json(TourDto::from(tour)),
        Err(err) => error_response(err),
    }
}

#[get("/author/tours/{id}")]
pub async fn get_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tours_service::get_own_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(tour) => HttpResponse::Ok().json(TourDto::from(tour)),
        Err(err) => error_response(err),
    }
}

#[put("/author/tours/{id}")]
pub async fn update_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateTourForm>,
) -> impl Responder {
    match tours_service::update_tour(repo.get_ref(), &user, path.into_inner(), form) {
        Ok(tour) => HttpResponse::Ok().json(TourDto::from(tour)),
        Err(err) => error_response(err),
    }
}

#[delete("/author/tours/{id}")]
pub async fn delete_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match tours_service::delete_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
