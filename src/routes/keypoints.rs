//! Key point authoring handlers for guides.

use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::keypoint::KeyPointDto;
use crate::forms::keypoint::{CreateKeyPointForm, UpdateKeyPointForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::keypoints as keypoints_service;

#[post("/author/keypoints")]
pub async fn create_keypoint(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateKeyPointForm>,
) -> impl Responder {
    match keypoints_service::create_keypoint(repo.get_ref(), &user, form) {
        Ok(keypoint) => HttpResponse::Created().json(KeyPointDto::from(keypoint)),
        Err(err) => error_response(err),
    }
}

#[get("/author/keypoints/tour/{tour_id}")]
pub async fn keypoints_by_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match keypoints_service::list_keypoints(repo.get_ref(), &user, path.into_inner()) {
        Ok(keypoints) => {
            let keypoints: Vec<KeyPointDto> =
                keypoints.into_iter().map(KeyPointDto::from).collect();
            HttpResponse::Ok().json(keypoints)
        }
        Err(err) => error_response(err),
    }
}

#[get("/author/keypoints/{id}")]
pub async fn get_keypoint(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match keypoints_service::get_keypoint(repo.get_ref(), &user, path.into_inner()) {
        Ok(keypoint) => HttpResponse::Ok().json(KeyPointDto::from(keypoint)),
        Err(err) => error_response(err),
    }
}

#[put("/author/keypoints/{id}")]
pub async fn update_keypoint(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateKeyPointForm>,
) -> impl Responder {
    match keypoints_service::update_keypoint(repo.get_ref(), &user, path.into_inner(), form) {
        Ok(keypoint) => HttpResponse::Ok().json(KeyPointDto::from(keypoint)),
        Err(err) => error_response(err),
    }
}

#[delete("/author/keypoints/{id}")]
pub async fn delete_keypoint(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match keypoints_service::delete_keypoint(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err),
    }
}
