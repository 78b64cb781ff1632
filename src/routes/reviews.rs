//! Tour review handlers for tourists.

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::review::{CanReviewQuery, ReviewStatisticsDto, TourReviewDto};
use crate::forms::review::CreateReviewForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::reviews as reviews_service;

#[post("/tourist/tour-reviews")]
pub async fn create_review(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CreateReviewForm>,
) -> impl Responder {
    match reviews_service::create_review(repo.get_ref(), &user, form) {
        Ok(review) => HttpResponse::Created().json(TourReviewDto::from(review)),
        Err(err) => error_response(err),
    }
}

/// Answers with a bare JSON boolean.
#[get("/tourist/tour-reviews/can-review")]
pub async fn can_review(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    query: web::Query<CanReviewQuery>,
) -> impl Responder {
    match reviews_service::can_review(repo.get_ref(), &user, query.purchase_id, query.tour_id) {
        Ok(eligible) => HttpResponse::Ok().json(eligible),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-reviews/purchase/{purchase_id}")]
pub async fn reviews_for_purchase(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews_service::reviews_for_purchase(repo.get_ref(), &user, path.into_inner()) {
        Ok(reviews) => {
            let reviews: Vec<TourReviewDto> =
                reviews.into_iter().map(TourReviewDto::from).collect();
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-reviews/tour/{tour_id}")]
pub async fn reviews_for_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews_service::reviews_for_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(reviews) => {
            let reviews: Vec<TourReviewDto> =
                reviews.into_iter().map(TourReviewDto::from).collect();
            HttpResponse::Ok().json(reviews)
        }
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-reviews/tour/{tour_id}/statistics")]
pub async fn tour_statistics(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews_service::tour_statistics(repo.get_ref(), &user, path.into_inner()) {
        Ok(stats) => HttpResponse::Ok().json(ReviewStatisticsDto::from(stats)),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-reviews/{id}")]
pub async fn get_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match reviews_service::get_review(repo.get_ref(), &user, path.into_inner()) {
        Ok(review) => HttpResponse::Ok().json(TourReviewDto::from(review)),
        Err(err) => error_response(err),
    }
}
