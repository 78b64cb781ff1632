//! Checkout and purchase history handlers for tourists.

use actix_web::{HttpResponse, Responder, get, post, web};

use crate::dto::purchase::TourPurchaseDto;
use crate::dto::{PageQuery, PagedResult};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::purchases as purchases_service;

/// The request body is the number of bonus points to spend, as a bare JSON
/// number.
#[post("/tourist/purchases")]
pub async fn checkout(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(bonus_points): web::Json<f64>,
) -> impl Responder {
    match purchases_service::checkout(repo.get_ref(), &user, bonus_points) {
        Ok(purchase) => HttpResponse::Created().json(TourPurchaseDto::from(purchase)),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/purchases")]
pub async fn purchase_history(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match purchases_service::purchase_history(repo.get_ref(), &user, page.pagination()) {
        Ok((total, purchases)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            purchases.into_iter().map(TourPurchaseDto::from).collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/purchases/{id}")]
pub async fn get_purchase(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match purchases_service::get_own_purchase(repo.get_ref(), &user, path.into_inner()) {
        Ok(purchase) => HttpResponse::Ok().json(TourPurchaseDto::from(purchase)),
        Err(err) => error_response(err),
    }
}

#[post("/tourist/purchases/{id}/cancel")]
pub async fn cancel_purchase(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match purchases_service::cancel_purchase(repo.get_ref(), &user, path.into_inner()) {
        Ok(purchase) => HttpResponse::Ok().json(TourPurchaseDto::from(purchase)),
        Err(err) => error_response(err),
    }
}
