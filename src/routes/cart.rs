//! Shopping cart handlers for tourists.

use actix_web::{HttpResponse, Responder, delete, get, post, web};

use crate::dto::cart::ShoppingCartDto;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::cart as cart_service;

#[get("/tourist/cart")]
pub async fn get_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart_service::get_or_create_cart(repo.get_ref(), &user) {
        Ok(cart) => HttpResponse::Ok().json(ShoppingCartDto::from(cart)),
        Err(err) => error_response(err),
    }
}

#[delete("/tourist/cart")]
pub async fn clear_cart(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart_service::clear_cart(repo.get_ref(), &user) {
        Ok(cart) => HttpResponse::Ok().json(ShoppingCartDto::from(cart)),
        Err(err) => error_response(err),
    }
}

#[post("/tourist/cart/items/{tour_id}")]
pub async fn add_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart_service::add_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(cart) => HttpResponse::Ok().json(ShoppingCartDto::from(cart)),
        Err(err) => error_response(err),
    }
}

#[delete("/tourist/cart/items/{tour_id}")]
pub async fn remove_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match cart_service::remove_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(cart) => HttpResponse::Ok().json(ShoppingCartDto::from(cart)),
        Err(err) => error_response(err),
    }
}
