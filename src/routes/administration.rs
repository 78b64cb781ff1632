//! Account administration handlers.

use actix_web::{HttpResponse, Responder, get, put, web};

use crate::dto::auth::BlockedUserDto;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::administration as administration_service;

#[get("/administration/blocked-users")]
pub async fn blocked_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match administration_service::list_blocked_users(repo.get_ref(), &user) {
        Ok(users) => {
            HttpResponse::Ok().json(users.iter().map(BlockedUserDto::from).collect::<Vec<_>>())
        }
        Err(err) => error_response(err),
    }
}

#[put("/administration/unblock-user/{id}")]
pub async fn unblock_user(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match administration_service::unblock_user(repo.get_ref(), &user, path.into_inner()) {
        Ok(account) => HttpResponse::Ok().json(BlockedUserDto::from(&account)),
        Err(err) => error_response(err),
    }
}
