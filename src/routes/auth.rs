//! Login, registration and tourist profile handlers.

use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::catalog;
use crate::dto::ErrorBody;
use crate::dto::auth::{LoginResponseDto, TouristProfileDto};
use crate::dto::tour::CategoryDto;
use crate::forms::auth::{LoginForm, ProfileForm, RegisterForm};
use crate::models::auth::{self, AuthenticatedUser};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::auth as auth_service;

#[post("/users/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    match auth_service::login(repo.get_ref(), form) {
        Ok(user) => {
            match auth::issue_token(&user, &server_config.secret, server_config.token_ttl_hours) {
                Ok(token) => HttpResponse::Ok().json(LoginResponseDto::new(&user, token)),
                Err(err) => {
                    log::error!("Failed to issue token: {err}");
                    HttpResponse::InternalServerError()
                        .json(ErrorBody::new("Internal server error"))
                }
            }
        }
        Err(err) => error_response(err),
    }
}

#[post("/users/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterForm>,
) -> impl Responder {
    match auth_service::register(repo.get_ref(), form) {
        Ok(profile) => HttpResponse::Created().json(TouristProfileDto::from(profile)),
        Err(err) => error_response(err),
    }
}

/// Interest catalog shown on the registration page, so no token required.
#[get("/users/interests")]
pub async fn interests() -> impl Responder {
    let interests: Vec<CategoryDto> = catalog::INTERESTS.iter().map(CategoryDto::from).collect();
    HttpResponse::Ok().json(interests)
}

#[get("/tourist/profile")]
pub async fn get_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match auth_service::get_profile(repo.get_ref(), &user) {
        Ok(profile) => HttpResponse::Ok().json(TouristProfileDto::from(profile)),
        Err(err) => error_response(err),
    }
}

#[put("/tourist/profile")]
pub async fn update_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProfileForm>,
) -> impl Responder {
    match auth_service::update_profile(repo.get_ref(), &user, form) {
        Ok(profile) => HttpResponse::Ok().json(TouristProfileDto::from(profile)),
        Err(err) => error_response(err),
    }
}
