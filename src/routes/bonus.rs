//! Bonus point handlers for tourists.

use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::bonus::{BonusPointsDto, BonusTransactionDto};
use crate::dto::{PageQuery, PagedResult};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::bonus as bonus_service;

#[get("/tourist/bonus-points")]
pub async fn bonus_points(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match bonus_service::get_bonus_points(repo.get_ref(), &user) {
        Ok(account) => HttpResponse::Ok().json(BonusPointsDto::from(account)),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/bonus-points/history")]
pub async fn transaction_history(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match bonus_service::transaction_history(repo.get_ref(), &user, page.pagination()) {
        Ok((total, transactions)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            transactions
                .into_iter()
                .map(BonusTransactionDto::from)
                .collect(),
        )),
        Err(err) => error_response(err),
    }
}
