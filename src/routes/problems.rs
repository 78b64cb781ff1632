//! Tour problem handlers for tourists, guides and administrators.

use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::dto::problem::TourProblemDto;
use crate::dto::{PageQuery, PagedResult};
use crate::forms::problem::ReportProblemForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::problems as problems_service;

fn paged_problems(
    total: usize,
    records: Vec<problems_service::ProblemRecord>,
) -> HttpResponse {
    HttpResponse::Ok().json(PagedResult::new(
        total,
        records.into_iter().map(TourProblemDto::from).collect(),
    ))
}

#[post("/tourist/tour-problems")]
pub async fn report_problem(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ReportProblemForm>,
) -> impl Responder {
    match problems_service::report_problem(repo.get_ref(), &user, form) {
        Ok(record) => HttpResponse::Created().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-problems")]
pub async fn my_problems(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match problems_service::my_problems(repo.get_ref(), &user, page.pagination()) {
        Ok((total, records)) => paged_problems(total, records),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tour-problems/{id}")]
pub async fn my_problem(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match problems_service::get_my_problem(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[get("/author/tour-problems")]
pub async fn guide_problems(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match problems_service::guide_problems(repo.get_ref(), &user, page.pagination()) {
        Ok((total, records)) => paged_problems(total, records),
        Err(err) => error_response(err),
    }
}

#[put("/author/tour-problems/{id}/resolve")]
pub async fn resolve_problem(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match problems_service::resolve_problem(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[put("/author/tour-problems/{id}/send-to-admin")]
pub async fn send_to_administrator(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match problems_service::send_to_administrator(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[get("/administrator/tour-problems/under-review")]
pub async fn problems_under_review(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
) -> impl Responder {
    match problems_service::problems_under_review(repo.get_ref(), &user, page.pagination()) {
        Ok((total, records)) => paged_problems(total, records),
        Err(err) => error_response(err),
    }
}

#[put("/administrator/tour-problems/{id}/return-to-guide")]
pub async fn return_to_guide(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match problems_service::return_to_guide(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}

#[put("/administrator/tour-problems/{id}/reject")]
pub async fn reject_problem(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match problems_service::reject_problem(repo.get_ref(), &user, path.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(TourProblemDto::from(record)),
        Err(err) => error_response(err),
    }
}
