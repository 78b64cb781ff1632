//! Published-tour catalogue handlers for tourists.

use actix_web::{HttpResponse, Responder, get, web};

use crate::dto::tour::{CategoryDto, TourDto, TourFilterQuery};
use crate::dto::{PageQuery, PagedResult};
use crate::dto::keypoint::KeyPointDto;
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::browsing as browsing_service;

#[get("/tourist/tours")]
pub async fn published_tours(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
    filter: web::Query<TourFilterQuery>,
) -> impl Responder {
    match browsing_service::list_published_tours(
        repo.get_ref(),
        &user,
        page.pagination(),
        filter.sort_by_date.as_deref(),
    ) {
        Ok((total, tours)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            tours.into_iter().map(TourDto::from).collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tours/filter")]
pub async fn filtered_tours(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    page: web::Query<PageQuery>,
    filter: web::Query<TourFilterQuery>,
) -> impl Responder {
    match browsing_service::filter_published_tours(repo.get_ref(), &user, page.pagination(), &filter)
    {
        Ok((total, tours)) => HttpResponse::Ok().json(PagedResult::new(
            total,
            tours.into_iter().map(TourDto::from).collect(),
        )),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tours/categories")]
pub async fn categories(user: AuthenticatedUser) -> impl Responder {
    match browsing_service::list_categories(&user) {
        Ok(entries) => {
            let categories: Vec<CategoryDto> = entries.iter().map(CategoryDto::from).collect();
            HttpResponse::Ok().json(categories)
        }
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tours/{id}")]
pub async fn published_tour(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match browsing_service::get_published_tour(repo.get_ref(), &user, path.into_inner()) {
        Ok(tour) => HttpResponse::Ok().json(TourDto::from(tour)),
        Err(err) => error_response(err),
    }
}

#[get("/tourist/tours/{id}/keypoints")]
pub async fn tour_keypoints(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match browsing_service::list_tour_keypoints(repo.get_ref(), &user, path.into_inner()) {
        Ok(keypoints) => {
            let keypoints: Vec<KeyPointDto> =
                keypoints.into_iter().map(KeyPointDto::from).collect();
            HttpResponse::Ok().json(keypoints)
        }
        Err(err) => error_response(err),
    }
}
