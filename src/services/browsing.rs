//! Published-tour catalogue services for tourists.

use crate::TOURIST_ROLE;
use crate::domain::catalog::{self, CatalogEntry};
use crate::domain::keypoint::KeyPoint;
use crate::domain::tour::{Tour, TourState};
pub use crate::dto::tour::TourFilterQuery;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{KeyPointReader, Pagination, SortDirection, TourListQuery, TourReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn parse_date_sort(value: Option<&str>) -> Option<SortDirection> {
    match value {
        Some("asc") => Some(SortDirection::Ascending),
        Some("desc") => Some(SortDirection::Descending),
        _ => None,
    }
}

/// Lists published tours, optionally ordered by departure date.
pub fn list_published_tours<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
    sort_by_date: Option<&str>,
) -> ServiceResult<(usize, Vec<Tour>)>
where
    R: TourReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let mut query = TourListQuery::new()
        .state(TourState::Complete)
        .paginate(pagination.page, pagination.per_page);
    if let Some(direction) = parse_date_sort(sort_by_date) {
        query = query.sort_by_date(direction);
    }

    Ok(repo.list_tours(query)?)
}

/// Lists published tours narrowed by category, difficulty and price cap.
pub fn filter_published_tours<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
    filter: &TourFilterQuery,
) -> ServiceResult<(usize, Vec<Tour>)>
where
    R: TourReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let mut query = TourListQuery::new()
        .state(TourState::Complete)
        .paginate(pagination.page, pagination.per_page);
    if let Some(category) = filter.category {
        query = query.category(category);
    }
    if let Some(difficulty) = filter.difficulty {
        query = query.difficulty(difficulty);
    }
    if let Some(max_price) = filter.max_price {
        query = query.max_price(max_price);
    }
    if let Some(direction) = parse_date_sort(filter.sort_by_date.as_deref()) {
        query = query.sort_by_date(direction);
    }

    Ok(repo.list_tours(query)?)
}

/// Loads a published tour. Drafts stay invisible to tourists.
pub fn get_published_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_tour_by_id(tour_id)?
        .filter(Tour::is_published)
        .ok_or(ServiceError::NotFound)
}

/// Lists the itinerary of a published tour.
pub fn list_tour_keypoints<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<Vec<KeyPoint>>
where
    R: TourReader + KeyPointReader + ?Sized,
{
    get_published_tour(repo, user, tour_id)?;
    Ok(repo.list_keypoints_by_tour(tour_id)?)
}

/// The static tour category catalog.
pub fn list_categories(user: &AuthenticatedUser) -> ServiceResult<&'static [CatalogEntry]> {
    ensure_role(user, TOURIST_ROLE)?;
    Ok(&catalog::CATEGORIES)
}
