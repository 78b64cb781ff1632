//! Tour review services for tourists.
//!
//! A tour can be reviewed once per purchase, by the buyer, after the tour
//! has taken place.

use chrono::Utc;
use validator::Validate;

use crate::TOURIST_ROLE;
use crate::domain::purchase::PurchaseStatus;
use crate::domain::review::{LOW_RATING_COMMENT_THRESHOLD, ReviewStatistics, TourReview};
use crate::domain::tour::Tour;
use crate::forms::review::CreateReviewForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{PurchaseReader, ReviewReader, ReviewWriter, TourReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn is_eligible<R>(
    repo: &R,
    tourist_id: i32,
    purchase_id: i32,
    tour_id: i32,
) -> ServiceResult<bool>
where
    R: PurchaseReader + TourReader + ReviewReader + ?Sized,
{
    let Some(purchase) = repo.get_purchase_by_id(purchase_id)? else {
        return Ok(false);
    };
    if purchase.tourist_id != tourist_id
        || purchase.status != PurchaseStatus::Completed
        || !purchase.tour_ids.contains(&tour_id)
    {
        return Ok(false);
    }

    let Some(tour) = repo.get_tour_by_id(tour_id)? else {
        return Ok(false);
    };
    if !tour.has_departed(Utc::now().naive_utc()) {
        return Ok(false);
    }

    Ok(!repo.review_exists(purchase_id, tour_id)?)
}

/// Whether the caller may review `tour_id` through `purchase_id`.
pub fn can_review<R>(
    repo: &R,
    user: &AuthenticatedUser,
    purchase_id: i32,
    tour_id: i32,
) -> ServiceResult<bool>
where
    R: PurchaseReader + TourReader + ReviewReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    is_eligible(repo, user.user_id, purchase_id, tour_id)
}

/// Creates a review for a tour the caller bought and attended. Ratings of
/// [`LOW_RATING_COMMENT_THRESHOLD`] or below must explain themselves in a
/// comment.
pub fn create_review<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateReviewForm,
) -> ServiceResult<TourReview>
where
    R: PurchaseReader + TourReader + ReviewReader + ReviewWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    form.validate()?;

    if form.rating <= LOW_RATING_COMMENT_THRESHOLD
        && form
            .comment
            .as_deref()
            .map(str::trim)
            .filter(|comment| !comment.is_empty())
            .is_none()
    {
        return Err(ServiceError::Validation(format!(
            "A comment is required for ratings of {LOW_RATING_COMMENT_THRESHOLD} or below"
        )));
    }

    if !is_eligible(repo, user.user_id, form.tour_purchase_id, form.tour_id)? {
        return Err(ServiceError::Conflict(
            "This tour cannot be reviewed through this purchase".to_string(),
        ));
    }

    repo.create_review(&form.into_new_review(user.user_id))
        .map_err(|err| {
            log::error!("Failed to create review: {err}");
            err.into()
        })
}

/// Loads a single review.
pub fn get_review<R>(repo: &R, user: &AuthenticatedUser, review_id: i32) -> ServiceResult<TourReview>
where
    R: ReviewReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_review_by_id(review_id)?
        .ok_or(ServiceError::NotFound)
}

/// The caller's reviews attached to one of their purchases.
pub fn reviews_for_purchase<R>(
    repo: &R,
    user: &AuthenticatedUser,
    purchase_id: i32,
) -> ServiceResult<Vec<TourReview>>
where
    R: PurchaseReader + ReviewReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_purchase_by_id(purchase_id)?
        .filter(|purchase| purchase.tourist_id == user.user_id)
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.list_reviews_by_purchase(purchase_id)?)
}

/// All reviews of a published tour, newest first.
pub fn reviews_for_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<Vec<TourReview>>
where
    R: TourReader + ReviewReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_tour_by_id(tour_id)?
        .filter(Tour::is_published)
        .ok_or(ServiceError::NotFound)?;

    let (_, reviews) = repo.list_reviews_by_tour(tour_id, None)?;
    Ok(reviews)
}

/// Aggregated rating statistics of a published tour.
pub fn tour_statistics<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<ReviewStatistics>
where
    R: TourReader + ReviewReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_tour_by_id(tour_id)?
        .filter(Tour::is_published)
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.get_review_statistics(tour_id)?)
}
