//! Tour replacement services for guides.
//!
//! A guide who cannot lead a tour opens a replacement request; another
//! guide takes the tour over by accepting it.

use chrono::Utc;

use crate::GUIDE_ROLE;
use crate::domain::replacement::{NewTourReplacement, TourReplacement, TourReplacementStatus};
use crate::domain::tour::Tour;
use crate::forms::replacement::ReplacementRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    Pagination, ReplacementListQuery, ReplacementReader, ReplacementWriter, TourReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// A replacement request joined with the tour it offers.
pub type ReplacementRecord = (TourReplacement, Tour);

/// Opens a replacement request for one of the caller's published tours.
pub fn request_replacement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ReplacementRequestForm,
) -> ServiceResult<TourReplacement>
where
    R: TourReader + ReplacementReader + ReplacementWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let tour = repo
        .get_tour_by_id(form.tour_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }
    if !tour.is_published() {
        return Err(ServiceError::Conflict(
            "Only published tours can be handed over".to_string(),
        ));
    }
    if tour.has_departed(Utc::now().naive_utc()) {
        return Err(ServiceError::Conflict(
            "The tour has already departed".to_string(),
        ));
    }
    if repo.has_pending_replacement(tour.id)? {
        return Err(ServiceError::Conflict(
            "A replacement request is already open for this tour".to_string(),
        ));
    }

    let new_replacement = NewTourReplacement {
        tour_id: tour.id,
        original_guide_id: user.user_id,
    };
    repo.create_replacement(&new_replacement).map_err(|err| {
        log::error!("Failed to create replacement request: {err}");
        err.into()
    })
}

/// Withdraws one of the caller's pending requests.
pub fn cancel_replacement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    replacement_id: i32,
) -> ServiceResult<TourReplacement>
where
    R: ReplacementReader + ReplacementWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let (replacement, _) = repo
        .get_replacement_by_id(replacement_id)?
        .ok_or(ServiceError::NotFound)?;
    if replacement.original_guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }

    Ok(repo.cancel_replacement(replacement_id, Utc::now().naive_utc())?)
}

/// Open requests from other guides, oldest first.
pub fn available_replacements<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<ReplacementRecord>)>
where
    R: ReplacementReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let query = ReplacementListQuery::new()
        .status(TourReplacementStatus::Pending)
        .exclude_guide(user.user_id)
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_replacements(query)?)
}

/// Takes over another guide's tour by accepting their pending request.
pub fn accept_replacement<R>(
    repo: &R,
    user: &AuthenticatedUser,
    replacement_id: i32,
) -> ServiceResult<TourReplacement>
where
    R: ReplacementReader + ReplacementWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let (replacement, tour) = repo
        .get_replacement_by_id(replacement_id)?
        .ok_or(ServiceError::NotFound)?;
    if replacement.original_guide_id == user.user_id {
        return Err(ServiceError::Conflict(
            "A guide cannot accept their own request".to_string(),
        ));
    }
    if tour.has_departed(Utc::now().naive_utc()) {
        return Err(ServiceError::Conflict(
            "The tour has already departed".to_string(),
        ));
    }

    repo.accept_replacement(replacement_id, user.user_id, Utc::now().naive_utc())
        .map_err(|err| {
            log::error!("Failed to accept replacement {replacement_id}: {err}");
            err.into()
        })
}

/// The caller's own requests, newest first.
pub fn my_requests<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<ReplacementRecord>)>
where
    R: ReplacementReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let query = ReplacementListQuery::new()
        .original_guide(user.user_id)
        .newest_first()
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_replacements(query)?)
}

/// Loads a request together with the tour it offers.
pub fn replacement_details<R>(
    repo: &R,
    user: &AuthenticatedUser,
    replacement_id: i32,
) -> ServiceResult<ReplacementRecord>
where
    R: ReplacementReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    repo.get_replacement_by_id(replacement_id)?
        .ok_or(ServiceError::NotFound)
}
