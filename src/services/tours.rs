//! Tour authoring services for guides.

use chrono::Utc;
use validator::Validate;

use crate::GUIDE_ROLE;
use crate::domain::tour::{MIN_KEYPOINTS_TO_PUBLISH, Tour, TourState};
use crate::forms::tour::{CreateTourForm, UpdateTourForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{KeyPointReader, Pagination, TourListQuery, TourReader, TourWriter};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Lists the caller's own tours, drafts included.
pub fn list_own_tours<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<Tour>)>
where
    R: TourReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let query = TourListQuery::new()
        .guide(user.user_id)
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_tours(query)?)
}

/// Loads one of the caller's tours, draft or published.
pub fn get_own_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let tour = repo
        .get_tour_by_id(tour_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }
    Ok(tour)
}

/// Creates a draft tour owned by the caller.
pub fn create_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateTourForm,
) -> ServiceResult<Tour>
where
    R: TourWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;
    form.validate()?;

    if form.date.naive_utc() <= Utc::now().naive_utc() {
        return Err(ServiceError::Validation(
            "Tour date must be in the future".to_string(),
        ));
    }

    let new_tour = form.into_new_tour(user.user_id);
    repo.create_tour(&new_tour).map_err(|err| {
        log::error!("Failed to create tour: {err}");
        err.into()
    })
}

/// Updates one of the caller's tours.
///
/// Setting the state to complete publishes the tour, which requires at
/// least [`MIN_KEYPOINTS_TO_PUBLISH`] key points. A published tour cannot
/// go back to draft.
pub fn update_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
    form: UpdateTourForm,
) -> ServiceResult<Tour>
where
    R: TourReader + TourWriter + KeyPointReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;
    form.validate()?;
    let state = form.state()?;

    let tour = repo
        .get_tour_by_id(tour_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }

    if tour.is_published() && state == TourState::Draft {
        return Err(ServiceError::Conflict(
            "A published tour cannot return to draft".to_string(),
        ));
    }

    if !tour.is_published() && state == TourState::Complete {
        let keypoints = repo.count_keypoints(tour_id)?;
        if keypoints < MIN_KEYPOINTS_TO_PUBLISH {
            return Err(ServiceError::Validation(format!(
                "A tour needs at least {MIN_KEYPOINTS_TO_PUBLISH} key points to be published"
            )));
        }
    }

    let updates = form.into_update_tour(state);
    repo.update_tour(tour_id, &updates).map_err(|err| {
        log::error!("Failed to update tour {tour_id}: {err}");
        err.into()
    })
}

/// Deletes one of the caller's tours together with its key points.
pub fn delete_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<()>
where
    R: TourReader + TourWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let tour = repo
        .get_tour_by_id(tour_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }

    repo.delete_tour(tour_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::keypoint::KeyPoint;
    use crate::domain::tour::{NewTour, UpdateTour};
    use crate::repository::errors::RepositoryResult;

    #[derive(Default)]
    struct MockRepo {
        tour: RefCell<Option<Tour>>,
        keypoint_count: usize,
        updates: RefCell<Vec<UpdateTour>>,
    }

    impl MockRepo {
        fn with_tour(tour: Tour, keypoint_count: usize) -> Self {
            Self {
                tour: RefCell::new(Some(tour)),
                keypoint_count,
                updates: RefCell::new(Vec::new()),
            }
        }
    }

    impl TourReader for MockRepo {
        fn get_tour_by_id(&self, _id: i32) -> RepositoryResult<Option<Tour>> {
            Ok(self.tour.borrow().clone())
        }

        fn list_tours(&self, _query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)> {
            Ok((0, Vec::new()))
        }

        fn list_tours_by_ids(&self, _ids: &[i32]) -> RepositoryResult<Vec<Tour>> {
            Ok(Vec::new())
        }
    }

    impl TourWriter for MockRepo {
        fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour> {
            let now = Utc::now().naive_utc();
            Ok(Tour {
                id: 1,
                guide_id: new_tour.guide_id,
                name: new_tour.name.clone(),
                description: new_tour.description.clone(),
                difficulty: new_tour.difficulty,
                category: new_tour.category,
                price: new_tour.price,
                date: new_tour.date,
                state: TourState::Draft,
                created_at: now,
                updated_at: now,
            })
        }

        fn update_tour(&self, _tour_id: i32, updates: &UpdateTour) -> RepositoryResult<Tour> {
            self.updates.borrow_mut().push(updates.clone());
            let mut tour = self.tour.borrow().clone().expect("tour exists");
            tour.state = updates.state;
            Ok(tour)
        }

        fn delete_tour(&self, _tour_id: i32) -> RepositoryResult<()> {
            *self.tour.borrow_mut() = None;
            Ok(())
        }
    }

    impl KeyPointReader for MockRepo {
        fn get_keypoint_by_id(&self, _id: i32) -> RepositoryResult<Option<KeyPoint>> {
            Ok(None)
        }

        fn list_keypoints_by_tour(&self, _tour_id: i32) -> RepositoryResult<Vec<KeyPoint>> {
            Ok(Vec::new())
        }

        fn count_keypoints(&self, _tour_id: i32) -> RepositoryResult<usize> {
            Ok(self.keypoint_count)
        }
    }

    fn guide() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 7,
            username: "guide".to_string(),
            role: GUIDE_ROLE.to_string(),
        }
    }

    fn draft_tour(guide_id: i32) -> Tour {
        let now = Utc::now().naive_utc();
        Tour {
            id: 1,
            guide_id,
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price: 30.0,
            date: now + Duration::days(14),
            state: TourState::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    fn update_form(state: i32) -> UpdateTourForm {
        UpdateTourForm {
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price: 30.0,
            date: Utc::now() + Duration::days(14),
            state,
        }
    }

    #[test]
    fn create_rejects_past_date() {
        let repo = MockRepo::default();
        let form = CreateTourForm {
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price: 30.0,
            date: Utc::now() - Duration::days(1),
        };

        let result = create_tour(&repo, &guide(), form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_rejects_non_guides() {
        let repo = MockRepo::default();
        let user = AuthenticatedUser {
            user_id: 1,
            username: "ana".to_string(),
            role: crate::TOURIST_ROLE.to_string(),
        };
        let form = CreateTourForm {
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price: 30.0,
            date: Utc::now() + Duration::days(1),
        };

        let result = create_tour(&repo, &user, form);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn publish_requires_enough_keypoints() {
        let repo = MockRepo::with_tour(draft_tour(7), MIN_KEYPOINTS_TO_PUBLISH - 1);

        let result = update_tour(&repo, &guide(), 1, update_form(1));

        assert!(matches!(result, Err(ServiceError::Validation(_))));
        assert!(repo.updates.borrow().is_empty());
    }

    #[test]
    fn publish_succeeds_with_enough_keypoints() {
        let repo = MockRepo::with_tour(draft_tour(7), MIN_KEYPOINTS_TO_PUBLISH);

        let tour = update_tour(&repo, &guide(), 1, update_form(1)).expect("should publish");

        assert_eq!(tour.state, TourState::Complete);
        assert_eq!(repo.updates.borrow().len(), 1);
    }

    #[test]
    fn published_tour_cannot_return_to_draft() {
        let mut tour = draft_tour(7);
        tour.state = TourState::Complete;
        let repo = MockRepo::with_tour(tour, 5);

        let result = update_tour(&repo, &guide(), 1, update_form(0));

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn update_rejects_foreign_tour() {
        let repo = MockRepo::with_tour(draft_tour(99), 5);

        let result = update_tour(&repo, &guide(), 1, update_form(0));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
