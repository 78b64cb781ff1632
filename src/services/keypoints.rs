//! Key point authoring services for guides.

use validator::Validate;

use crate::GUIDE_ROLE;
use crate::domain::keypoint::KeyPoint;
use crate::domain::tour::Tour;
use crate::forms::keypoint::{CreateKeyPointForm, UpdateKeyPointForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{KeyPointReader, KeyPointWriter, TourReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

fn owned_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<Tour>
where
    R: TourReader + ?Sized,
{
    let tour = repo
        .get_tour_by_id(tour_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }
    Ok(tour)
}

/// Lists the key points of one of the caller's tours, in itinerary order.
pub fn list_keypoints<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<Vec<KeyPoint>>
where
    R: TourReader + KeyPointReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;
    owned_tour(repo, user, tour_id)?;

    Ok(repo.list_keypoints_by_tour(tour_id)?)
}

/// Loads a single key point on one of the caller's tours.
pub fn get_keypoint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    keypoint_id: i32,
) -> ServiceResult<KeyPoint>
where
    R: TourReader + KeyPointReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let keypoint = repo
        .get_keypoint_by_id(keypoint_id)?
        .ok_or(ServiceError::NotFound)?;
    owned_tour(repo, user, keypoint.tour_id)?;

    Ok(keypoint)
}

/// Adds a key point to one of the caller's tours.
pub fn create_keypoint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CreateKeyPointForm,
) -> ServiceResult<KeyPoint>
where
    R: TourReader + KeyPointWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;
    form.validate()?;
    owned_tour(repo, user, form.tour_id)?;

    repo.create_keypoint(&form.into()).map_err(|err| {
        log::error!("Failed to create key point: {err}");
        err.into()
    })
}

/// Edits a key point on one of the caller's tours.
pub fn update_keypoint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    keypoint_id: i32,
    form: UpdateKeyPointForm,
) -> ServiceResult<KeyPoint>
where
    R: TourReader + KeyPointReader + KeyPointWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;
    form.validate()?;

    let keypoint = repo
        .get_keypoint_by_id(keypoint_id)?
        .ok_or(ServiceError::NotFound)?;
    owned_tour(repo, user, keypoint.tour_id)?;

    repo.update_keypoint(keypoint_id, &form.into()).map_err(|err| {
        log::error!("Failed to update key point {keypoint_id}: {err}");
        err.into()
    })
}

/// Removes a key point from one of the caller's tours.
pub fn delete_keypoint<R>(
    repo: &R,
    user: &AuthenticatedUser,
    keypoint_id: i32,
) -> ServiceResult<()>
where
    R: TourReader + KeyPointReader + KeyPointWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let keypoint = repo
        .get_keypoint_by_id(keypoint_id)?
        .ok_or(ServiceError::NotFound)?;
    owned_tour(repo, user, keypoint.tour_id)?;

    repo.delete_keypoint(keypoint_id)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::keypoint::{NewKeyPoint, UpdateKeyPoint};
    use crate::domain::tour::TourState;
    use crate::repository::TourListQuery;
    use crate::repository::errors::RepositoryResult;

    struct MockRepo {
        tour: Option<Tour>,
        keypoint: Option<KeyPoint>,
        deleted: RefCell<Vec<i32>>,
    }

    impl MockRepo {
        fn new(tour: Option<Tour>, keypoint: Option<KeyPoint>) -> Self {
            Self {
                tour,
                keypoint,
                deleted: RefCell::new(Vec::new()),
            }
        }
    }

    impl TourReader for MockRepo {
        fn get_tour_by_id(&self, _id: i32) -> RepositoryResult<Option<Tour>> {
            Ok(self.tour.clone())
        }

        fn list_tours(&self, _query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)> {
            Ok((0, Vec::new()))
        }

        fn list_tours_by_ids(&self, _ids: &[i32]) -> RepositoryResult<Vec<Tour>> {
            Ok(Vec::new())
        }
    }

    impl KeyPointReader for MockRepo {
        fn get_keypoint_by_id(&self, _id: i32) -> RepositoryResult<Option<KeyPoint>> {
            Ok(self.keypoint.clone())
        }

        fn list_keypoints_by_tour(&self, _tour_id: i32) -> RepositoryResult<Vec<KeyPoint>> {
            Ok(self.keypoint.clone().into_iter().collect())
        }

        fn count_keypoints(&self, _tour_id: i32) -> RepositoryResult<usize> {
            Ok(usize::from(self.keypoint.is_some()))
        }
    }

    impl KeyPointWriter for MockRepo {
        fn create_keypoint(&self, new_keypoint: &NewKeyPoint) -> RepositoryResult<KeyPoint> {
            Ok(KeyPoint {
                id: 10,
                tour_id: new_keypoint.tour_id,
                name: new_keypoint.name.clone(),
                description: new_keypoint.description.clone(),
                latitude: new_keypoint.latitude,
                longitude: new_keypoint.longitude,
                image_url: new_keypoint.image_url.clone(),
                order: new_keypoint.order,
            })
        }

        fn update_keypoint(
            &self,
            _keypoint_id: i32,
            _updates: &UpdateKeyPoint,
        ) -> RepositoryResult<KeyPoint> {
            Ok(self.keypoint.clone().expect("keypoint exists"))
        }

        fn delete_keypoint(&self, keypoint_id: i32) -> RepositoryResult<()> {
            self.deleted.borrow_mut().push(keypoint_id);
            Ok(())
        }
    }

    fn guide(user_id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            username: "guide".to_string(),
            role: GUIDE_ROLE.to_string(),
        }
    }

    fn tour(guide_id: i32) -> Tour {
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

    fn keypoint(tour_id: i32) -> KeyPoint {
        KeyPoint {
            id: 10,
            tour_id,
            name: "Main square".to_string(),
            description: "Starting point by the fountain".to_string(),
            latitude: 45.25,
            longitude: 19.84,
            image_url: None,
            order: 1,
        }
    }

    fn create_form(tour_id: i32) -> CreateKeyPointForm {
        CreateKeyPointForm {
            tour_id,
            name: "Main square".to_string(),
            description: "Starting point by the fountain".to_string(),
            latitude: 45.25,
            longitude: 19.84,
            image_url: None,
            order: 1,
        }
    }

    #[test]
    fn create_rejects_foreign_tour() {
        let repo = MockRepo::new(Some(tour(99)), None);

        let result = create_keypoint(&repo, &guide(7), create_form(1));

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn create_rejects_missing_tour() {
        let repo = MockRepo::new(None, None);

        let result = create_keypoint(&repo, &guide(7), create_form(1));

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_rejects_invalid_coordinates() {
        let repo = MockRepo::new(Some(tour(7)), None);
        let mut form = create_form(1);
        form.latitude = 123.0;

        let result = create_keypoint(&repo, &guide(7), form);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn create_succeeds_on_own_tour() {
        let repo = MockRepo::new(Some(tour(7)), None);

        let keypoint = create_keypoint(&repo, &guide(7), create_form(1)).expect("should create");

        assert_eq!(keypoint.tour_id, 1);
        assert_eq!(keypoint.order, 1);
    }

    #[test]
    fn delete_checks_ownership_through_the_tour() {
        let repo = MockRepo::new(Some(tour(99)), Some(keypoint(1)));

        let result = delete_keypoint(&repo, &guide(7), 10);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
        assert!(repo.deleted.borrow().is_empty());
    }

    #[test]
    fn delete_removes_own_keypoint() {
        let repo = MockRepo::new(Some(tour(7)), Some(keypoint(1)));

        delete_keypoint(&repo, &guide(7), 10).expect("should delete");

        assert_eq!(repo.deleted.borrow().as_slice(), &[10]);
    }
}
