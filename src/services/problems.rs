//! Tour problem services for tourists, guides and administrators.

use chrono::Utc;
use validator::Validate;

use crate::domain::problem::{TourProblem, TourProblemStatus};
use crate::domain::tour::Tour;
use crate::domain::user::User;
use crate::forms::problem::ReportProblemForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    Pagination, ProblemListQuery, ProblemReader, ProblemWriter, PurchaseReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{ADMINISTRATOR_ROLE, GUIDE_ROLE, TOURIST_ROLE};

/// A problem joined with its tour and the reporting tourist.
pub type ProblemRecord = (TourProblem, Tour, User);

/// Reports a problem on a tour the caller has actually bought.
pub fn report_problem<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ReportProblemForm,
) -> ServiceResult<ProblemRecord>
where
    R: PurchaseReader + ProblemReader + ProblemWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    form.validate()?;

    if !repo.has_completed_purchase_of_tour(user.user_id, form.tour_id)? {
        return Err(ServiceError::Validation(
            "Problems can only be reported on purchased tours".to_string(),
        ));
    }

    let problem = repo
        .create_problem(&form.into_new_problem(user.user_id))
        .map_err(|err| {
            log::error!("Failed to report problem: {err}");
            err
        })?;
    repo.get_problem_by_id(problem.id)?
        .ok_or(ServiceError::NotFound)
}

/// The caller's reported problems, newest first.
pub fn my_problems<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<ProblemRecord>)>
where
    R: ProblemReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let query = ProblemListQuery::new()
        .tourist(user.user_id)
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_problems(query)?)
}

/// Loads one of the caller's reported problems.
pub fn get_my_problem<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_problem_by_id(problem_id)?
        .filter(|(problem, _, _)| problem.tourist_id == user.user_id)
        .ok_or(ServiceError::NotFound)
}

/// Problems reported on the caller's tours, newest first.
pub fn guide_problems<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<ProblemRecord>)>
where
    R: ProblemReader + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let query = ProblemListQuery::new()
        .guide(user.user_id)
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_problems(query)?)
}

fn transition<R>(
    repo: &R,
    problem_id: i32,
    next: TourProblemStatus,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    let (problem, tour, tourist) = repo
        .get_problem_by_id(problem_id)?
        .ok_or(ServiceError::NotFound)?;

    if !problem.status.can_transition_to(next) {
        return Err(ServiceError::Conflict(format!(
            "Problem cannot move from {} to {next}",
            problem.status
        )));
    }

    let updated = repo
        .set_problem_status(problem_id, next, Utc::now().naive_utc())
        .map_err(|err| {
            log::error!("Failed to move problem {problem_id} to {next}: {err}");
            err
        })?;
    Ok((updated, tour, tourist))
}

fn guide_transition<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
    next: TourProblemStatus,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    ensure_role(user, GUIDE_ROLE)?;

    let (_, tour, _) = repo
        .get_problem_by_id(problem_id)?
        .ok_or(ServiceError::NotFound)?;
    if tour.guide_id != user.user_id {
        return Err(ServiceError::Forbidden);
    }

    transition(repo, problem_id, next)
}

/// The guide marks a problem on one of their tours as dealt with.
pub fn resolve_problem<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    guide_transition(repo, user, problem_id, TourProblemStatus::Resolved)
}

/// The guide escalates a problem to an administrator.
pub fn send_to_administrator<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    guide_transition(repo, user, problem_id, TourProblemStatus::UnderReview)
}

/// Escalated problems waiting for an administrator, oldest first.
pub fn problems_under_review<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<ProblemRecord>)>
where
    R: ProblemReader + ?Sized,
{
    ensure_role(user, ADMINISTRATOR_ROLE)?;

    let query = ProblemListQuery::new()
        .status(TourProblemStatus::UnderReview)
        .paginate(pagination.page, pagination.per_page);
    Ok(repo.list_problems(query)?)
}

/// The administrator sends an escalated problem back to its guide.
pub fn return_to_guide<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    ensure_role(user, ADMINISTRATOR_ROLE)?;
    transition(repo, problem_id, TourProblemStatus::Pending)
}

/// The administrator rejects an escalated problem as unfounded.
pub fn reject_problem<R>(
    repo: &R,
    user: &AuthenticatedUser,
    problem_id: i32,
) -> ServiceResult<ProblemRecord>
where
    R: ProblemReader + ProblemWriter + ?Sized,
{
    ensure_role(user, ADMINISTRATOR_ROLE)?;
    transition(repo, problem_id, TourProblemStatus::Rejected)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::problem::NewTourProblem;
    use crate::domain::tour::TourState;
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryResult;

    struct MockRepo {
        record: Option<ProblemRecord>,
        has_purchase: bool,
        created: RefCell<Option<NewTourProblem>>,
        status_changes: RefCell<Vec<(i32, TourProblemStatus)>>,
    }

    impl MockRepo {
        fn new(record: Option<ProblemRecord>) -> Self {
            Self {
                record,
                has_purchase: true,
                created: RefCell::new(None),
                status_changes: RefCell::new(Vec::new()),
            }
        }
    }

    impl PurchaseReader for MockRepo {
        fn get_purchase_by_id(
            &self,
            _id: i32,
        ) -> RepositoryResult<Option<crate::domain::purchase::TourPurchase>> {
            Ok(None)
        }

        fn list_purchases_by_tourist(
            &self,
            _tourist_id: i32,
            _pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<crate::domain::purchase::TourPurchase>)> {
            Ok((0, Vec::new()))
        }

        fn has_completed_purchase_of_tour(
            &self,
            _tourist_id: i32,
            _tour_id: i32,
        ) -> RepositoryResult<bool> {
            Ok(self.has_purchase)
        }
    }

    impl ProblemReader for MockRepo {
        fn get_problem_by_id(&self, _id: i32) -> RepositoryResult<Option<ProblemRecord>> {
            Ok(self.record.clone())
        }

        fn list_problems(
            &self,
            _query: ProblemListQuery,
        ) -> RepositoryResult<(usize, Vec<ProblemRecord>)> {
            Ok((0, Vec::new()))
        }
    }

    impl ProblemWriter for MockRepo {
        fn create_problem(&self, new_problem: &NewTourProblem) -> RepositoryResult<TourProblem> {
            *self.created.borrow_mut() = Some(new_problem.clone());
            Ok(TourProblem {
                id: 1,
                tour_id: new_problem.tour_id,
                tourist_id: new_problem.tourist_id,
                title: new_problem.title.clone(),
                description: new_problem.description.clone(),
                status: TourProblemStatus::Pending,
                reported_at: Utc::now().naive_utc(),
                resolved_at: None,
                review_requested_at: None,
                rejected_at: None,
            })
        }

        fn set_problem_status(
            &self,
            problem_id: i32,
            status: TourProblemStatus,
            at: chrono::NaiveDateTime,
        ) -> RepositoryResult<TourProblem> {
            self.status_changes.borrow_mut().push((problem_id, status));
            let (mut problem, _, _) = self.record.clone().expect("problem exists");
            problem.status = status;
            match status {
                TourProblemStatus::Resolved => problem.resolved_at = Some(at),
                TourProblemStatus::UnderReview => problem.review_requested_at = Some(at),
                TourProblemStatus::Rejected => problem.rejected_at = Some(at),
                TourProblemStatus::Pending => {}
            }
            Ok(problem)
        }
    }

    fn record(status: TourProblemStatus, guide_id: i32) -> ProblemRecord {
        let now = Utc::now().naive_utc();
        let problem = TourProblem {
            id: 1,
            tour_id: 3,
            tourist_id: 1,
            title: "No meeting point".to_string(),
            description: "The guide never published a meeting point".to_string(),
            status,
            reported_at: now,
            resolved_at: None,
            review_requested_at: None,
            rejected_at: None,
        };
        let tour = Tour {
            id: 3,
            guide_id,
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price: 30.0,
            date: now + Duration::days(14),
            state: TourState::Complete,
            created_at: now,
            updated_at: now,
        };
        let tourist = User {
            id: 1,
            username: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "hash".to_string(),
            name: "Ana".to_string(),
            surname: "Ivic".to_string(),
            role: UserRole::Tourist,
            receive_recommendations: false,
            failed_logins: 0,
            blocked: false,
            block_count: 0,
            created_at: now,
            updated_at: now,
        };
        (problem, tour, tourist)
    }

    fn tourist() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            username: "ana".to_string(),
            role: TOURIST_ROLE.to_string(),
        }
    }

    fn guide(user_id: i32) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id,
            username: "guide".to_string(),
            role: GUIDE_ROLE.to_string(),
        }
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 50,
            username: "admin".to_string(),
            role: ADMINISTRATOR_ROLE.to_string(),
        }
    }

    fn report_form() -> ReportProblemForm {
        ReportProblemForm {
            tour_id: 3,
            title: "No meeting point".to_string(),
            description: "The guide never published a meeting point".to_string(),
        }
    }

    #[test]
    fn reporting_requires_a_purchase() {
        let mut repo = MockRepo::new(None);
        repo.has_purchase = false;

        let result = report_problem(&repo, &tourist(), report_form());

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn reporting_creates_a_pending_problem() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Pending, 7)));

        let (problem, tour, _) =
            report_problem(&repo, &tourist(), report_form()).expect("should report");

        assert_eq!(problem.status, TourProblemStatus::Pending);
        assert_eq!(problem.tourist_id, 1);
        assert_eq!(tour.id, 3);
        let created = repo.created.borrow();
        assert_eq!(created.as_ref().map(|p| p.tour_id), Some(3));
    }

    #[test]
    fn guide_resolves_pending_problem() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Pending, 7)));

        let (problem, _, _) = resolve_problem(&repo, &guide(7), 1).expect("should resolve");

        assert_eq!(problem.status, TourProblemStatus::Resolved);
        assert!(problem.resolved_at.is_some());
    }

    #[test]
    fn guide_cannot_touch_foreign_problems() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Pending, 99)));

        let result = resolve_problem(&repo, &guide(7), 1);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
        assert!(repo.status_changes.borrow().is_empty());
    }

    #[test]
    fn resolved_problems_cannot_be_escalated() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Resolved, 7)));

        let result = send_to_administrator(&repo, &guide(7), 1);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn administrator_returns_problem_to_guide() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::UnderReview, 7)));

        let (problem, _, _) = return_to_guide(&repo, &admin(), 1).expect("should return");

        assert_eq!(problem.status, TourProblemStatus::Pending);
    }

    #[test]
    fn administrator_cannot_reject_pending_problems() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Pending, 7)));

        let result = reject_problem(&repo, &admin(), 1);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn guides_cannot_use_administrator_transitions() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::UnderReview, 7)));

        let result = reject_problem(&repo, &guide(7), 1);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn foreign_problems_stay_hidden_from_tourists() {
        let repo = MockRepo::new(Some(record(TourProblemStatus::Pending, 7)));
        let other = AuthenticatedUser {
            user_id: 2,
            username: "marko".to_string(),
            role: TOURIST_ROLE.to_string(),
        };

        let result = get_my_problem(&repo, &other, 1);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
