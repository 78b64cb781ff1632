//! Repository implementation for reported tour problems.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::problem::{NewTourProblem, TourProblem, TourProblemStatus};
use crate::domain::tour::Tour;
use crate::domain::user::User;
use crate::models::problem::{NewTourProblem as DbNewTourProblem, TourProblem as DbTourProblem};
use crate::models::tour::Tour as DbTour;
use crate::models::user::User as DbUser;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProblemListQuery, ProblemReader, ProblemWriter};

fn attach_context(
    conn: &mut SqliteConnection,
    heads: Vec<DbTourProblem>,
) -> RepositoryResult<Vec<(TourProblem, Tour, User)>> {
    use crate::schema::{tours, users};

    let tour_ids: Vec<i32> = {
        let set: HashSet<i32> = heads.iter().map(|p| p.tour_id).collect();
        set.into_iter().collect()
    };
    let tourist_ids: Vec<i32> = {
        let set: HashSet<i32> = heads.iter().map(|p| p.tourist_id).collect();
        set.into_iter().collect()
    };

    let tour_map: HashMap<i32, DbTour> = tours::table
        .filter(tours::id.eq_any(tour_ids))
        .load::<DbTour>(conn)?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();
    let user_map: HashMap<i32, DbUser> = users::table
        .filter(users::id.eq_any(tourist_ids))
        .load::<DbUser>(conn)?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let mut combined = Vec::with_capacity(heads.len());
    for head in heads {
        let Some(db_tour) = tour_map.get(&head.tour_id) else {
            continue;
        };
        let Some(db_user) = user_map.get(&head.tourist_id) else {
            continue;
        };
        combined.push((
            TourProblem::try_from(head).map_err(RepositoryError::from)?,
            Tour::try_from(db_tour.clone()).map_err(RepositoryError::from)?,
            User::try_from(db_user.clone()).map_err(RepositoryError::from)?,
        ));
    }

    Ok(combined)
}

impl ProblemReader for DieselRepository {
    fn get_problem_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<(TourProblem, Tour, User)>> {
        use crate::schema::tour_problems;

        let mut conn = self.conn()?;
        let head = tour_problems::table
            .find(id)
            .first::<DbTourProblem>(&mut conn)
            .optional()?;

        match head {
            Some(head) => Ok(attach_context(&mut conn, vec![head])?.into_iter().next()),
            None => Ok(None),
        }
    }

    fn list_problems(
        &self,
        query: ProblemListQuery,
    ) -> RepositoryResult<(usize, Vec<(TourProblem, Tour, User)>)> {
        use crate::schema::{tour_problems, tours};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = tour_problems::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(tourist_id) = query.tourist_id {
                items = items.filter(tour_problems::tourist_id.eq(tourist_id));
            }
            if let Some(guide_id) = query.guide_id {
                let owned_tours = tours::table
                    .filter(tours::guide_id.eq(guide_id))
                    .select(tours::id);
                items = items.filter(tour_problems::tour_id.eq_any(owned_tours));
            }
            if let Some(status) = query.status {
                items = items.filter(tour_problems::status.eq(i32::from(status)));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder().order((
            tour_problems::reported_at.desc(),
            tour_problems::id.desc(),
        ));

        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let heads = items.load::<DbTourProblem>(&mut conn)?;
        let combined = attach_context(&mut conn, heads)?;

        Ok((total, combined))
    }
}

impl ProblemWriter for DieselRepository {
    fn create_problem(&self, new_problem: &NewTourProblem) -> RepositoryResult<TourProblem> {
        use crate::schema::tour_problems;

        let mut conn = self.conn()?;
        let db_new_problem: DbNewTourProblem = new_problem.into();

        let problem = diesel::insert_into(tour_problems::table)
            .values(&db_new_problem)
            .get_result::<DbTourProblem>(&mut conn)?;

        TourProblem::try_from(problem).map_err(RepositoryError::from)
    }

    fn set_problem_status(
        &self,
        problem_id: i32,
        status: TourProblemStatus,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourProblem> {
        use crate::schema::tour_problems;

        let mut conn = self.conn()?;
        let target = tour_problems::table.find(problem_id);
        let code = i32::from(status);

        let problem = match status {
            TourProblemStatus::Resolved => diesel::update(target)
                .set((
                    tour_problems::status.eq(code),
                    tour_problems::resolved_at.eq(Some(at)),
                ))
                .get_result::<DbTourProblem>(&mut conn)?,
            TourProblemStatus::UnderReview => diesel::update(target)
                .set((
                    tour_problems::status.eq(code),
                    tour_problems::review_requested_at.eq(Some(at)),
                ))
                .get_result::<DbTourProblem>(&mut conn)?,
            TourProblemStatus::Rejected => diesel::update(target)
                .set((
                    tour_problems::status.eq(code),
                    tour_problems::rejected_at.eq(Some(at)),
                ))
                .get_result::<DbTourProblem>(&mut conn)?,
            // Returned to the guide; the escalation mark is withdrawn.
            TourProblemStatus::Pending => diesel::update(target)
                .set((
                    tour_problems::status.eq(code),
                    tour_problems::review_requested_at.eq(None::<NaiveDateTime>),
                ))
                .get_result::<DbTourProblem>(&mut conn)?,
        };

        TourProblem::try_from(problem).map_err(RepositoryError::from)
    }
}
