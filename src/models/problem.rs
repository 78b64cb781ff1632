use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::problem::{
    NewTourProblem as DomainNewTourProblem, TourProblem as DomainTourProblem,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tour_problems)]
/// Diesel model for [`crate::domain::problem::TourProblem`].
pub struct TourProblem {
    pub id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub title: String,
    pub description: String,
    pub status: i32,
    pub reported_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub review_requested_at: Option<NaiveDateTime>,
    pub rejected_at: Option<NaiveDateTime>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tour_problems)]
/// Insertable form of [`TourProblem`]. New reports always start pending.
pub struct NewTourProblem<'a> {
    pub tour_id: i32,
    pub tourist_id: i32,
    pub title: &'a str,
    pub description: &'a str,
}

impl TryFrom<TourProblem> for DomainTourProblem {
    type Error = UnknownValue;

    fn try_from(problem: TourProblem) -> Result<Self, Self::Error> {
        Ok(Self {
            id: problem.id,
            tour_id: problem.tour_id,
            tourist_id: problem.tourist_id,
            title: problem.title,
            description: problem.description,
            status: problem.status.try_into()?,
            reported_at: problem.reported_at,
            resolved_at: problem.resolved_at,
            review_requested_at: problem.review_requested_at,
            rejected_at: problem.rejected_at,
        })
    }
}

impl<'a> From<&'a DomainNewTourProblem> for NewTourProblem<'a> {
    fn from(problem: &'a DomainNewTourProblem) -> Self {
        Self {
            tour_id: problem.tour_id,
            tourist_id: problem.tourist_id,
            title: problem.title.as_str(),
            description: problem.description.as_str(),
        }
    }
}
