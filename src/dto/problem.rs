use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::problem::TourProblem;
use crate::domain::tour::Tour;
use crate::domain::user::User;

/// Problem read model: the problem row joined with its tour's name and the
/// reporting tourist's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourProblemDto {
    pub id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub title: String,
    pub description: String,
    /// 0 pending, 1 resolved, 2 under review, 3 rejected.
    pub status: i32,
    pub status_name: String,
    pub reported_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub review_requested_at: Option<NaiveDateTime>,
    pub rejected_at: Option<NaiveDateTime>,
    pub tour_name: String,
    pub tourist_name: Option<String>,
}

impl From<(TourProblem, Tour, User)> for TourProblemDto {
    fn from((problem, tour, tourist): (TourProblem, Tour, User)) -> Self {
        Self {
            id: problem.id,
            tour_id: problem.tour_id,
            tourist_id: problem.tourist_id,
            title: problem.title,
            description: problem.description,
            status: problem.status.into(),
            status_name: problem.status.to_string(),
            reported_at: problem.reported_at,
            resolved_at: problem.resolved_at,
            review_requested_at: problem.review_requested_at,
            rejected_at: problem.rejected_at,
            tour_name: tour.name,
            tourist_name: Some(tourist.full_name()),
        }
    }
}
