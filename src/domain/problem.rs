use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

/// Problem a tourist reported on a purchased tour.
///
/// Lifecycle: reported as `Pending`, the guide either resolves it or
/// escalates it to `UnderReview`, and an administrator then returns it to the
/// guide (back to `Pending`) or rejects it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TourProblem {
    pub id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub title: String,
    pub description: String,
    pub status: TourProblemStatus,
    pub reported_at: NaiveDateTime,
    pub resolved_at: Option<NaiveDateTime>,
    pub review_requested_at: Option<NaiveDateTime>,
    pub rejected_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TourProblemStatus {
    Pending,
    Resolved,
    UnderReview,
    Rejected,
}

impl TourProblemStatus {
    /// Transitions allowed from this status.
    #[must_use]
    pub fn can_transition_to(self, next: TourProblemStatus) -> bool {
        matches!(
            (self, next),
            (TourProblemStatus::Pending, TourProblemStatus::Resolved)
                | (TourProblemStatus::Pending, TourProblemStatus::UnderReview)
                | (TourProblemStatus::UnderReview, TourProblemStatus::Resolved)
                | (TourProblemStatus::UnderReview, TourProblemStatus::Pending)
                | (TourProblemStatus::UnderReview, TourProblemStatus::Rejected)
        )
    }
}

impl From<TourProblemStatus> for i32 {
    fn from(status: TourProblemStatus) -> Self {
        match status {
            TourProblemStatus::Pending => 0,
            TourProblemStatus::Resolved => 1,
            TourProblemStatus::UnderReview => 2,
            TourProblemStatus::Rejected => 3,
        }
    }
}

impl TryFrom<i32> for TourProblemStatus {
    type Error = UnknownValue;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TourProblemStatus::Pending),
            1 => Ok(TourProblemStatus::Resolved),
            2 => Ok(TourProblemStatus::UnderReview),
            3 => Ok(TourProblemStatus::Rejected),
            other => Err(UnknownValue::new("tour problem status", other)),
        }
    }
}

impl Display for TourProblemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourProblemStatus::Pending => write!(f, "Pending"),
            TourProblemStatus::Resolved => write!(f, "Resolved"),
            TourProblemStatus::UnderReview => write!(f, "Under Review"),
            TourProblemStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewTourProblem {
    pub tour_id: i32,
    pub tourist_id: i32,
    pub title: String,
    pub description: String,
}

impl NewTourProblem {
    #[must_use]
    pub fn new(tour_id: i32, tourist_id: i32, title: String, description: String) -> Self {
        Self {
            tour_id,
            tourist_id,
            title: ammonia::clean(title.trim()),
            description: ammonia::clean(description.trim()),
        }
    }
}
