use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

/// Request by a guide to hand one of their tours over to another guide.
///
/// Stays `Pending` until another guide accepts it, the requester cancels it,
/// or the tour date passes and the maintenance job expires it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TourReplacement {
    pub id: i32,
    pub tour_id: i32,
    pub original_guide_id: i32,
    pub replacement_guide_id: Option<i32>,
    pub status: TourReplacementStatus,
    pub requested_at: NaiveDateTime,
    pub accepted_at: Option<NaiveDateTime>,
    pub cancelled_at: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TourReplacementStatus {
    Pending,
    Accepted,
    Cancelled,
    Expired,
}

impl From<TourReplacementStatus> for i32 {
    fn from(status: TourReplacementStatus) -> Self {
        match status {
            TourReplacementStatus::Pending => 0,
            TourReplacementStatus::Accepted => 1,
            TourReplacementStatus::Cancelled => 2,
            TourReplacementStatus::Expired => 3,
        }
    }
}

impl TryFrom<i32> for TourReplacementStatus {
    type Error = UnknownValue;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TourReplacementStatus::Pending),
            1 => Ok(TourReplacementStatus::Accepted),
            2 => Ok(TourReplacementStatus::Cancelled),
            3 => Ok(TourReplacementStatus::Expired),
            other => Err(UnknownValue::new("tour replacement status", other)),
        }
    }
}

impl Display for TourReplacementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourReplacementStatus::Pending => write!(f, "Pending"),
            TourReplacementStatus::Accepted => write!(f, "Accepted"),
            TourReplacementStatus::Cancelled => write!(f, "Cancelled"),
            TourReplacementStatus::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewTourReplacement {
    pub tour_id: i32,
    pub original_guide_id: i32,
}
