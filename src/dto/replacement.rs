use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::replacement::TourReplacement;
use crate::domain::tour::Tour;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourReplacementDto {
    pub id: i32,
    pub tour_id: i32,
    pub original_guide_id: i32,
    pub replacement_guide_id: Option<i32>,
    /// 0 pending, 1 accepted, 2 cancelled, 3 expired.
    pub status: i32,
    pub requested_at: NaiveDateTime,
    pub accepted_at: Option<NaiveDateTime>,
    pub cancelled_at: Option<NaiveDateTime>,
}

impl From<TourReplacement> for TourReplacementDto {
    fn from(replacement: TourReplacement) -> Self {
        Self {
            id: replacement.id,
            tour_id: replacement.tour_id,
            original_guide_id: replacement.original_guide_id,
            replacement_guide_id: replacement.replacement_guide_id,
            status: replacement.status.into(),
            requested_at: replacement.requested_at,
            accepted_at: replacement.accepted_at,
            cancelled_at: replacement.cancelled_at,
        }
    }
}

/// Takeover-board entry: the request joined with the tour on offer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableReplacementDto {
    pub replacement_id: i32,
    pub tour_id: i32,
    pub tour_name: String,
    pub tour_description: String,
    pub tour_date: NaiveDateTime,
    pub tour_difficulty: i32,
    pub tour_category: i32,
    pub tour_price: f64,
    pub original_guide_id: i32,
    pub requested_at: NaiveDateTime,
}

impl From<(TourReplacement, Tour)> for AvailableReplacementDto {
    fn from((replacement, tour): (TourReplacement, Tour)) -> Self {
        Self {
            replacement_id: replacement.id,
            tour_id: tour.id,
            tour_name: tour.name,
            tour_description: tour.description,
            tour_date: tour.date,
            tour_difficulty: tour.difficulty,
            tour_category: tour.category,
            tour_price: tour.price,
            original_guide_id: replacement.original_guide_id,
            requested_at: replacement.requested_at,
        }
    }
}
