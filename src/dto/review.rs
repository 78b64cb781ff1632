use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::review::{ReviewStatistics, TourReview};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourReviewDto {
    pub id: i32,
    pub tour_purchase_id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub review_date: NaiveDateTime,
}

impl From<TourReview> for TourReviewDto {
    fn from(review: TourReview) -> Self {
        Self {
            id: review.id,
            tour_purchase_id: review.purchase_id,
            tour_id: review.tour_id,
            tourist_id: review.tourist_id,
            rating: review.rating,
            comment: review.comment,
            review_date: review.reviewed_at,
        }
    }
}

/// Query parameters of the review eligibility check.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanReviewQuery {
    pub purchase_id: i32,
    pub tour_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatisticsDto {
    pub tour_id: i32,
    pub average_rating: f64,
    pub total_reviews: i64,
    pub rating5_count: i64,
    pub rating4_count: i64,
    pub rating3_count: i64,
    pub rating2_count: i64,
    pub rating1_count: i64,
}

impl From<ReviewStatistics> for ReviewStatisticsDto {
    fn from(stats: ReviewStatistics) -> Self {
        let [ones, twos, threes, fours, fives] = stats.rating_counts;
        Self {
            tour_id: stats.tour_id,
            average_rating: stats.average_rating,
            total_reviews: stats.total_reviews,
            rating5_count: fives,
            rating4_count: fours,
            rating3_count: threes,
            rating2_count: twos,
            rating1_count: ones,
        }
    }
}
