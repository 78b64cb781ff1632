use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Rating a review must not exceed.
pub const MAX_RATING: i32 = 5;
/// Ratings at or below this threshold must carry an explanatory comment.
pub const LOW_RATING_COMMENT_THRESHOLD: i32 = 2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TourReview {
    pub id: i32,
    pub purchase_id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewed_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTourReview {
    pub purchase_id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
}

impl NewTourReview {
    #[must_use]
    pub fn new(
        purchase_id: i32,
        tour_id: i32,
        tourist_id: i32,
        rating: i32,
        comment: Option<String>,
    ) -> Self {
        Self {
            purchase_id,
            tour_id,
            tourist_id,
            rating,
            comment: comment
                .map(|s| ammonia::clean(s.trim()))
                .filter(|s| !s.is_empty()),
        }
    }
}

/// Aggregated ratings for one tour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewStatistics {
    pub tour_id: i32,
    pub average_rating: f64,
    pub total_reviews: i64,
    /// Review counts indexed by rating; `rating_counts[0]` holds one-star
    /// reviews.
    pub rating_counts: [i64; MAX_RATING as usize],
}

impl ReviewStatistics {
    /// Folds a list of ratings into per-star counts and an average.
    #[must_use]
    pub fn from_ratings(tour_id: i32, ratings: &[i32]) -> Self {
        let mut stats = Self {
            tour_id,
            ..Self::default()
        };
        let mut sum = 0i64;
        for &rating in ratings {
            if (1..=MAX_RATING).contains(&rating) {
                stats.rating_counts[(rating - 1) as usize] += 1;
                stats.total_reviews += 1;
                sum += i64::from(rating);
            }
        }
        if stats.total_reviews > 0 {
            stats.average_rating = sum as f64 / stats.total_reviews as f64;
        }
        stats
    }
}
