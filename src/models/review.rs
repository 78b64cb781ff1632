use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewTourReview as DomainNewTourReview, TourReview as DomainTourReview};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::tour_reviews)]
/// Diesel model for [`crate::domain::review::TourReview`].
pub struct TourReview {
    pub id: i32,
    pub purchase_id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub rating: i32,
    pub comment: Option<String>,
    pub reviewed_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tour_reviews)]
/// Insertable form of [`TourReview`].
pub struct NewTourReview<'a> {
    pub purchase_id: i32,
    pub tour_id: i32,
    pub tourist_id: i32,
    pub rating: i32,
    pub comment: Option<&'a str>,
}

impl From<TourReview> for DomainTourReview {
    fn from(review: TourReview) -> Self {
        Self {
            id: review.id,
            purchase_id: review.purchase_id,
            tour_id: review.tour_id,
            tourist_id: review.tourist_id,
            rating: review.rating,
            comment: review.comment,
            reviewed_at: review.reviewed_at,
        }
    }
}

impl<'a> From<&'a DomainNewTourReview> for NewTourReview<'a> {
    fn from(review: &'a DomainNewTourReview) -> Self {
        Self {
            purchase_id: review.purchase_id,
            tour_id: review.tour_id,
            tourist_id: review.tourist_id,
            rating: review.rating,
            comment: review.comment.as_deref(),
        }
    }
}
