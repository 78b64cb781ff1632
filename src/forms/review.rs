use serde::Deserialize;
use validator::Validate;

use crate::domain::review::NewTourReview;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for reviewing a tour from a purchase. The low-rating comment
/// rule is enforced in the review service, not here.
pub struct CreateReviewForm {
    pub tour_purchase_id: i32,
    pub tour_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    pub comment: Option<String>,
}

impl CreateReviewForm {
    #[must_use]
    pub fn into_new_review(self, tourist_id: i32) -> NewTourReview {
        NewTourReview::new(
            self.tour_purchase_id,
            self.tour_id,
            tourist_id,
            self.rating,
            self.comment,
        )
    }
}
