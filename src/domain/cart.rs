use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A tourist's shopping cart. Holds at most one entry per tour.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ShoppingCart {
    pub id: i32,
    pub tourist_id: i32,
    pub tour_ids: Vec<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ShoppingCart {
    #[must_use]
    pub fn contains(&self, tour_id: i32) -> bool {
        self.tour_ids.contains(&tour_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tour_ids.is_empty()
    }
}
