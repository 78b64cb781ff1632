use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::domain::tour::{NewTour, TourState, UpdateTour};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for creating a tour. Extra fields the client sends (id, state)
/// are ignored; new tours always start as drafts.
pub struct CreateTourForm {
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(min = 1, max = 4))]
    pub difficulty: i32,
    #[validate(range(min = 1, max = 5))]
    pub category: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    /// Departure date and time, ISO-8601 with timezone.
    pub date: DateTime<Utc>,
}

impl CreateTourForm {
    #[must_use]
    pub fn into_new_tour(self, guide_id: i32) -> NewTour {
        NewTour::new(
            guide_id,
            self.name,
            self.description,
            self.difficulty,
            self.category,
            self.price,
            self.date.naive_utc(),
        )
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for updating a tour, including the publish transition
/// (`state` moving from draft to complete).
pub struct UpdateTourForm {
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(min = 1, max = 4))]
    pub difficulty: i32,
    #[validate(range(min = 1, max = 5))]
    pub category: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub date: DateTime<Utc>,
    #[validate(range(min = 0, max = 1))]
    pub state: i32,
}

impl UpdateTourForm {
    pub fn state(&self) -> Result<TourState, crate::domain::UnknownValue> {
        TourState::try_from(self.state)
    }

    #[must_use]
    pub fn into_update_tour(self, state: TourState) -> UpdateTour {
        UpdateTour::new(
            self.name,
            self.description,
            self.difficulty,
            self.category,
            self.price,
            self.date.naive_utc(),
            state,
        )
    }
}
