use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

/// Key points a tour must collect before it can be published.
pub const MIN_KEYPOINTS_TO_PUBLISH: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tour {
    pub id: i32,
    pub guide_id: i32,
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
    pub state: TourState,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Tour {
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.state == TourState::Complete
    }

    #[must_use]
    pub fn has_departed(&self, now: NaiveDateTime) -> bool {
        self.date <= now
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TourState {
    Draft,
    Complete,
}

impl From<TourState> for i32 {
    fn from(state: TourState) -> Self {
        match state {
            TourState::Draft => 0,
            TourState::Complete => 1,
        }
    }
}

impl TryFrom<i32> for TourState {
    type Error = UnknownValue;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TourState::Draft),
            1 => Ok(TourState::Complete),
            other => Err(UnknownValue::new("tour state", other)),
        }
    }
}

impl Display for TourState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourState::Draft => write!(f, "Draft"),
            TourState::Complete => write!(f, "Complete"),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTour {
    pub guide_id: i32,
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
}

impl NewTour {
    #[must_use]
    pub fn new(
        guide_id: i32,
        name: String,
        description: String,
        difficulty: i32,
        category: i32,
        price: f64,
        date: NaiveDateTime,
    ) -> Self {
        Self {
            guide_id,
            name: name.trim().to_string(),
            description: ammonia::clean(description.trim()),
            difficulty,
            category,
            price,
            date,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateTour {
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
    pub state: TourState,
}

impl UpdateTour {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        difficulty: i32,
        category: i32,
        price: f64,
        date: NaiveDateTime,
        state: TourState,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: ammonia::clean(description.trim()),
            difficulty,
            category,
            price,
            date,
            state,
        }
    }
}
