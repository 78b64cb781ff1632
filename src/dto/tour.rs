use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::CatalogEntry;
use crate::domain::tour::Tour;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDto {
    pub id: i32,
    pub guide_id: i32,
    pub name: String,
    pub description: String,
    pub difficulty: i32,
    pub category: i32,
    pub price: f64,
    pub date: NaiveDateTime,
    /// 0 draft, 1 complete.
    pub state: i32,
}

impl From<Tour> for TourDto {
    fn from(tour: Tour) -> Self {
        Self {
            id: tour.id,
            guide_id: tour.guide_id,
            name: tour.name,
            description: tour.description,
            difficulty: tour.difficulty,
            category: tour.category,
            price: tour.price,
            date: tour.date,
            state: tour.state.into(),
        }
    }
}

/// Filter query for the published-tour catalogue. All fields are optional;
/// `sort_by_date` takes `asc` or `desc`, anything else keeps the default
/// ordering.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourFilterQuery {
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
    pub max_price: Option<f64>,
    pub sort_by_date: Option<String>,
}

/// Catalog entry served by the categories and interests endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<&CatalogEntry> for CategoryDto {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name.to_string(),
        }
    }
}
