use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyPoint {
    pub id: i32,
    pub tour_id: i32,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    /// 1-based position within the tour itinerary.
    pub order: i32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewKeyPoint {
    pub tour_id: i32,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub order: i32,
}

impl NewKeyPoint {
    #[must_use]
    pub fn new(
        tour_id: i32,
        name: String,
        description: String,
        latitude: f64,
        longitude: f64,
        image_url: Option<String>,
        order: i32,
    ) -> Self {
        Self {
            tour_id,
            name: name.trim().to_string(),
            description: ammonia::clean(description.trim()),
            latitude,
            longitude,
            image_url: image_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            order,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateKeyPoint {
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub order: i32,
}

impl UpdateKeyPoint {
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        latitude: f64,
        longitude: f64,
        image_url: Option<String>,
        order: i32,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: ammonia::clean(description.trim()),
            latitude,
            longitude,
            image_url: image_url
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            order,
        }
    }
}
