use serde::{Deserialize, Serialize};

use crate::domain::keypoint::KeyPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPointDto {
    pub id: i32,
    pub tour_id: i32,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub order: i32,
}

impl From<KeyPoint> for KeyPointDto {
    fn from(keypoint: KeyPoint) -> Self {
        Self {
            id: keypoint.id,
            tour_id: keypoint.tour_id,
            name: keypoint.name,
            description: keypoint.description,
            latitude: keypoint.latitude,
            longitude: keypoint.longitude,
            image_url: keypoint.image_url,
            order: keypoint.order,
        }
    }
}
