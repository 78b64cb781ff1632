use serde::Deserialize;
use validator::Validate;

use crate::domain::keypoint::{NewKeyPoint, UpdateKeyPoint};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for placing a key point on a tour map.
pub struct CreateKeyPointForm {
    pub tour_id: i32,
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(url)]
    pub image_url: Option<String>,
    /// 1-based position within the itinerary.
    #[validate(range(min = 1))]
    pub order: i32,
}

impl From<CreateKeyPointForm> for NewKeyPoint {
    fn from(form: CreateKeyPointForm) -> Self {
        NewKeyPoint::new(
            form.tour_id,
            form.name,
            form.description,
            form.latitude,
            form.longitude,
            form.image_url,
            form.order,
        )
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Form data for editing an existing key point.
pub struct UpdateKeyPointForm {
    #[validate(length(min = 3))]
    pub name: String,
    #[validate(length(min = 10))]
    pub description: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(range(min = 1))]
    pub order: i32,
}

impl From<UpdateKeyPointForm> for UpdateKeyPoint {
    fn from(form: UpdateKeyPointForm) -> Self {
        UpdateKeyPoint::new(
            form.name,
            form.description,
            form.latitude,
            form.longitude,
            form.image_url,
            form.order,
        )
    }
}
