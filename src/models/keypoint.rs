use diesel::prelude::*;

use crate::domain::keypoint::{
    KeyPoint as DomainKeyPoint, NewKeyPoint as DomainNewKeyPoint,
    UpdateKeyPoint as DomainUpdateKeyPoint,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::keypoints)]
/// Diesel model for [`crate::domain::keypoint::KeyPoint`]. The itinerary
/// position is stored as `position` to keep `order` out of SQL.
pub struct KeyPoint {
    pub id: i32,
    pub tour_id: i32,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<String>,
    pub position: i32,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::keypoints)]
/// Insertable form of [`KeyPoint`].
pub struct NewKeyPoint<'a> {
    pub tour_id: i32,
    pub name: &'a str,
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<&'a str>,
    pub position: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::keypoints)]
/// Data used when updating a [`KeyPoint`] record.
pub struct UpdateKeyPoint<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub latitude: f64,
    pub longitude: f64,
    pub image_url: Option<&'a str>,
    pub position: i32,
}

impl From<KeyPoint> for DomainKeyPoint {
    fn from(keypoint: KeyPoint) -> Self {
        Self {
            id: keypoint.id,
            tour_id: keypoint.tour_id,
            name: keypoint.name,
            description: keypoint.description,
            latitude: keypoint.latitude,
            longitude: keypoint.longitude,
            image_url: keypoint.image_url,
            order: keypoint.position,
        }
    }
}

impl<'a> From<&'a DomainNewKeyPoint> for NewKeyPoint<'a> {
    fn from(keypoint: &'a DomainNewKeyPoint) -> Self {
        Self {
            tour_id: keypoint.tour_id,
            name: keypoint.name.as_str(),
            description: keypoint.description.as_str(),
            latitude: keypoint.latitude,
            longitude: keypoint.longitude,
            image_url: keypoint.image_url.as_deref(),
            position: keypoint.order,
        }
    }
}

impl<'a> From<&'a DomainUpdateKeyPoint> for UpdateKeyPoint<'a> {
    fn from(keypoint: &'a DomainUpdateKeyPoint) -> Self {
        Self {
            name: keypoint.name.as_str(),
            description: keypoint.description.as_str(),
            latitude: keypoint.latitude,
            longitude: keypoint.longitude,
            image_url: keypoint.image_url.as_deref(),
            position: keypoint.order,
        }
    }
}
