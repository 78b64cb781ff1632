use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::purchase::{PurchaseItem as DomainPurchaseItem, TourPurchase};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::purchases)]
/// Diesel model for the purchase head row. Tour entries live in
/// `purchase_items`.
pub struct Purchase {
    pub id: i32,
    pub tourist_id: i32,
    pub total_amount: f64,
    pub bonus_points_used: f64,
    pub final_amount: f64,
    pub status: i32,
    pub purchased_at: NaiveDateTime,
}

impl Purchase {
    /// Combines the head row with its item rows into the domain purchase.
    pub fn into_domain(self, tour_ids: Vec<i32>) -> Result<TourPurchase, UnknownValue> {
        Ok(TourPurchase {
            id: self.id,
            tourist_id: self.tourist_id,
            tour_ids,
            total_amount: self.total_amount,
            bonus_points_used: self.bonus_points_used,
            final_amount: self.final_amount,
            status: self.status.try_into()?,
            purchased_at: self.purchased_at,
        })
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::purchases)]
/// Insertable form of [`Purchase`].
pub struct NewPurchase {
    pub tourist_id: i32,
    pub total_amount: f64,
    pub bonus_points_used: f64,
    pub final_amount: f64,
    pub status: i32,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::purchase_items)]
pub struct PurchaseItem {
    pub purchase_id: i32,
    pub tour_id: i32,
    pub price: f64,
}

impl PurchaseItem {
    #[must_use]
    pub fn from_domain(purchase_id: i32, item: &DomainPurchaseItem) -> Self {
        Self {
            purchase_id,
            tour_id: item.tour_id,
            price: item.price,
        }
    }
}
