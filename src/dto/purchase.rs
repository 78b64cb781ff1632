use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::purchase::TourPurchase;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPurchaseDto {
    pub id: i32,
    pub tourist_id: i32,
    pub tour_ids: Vec<i32>,
    pub total_amount: f64,
    pub bonus_points_used: f64,
    pub final_amount: f64,
    pub purchase_date: NaiveDateTime,
    /// 0 completed, 1 cancelled, 2 refunded.
    pub status: i32,
}

impl From<TourPurchase> for TourPurchaseDto {
    fn from(purchase: TourPurchase) -> Self {
        Self {
            id: purchase.id,
            tourist_id: purchase.tourist_id,
            tour_ids: purchase.tour_ids,
            total_amount: purchase.total_amount,
            bonus_points_used: purchase.bonus_points_used,
            final_amount: purchase.final_amount,
            purchase_date: purchase.purchased_at,
            status: purchase.status.into(),
        }
    }
}
