use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TourPurchase {
    pub id: i32,
    pub tourist_id: i32,
    pub tour_ids: Vec<i32>,
    pub total_amount: f64,
    pub bonus_points_used: f64,
    pub final_amount: f64,
    pub status: PurchaseStatus,
    pub purchased_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PurchaseStatus {
    Completed,
    Cancelled,
    Refunded,
}

impl From<PurchaseStatus> for i32 {
    fn from(status: PurchaseStatus) -> Self {
        match status {
            PurchaseStatus::Completed => 0,
            PurchaseStatus::Cancelled => 1,
            PurchaseStatus::Refunded => 2,
        }
    }
}

impl TryFrom<i32> for PurchaseStatus {
    type Error = UnknownValue;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(PurchaseStatus::Completed),
            1 => Ok(PurchaseStatus::Cancelled),
            2 => Ok(PurchaseStatus::Refunded),
            other => Err(UnknownValue::new("purchase status", other)),
        }
    }
}

impl Display for PurchaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurchaseStatus::Completed => write!(f, "Completed"),
            PurchaseStatus::Cancelled => write!(f, "Cancelled"),
            PurchaseStatus::Refunded => write!(f, "Refunded"),
        }
    }
}

/// Price of a single tour at checkout time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PurchaseItem {
    pub tour_id: i32,
    pub price: f64,
}

/// Checkout snapshot produced by the purchase service. Amounts are already
/// settled against the bonus balance.
#[derive(Clone, Debug)]
pub struct NewTourPurchase {
    pub tourist_id: i32,
    pub items: Vec<PurchaseItem>,
    pub total_amount: f64,
    pub bonus_points_used: f64,
    pub final_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for (code, status) in [
            (0, PurchaseStatus::Completed),
            (1, PurchaseStatus::Cancelled),
            (2, PurchaseStatus::Refunded),
        ] {
            assert_eq!(PurchaseStatus::try_from(code), Ok(status));
            assert_eq!(i32::from(status), code);
        }
        assert!(PurchaseStatus::try_from(3).is_err());
    }
}
