use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::UnknownValue;

/// Bonus balance owned by a tourist. Credited on purchase cancellation,
/// debited at checkout, expired by the maintenance job after long inactivity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BonusAccount {
    pub id: i32,
    pub tourist_id: i32,
    pub available_points: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BonusTransaction {
    pub id: i32,
    pub tourist_id: i32,
    /// Positive for credits, negative for debits.
    pub amount: f64,
    pub kind: BonusTransactionKind,
    pub description: String,
    pub related_tour_id: Option<i32>,
    pub related_purchase_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BonusTransactionKind {
    EarnedFromCancellation,
    SpentOnPurchase,
    Expired,
}

impl From<BonusTransactionKind> for i32 {
    fn from(kind: BonusTransactionKind) -> Self {
        match kind {
            BonusTransactionKind::EarnedFromCancellation => 0,
            BonusTransactionKind::SpentOnPurchase => 1,
            BonusTransactionKind::Expired => 2,
        }
    }
}

impl TryFrom<i32> for BonusTransactionKind {
    type Error = UnknownValue;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BonusTransactionKind::EarnedFromCancellation),
            1 => Ok(BonusTransactionKind::SpentOnPurchase),
            2 => Ok(BonusTransactionKind::Expired),
            other => Err(UnknownValue::new("bonus transaction kind", other)),
        }
    }
}

impl Display for BonusTransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BonusTransactionKind::EarnedFromCancellation => write!(f, "Earned from cancellation"),
            BonusTransactionKind::SpentOnPurchase => write!(f, "Spent on purchase"),
            BonusTransactionKind::Expired => write!(f, "Expired"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewBonusTransaction {
    pub tourist_id: i32,
    pub amount: f64,
    pub kind: BonusTransactionKind,
    pub description: String,
    pub related_tour_id: Option<i32>,
    pub related_purchase_id: Option<i32>,
}

impl NewBonusTransaction {
    #[must_use]
    pub fn new(
        tourist_id: i32,
        amount: f64,
        kind: BonusTransactionKind,
        description: String,
    ) -> Self {
        Self {
            tourist_id,
            amount,
            kind,
            description,
            related_tour_id: None,
            related_purchase_id: None,
        }
    }

    #[must_use]
    pub fn for_purchase(mut self, purchase_id: i32) -> Self {
        self.related_purchase_id = Some(purchase_id);
        self
    }

    #[must_use]
    pub fn for_tour(mut self, tour_id: i32) -> Self {
        self.related_tour_id = Some(tour_id);
        self
    }
}
