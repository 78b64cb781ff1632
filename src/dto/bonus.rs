use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::bonus::{BonusAccount, BonusTransaction};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusPointsDto {
    pub id: i32,
    pub tourist_id: i32,
    pub available_points: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BonusAccount> for BonusPointsDto {
    fn from(account: BonusAccount) -> Self {
        Self {
            id: account.id,
            tourist_id: account.tourist_id,
            available_points: account.available_points,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusTransactionDto {
    pub id: i32,
    pub tourist_id: i32,
    pub amount: f64,
    /// 0 earned from cancellation, 1 spent on purchase, 2 expired.
    #[serde(rename = "type")]
    pub kind: i32,
    pub description: String,
    pub related_tour_id: Option<i32>,
    pub related_purchase_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl From<BonusTransaction> for BonusTransactionDto {
    fn from(tx: BonusTransaction) -> Self {
        Self {
            id: tx.id,
            tourist_id: tx.tourist_id,
            amount: tx.amount,
            kind: tx.kind.into(),
            description: tx.description,
            related_tour_id: tx.related_tour_id,
            related_purchase_id: tx.related_purchase_id,
            created_at: tx.created_at,
        }
    }
}
