use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::UnknownValue;
use crate::domain::bonus::{
    BonusAccount as DomainBonusAccount, BonusTransaction as DomainBonusTransaction,
    NewBonusTransaction as DomainNewBonusTransaction,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bonus_accounts)]
/// Diesel model for [`crate::domain::bonus::BonusAccount`].
pub struct BonusAccount {
    pub id: i32,
    pub tourist_id: i32,
    pub available_points: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bonus_accounts)]
pub struct NewBonusAccount {
    pub tourist_id: i32,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bonus_transactions)]
/// Diesel model for [`crate::domain::bonus::BonusTransaction`].
pub struct BonusTransaction {
    pub id: i32,
    pub tourist_id: i32,
    pub amount: f64,
    pub kind: i32,
    pub description: String,
    pub related_tour_id: Option<i32>,
    pub related_purchase_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::bonus_transactions)]
/// Insertable form of [`BonusTransaction`].
pub struct NewBonusTransaction<'a> {
    pub tourist_id: i32,
    pub amount: f64,
    pub kind: i32,
    pub description: &'a str,
    pub related_tour_id: Option<i32>,
    pub related_purchase_id: Option<i32>,
}

impl From<BonusAccount> for DomainBonusAccount {
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

impl TryFrom<BonusTransaction> for DomainBonusTransaction {
    type Error = UnknownValue;

    fn try_from(tx: BonusTransaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: tx.id,
            tourist_id: tx.tourist_id,
            amount: tx.amount,
            kind: tx.kind.try_into()?,
            description: tx.description,
            related_tour_id: tx.related_tour_id,
            related_purchase_id: tx.related_purchase_id,
            created_at: tx.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewBonusTransaction> for NewBonusTransaction<'a> {
    fn from(tx: &'a DomainNewBonusTransaction) -> Self {
        Self {
            tourist_id: tx.tourist_id,
            amount: tx.amount,
            kind: tx.kind.into(),
            description: tx.description.as_str(),
            related_tour_id: tx.related_tour_id,
            related_purchase_id: tx.related_purchase_id,
        }
    }
}
