//! Repository implementation for bonus accounts and their ledger.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::bonus::{BonusAccount, BonusTransaction, NewBonusTransaction};
use crate::models::bonus::{
    BonusAccount as DbBonusAccount, BonusTransaction as DbBonusTransaction,
    NewBonusAccount as DbNewBonusAccount, NewBonusTransaction as DbNewBonusTransaction,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BonusReader, BonusWriter, DieselRepository, Pagination};

/// Applies the signed transaction amount to the owner's balance and inserts
/// the ledger row. Must run inside a transaction. `override_purchase_id`
/// replaces the transaction's purchase reference when the purchase id is only
/// known after insert.
pub(super) fn apply_transaction(
    conn: &mut SqliteConnection,
    tx: &NewBonusTransaction,
    override_purchase_id: Option<i32>,
) -> RepositoryResult<DbBonusAccount> {
    use crate::schema::{bonus_accounts, bonus_transactions};

    let account = diesel::update(
        bonus_accounts::table.filter(bonus_accounts::tourist_id.eq(tx.tourist_id)),
    )
    .set((
        bonus_accounts::available_points.eq(bonus_accounts::available_points + tx.amount),
        bonus_accounts::updated_at.eq(Utc::now().naive_utc()),
    ))
    .get_result::<DbBonusAccount>(conn)?;

    if account.available_points < 0.0 {
        return Err(RepositoryError::ConstraintViolation(
            "Bonus balance cannot go negative".to_string(),
        ));
    }

    let mut db_tx: DbNewBonusTransaction = tx.into();
    if override_purchase_id.is_some() {
        db_tx.related_purchase_id = override_purchase_id;
    }
    diesel::insert_into(bonus_transactions::table)
        .values(&db_tx)
        .execute(conn)?;

    Ok(account)
}

impl BonusReader for DieselRepository {
    fn get_bonus_account(&self, tourist_id: i32) -> RepositoryResult<Option<BonusAccount>> {
        use crate::schema::bonus_accounts;

        let mut conn = self.conn()?;
        let account = bonus_accounts::table
            .filter(bonus_accounts::tourist_id.eq(tourist_id))
            .first::<DbBonusAccount>(&mut conn)
            .optional()?;

        Ok(account.map(Into::into))
    }

    fn list_bonus_transactions(
        &self,
        tourist_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<BonusTransaction>)> {
        use crate::schema::bonus_transactions;

        let mut conn = self.conn()?;

        let total = bonus_transactions::table
            .filter(bonus_transactions::tourist_id.eq(tourist_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = bonus_transactions::table
            .filter(bonus_transactions::tourist_id.eq(tourist_id))
            .order((
                bonus_transactions::created_at.desc(),
                bonus_transactions::id.desc(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let transactions = items
            .load::<DbBonusTransaction>(&mut conn)?
            .into_iter()
            .map(|t| BonusTransaction::try_from(t).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<BonusTransaction>>>()?;

        Ok((total, transactions))
    }

    fn list_stale_bonus_accounts(
        &self,
        cutoff: NaiveDateTime,
    ) -> RepositoryResult<Vec<BonusAccount>> {
        use crate::schema::bonus_accounts;

        let mut conn = self.conn()?;
        let accounts = bonus_accounts::table
            .filter(bonus_accounts::available_points.gt(0.0))
            .filter(bonus_accounts::updated_at.lt(cutoff))
            .order(bonus_accounts::id.asc())
            .load::<DbBonusAccount>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(accounts)
    }
}

impl BonusWriter for DieselRepository {
    fn create_bonus_account(&self, tourist_id: i32) -> RepositoryResult<BonusAccount> {
        use crate::schema::bonus_accounts;

        let mut conn = self.conn()?;
        let account = diesel::insert_into(bonus_accounts::table)
            .values(&DbNewBonusAccount { tourist_id })
            .get_result::<DbBonusAccount>(&mut conn)?;

        Ok(account.into())
    }

    fn record_bonus_transaction(
        &self,
        tx: &NewBonusTransaction,
    ) -> RepositoryResult<BonusAccount> {
        let mut conn = self.conn()?;
        let account =
            conn.transaction::<_, RepositoryError, _>(|conn| apply_transaction(conn, tx, None))?;

        Ok(account.into())
    }
}
