//! Repository implementation for tour purchases.

use std::collections::HashMap;

use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::bonus::NewBonusTransaction;
use crate::domain::purchase::{NewTourPurchase, PurchaseStatus, TourPurchase};
use crate::models::purchase::{
    NewPurchase as DbNewPurchase, Purchase as DbPurchase, PurchaseItem as DbPurchaseItem,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, Pagination, PurchaseReader, PurchaseWriter, bonus};

fn load_tour_ids(conn: &mut SqliteConnection, purchase_id: i32) -> RepositoryResult<Vec<i32>> {
    use crate::schema::purchase_items;

    let tour_ids = purchase_items::table
        .filter(purchase_items::purchase_id.eq(purchase_id))
        .select(purchase_items::tour_id)
        .order(purchase_items::tour_id.asc())
        .load::<i32>(conn)?;

    Ok(tour_ids)
}

impl PurchaseReader for DieselRepository {
    fn get_purchase_by_id(&self, id: i32) -> RepositoryResult<Option<TourPurchase>> {
        use crate::schema::purchases;

        let mut conn = self.conn()?;
        let purchase = purchases::table
            .find(id)
            .first::<DbPurchase>(&mut conn)
            .optional()?;

        match purchase {
            Some(purchase) => {
                let tour_ids = load_tour_ids(&mut conn, purchase.id)?;
                purchase
                    .into_domain(tour_ids)
                    .map(Some)
                    .map_err(RepositoryError::from)
            }
            None => Ok(None),
        }
    }

    fn list_purchases_by_tourist(
        &self,
        tourist_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<TourPurchase>)> {
        use crate::schema::{purchase_items, purchases};

        let mut conn = self.conn()?;

        let total = purchases::table
            .filter(purchases::tourist_id.eq(tourist_id))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = purchases::table
            .filter(purchases::tourist_id.eq(tourist_id))
            .order((purchases::purchased_at.desc(), purchases::id.desc()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let heads = items.load::<DbPurchase>(&mut conn)?;

        let purchase_ids: Vec<i32> = heads.iter().map(|p| p.id).collect();
        let rows = purchase_items::table
            .filter(purchase_items::purchase_id.eq_any(&purchase_ids))
            .order(purchase_items::tour_id.asc())
            .load::<DbPurchaseItem>(&mut conn)?;

        let mut tours_by_purchase: HashMap<i32, Vec<i32>> = HashMap::new();
        for row in rows {
            tours_by_purchase
                .entry(row.purchase_id)
                .or_default()
                .push(row.tour_id);
        }

        let purchases = heads
            .into_iter()
            .map(|head| {
                let tour_ids = tours_by_purchase.remove(&head.id).unwrap_or_default();
                head.into_domain(tour_ids).map_err(RepositoryError::from)
            })
            .collect::<RepositoryResult<Vec<TourPurchase>>>()?;

        Ok((total, purchases))
    }

    fn has_completed_purchase_of_tour(
        &self,
        tourist_id: i32,
        tour_id: i32,
    ) -> RepositoryResult<bool> {
        use crate::schema::{purchase_items, purchases};

        let mut conn = self.conn()?;
        let found = diesel::select(exists(
            purchase_items::table
                .inner_join(purchases::table)
                .filter(purchases::tourist_id.eq(tourist_id))
                .filter(purchases::status.eq(i32::from(PurchaseStatus::Completed)))
                .filter(purchase_items::tour_id.eq(tour_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }
}

impl PurchaseWriter for DieselRepository {
    fn checkout(
        &self,
        new_purchase: &NewTourPurchase,
        cart_id: i32,
        spend: Option<&NewBonusTransaction>,
    ) -> RepositoryResult<TourPurchase> {
        use crate::schema::{cart_items, purchases};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let head = diesel::insert_into(purchases::table)
                .values(&DbNewPurchase {
                    tourist_id: new_purchase.tourist_id,
                    total_amount: new_purchase.total_amount,
                    bonus_points_used: new_purchase.bonus_points_used,
                    final_amount: new_purchase.final_amount,
                    status: PurchaseStatus::Completed.into(),
                })
                .get_result::<DbPurchase>(conn)?;

            let item_rows: Vec<DbPurchaseItem> = new_purchase
                .items
                .iter()
                .map(|item| DbPurchaseItem::from_domain(head.id, item))
                .collect();
            diesel::insert_into(crate::schema::purchase_items::table)
                .values(&item_rows)
                .execute(conn)?;

            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(cart_id)))
                .execute(conn)?;

            if let Some(spend) = spend {
                bonus::apply_transaction(conn, spend, Some(head.id))?;
            }

            let tour_ids = load_tour_ids(conn, head.id)?;
            head.into_domain(tour_ids).map_err(RepositoryError::from)
        })
    }

    fn cancel_purchase(
        &self,
        purchase_id: i32,
        refund: &NewBonusTransaction,
    ) -> RepositoryResult<TourPurchase> {
        use crate::schema::purchases;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(
                purchases::table
                    .find(purchase_id)
                    .filter(purchases::status.eq(i32::from(PurchaseStatus::Completed))),
            )
            .set(purchases::status.eq(i32::from(PurchaseStatus::Cancelled)))
            .execute(conn)?;

            if affected == 0 {
                let exists = purchases::table
                    .find(purchase_id)
                    .first::<DbPurchase>(conn)
                    .optional()?
                    .is_some();
                return Err(if exists {
                    RepositoryError::ConstraintViolation(
                        "Purchase is not in a cancellable state".to_string(),
                    )
                } else {
                    RepositoryError::NotFound
                });
            }

            if refund.amount > 0.0 {
                bonus::apply_transaction(conn, refund, None)?;
            }

            let head = purchases::table.find(purchase_id).first::<DbPurchase>(conn)?;
            let tour_ids = load_tour_ids(conn, purchase_id)?;
            head.into_domain(tour_ids).map_err(RepositoryError::from)
        })
    }
}
