//! Repository implementation for shopping carts.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::cart::ShoppingCart;
use crate::models::cart::{Cart as DbCart, NewCart as DbNewCart};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CartReader, CartWriter, DieselRepository};

fn load_cart(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<ShoppingCart> {
    use crate::schema::{cart_items, carts};

    let cart = carts::table.find(cart_id).first::<DbCart>(conn)?;
    let tour_ids = cart_items::table
        .filter(cart_items::cart_id.eq(cart_id))
        .select(cart_items::tour_id)
        .order(cart_items::tour_id.asc())
        .load::<i32>(conn)?;

    Ok(cart.into_domain(tour_ids))
}

fn touch_cart(conn: &mut SqliteConnection, cart_id: i32) -> RepositoryResult<()> {
    use crate::schema::carts;

    diesel::update(carts::table.find(cart_id))
        .set(carts::updated_at.eq(Utc::now().naive_utc()))
        .execute(conn)?;
    Ok(())
}

impl CartReader for DieselRepository {
    fn get_cart_by_tourist(&self, tourist_id: i32) -> RepositoryResult<Option<ShoppingCart>> {
        use crate::schema::carts;

        let mut conn = self.conn()?;
        let cart = carts::table
            .filter(carts::tourist_id.eq(tourist_id))
            .first::<DbCart>(&mut conn)
            .optional()?;

        match cart {
            Some(cart) => {
                let cart_id = cart.id;
                load_cart(&mut conn, cart_id).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl CartWriter for DieselRepository {
    fn create_cart(&self, tourist_id: i32) -> RepositoryResult<ShoppingCart> {
        use crate::schema::carts;

        let mut conn = self.conn()?;
        let cart = diesel::insert_into(carts::table)
            .values(&DbNewCart { tourist_id })
            .get_result::<DbCart>(&mut conn)?;

        Ok(cart.into_domain(Vec::new()))
    }

    fn add_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::insert_into(cart_items::table)
                .values((
                    cart_items::cart_id.eq(cart_id),
                    cart_items::tour_id.eq(tour_id),
                ))
                .execute(conn)?;
            touch_cart(conn, cart_id)?;
            load_cart(conn, cart_id)
        })
    }

    fn remove_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::delete(
                cart_items::table
                    .filter(cart_items::cart_id.eq(cart_id))
                    .filter(cart_items::tour_id.eq(tour_id)),
            )
            .execute(conn)?;

            if affected == 0 {
                return Err(RepositoryError::NotFound);
            }
            touch_cart(conn, cart_id)?;
            load_cart(conn, cart_id)
        })
    }

    fn clear_cart(&self, cart_id: i32) -> RepositoryResult<ShoppingCart> {
        use crate::schema::cart_items;

        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(cart_items::table.filter(cart_items::cart_id.eq(cart_id)))
                .execute(conn)?;
            touch_cart(conn, cart_id)?;
            load_cart(conn, cart_id)
        })
    }
}
