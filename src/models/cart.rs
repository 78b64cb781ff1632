use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cart::ShoppingCart;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::carts)]
/// Diesel model for the cart head row. Tour entries live in `cart_items`.
pub struct Cart {
    pub id: i32,
    pub tourist_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Cart {
    /// Combines the head row with its item rows into the domain cart.
    #[must_use]
    pub fn into_domain(self, tour_ids: Vec<i32>) -> ShoppingCart {
        ShoppingCart {
            id: self.id,
            tourist_id: self.tourist_id,
            tour_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::carts)]
pub struct NewCart {
    pub tourist_id: i32,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = crate::schema::cart_items)]
pub struct CartItem {
    pub cart_id: i32,
    pub tour_id: i32,
}
