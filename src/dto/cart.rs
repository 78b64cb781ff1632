use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::cart::ShoppingCart;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingCartDto {
    pub id: i32,
    pub tourist_id: i32,
    pub tour_ids: Vec<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ShoppingCart> for ShoppingCartDto {
    fn from(cart: ShoppingCart) -> Self {
        Self {
            id: cart.id,
            tourist_id: cart.tourist_id,
            tour_ids: cart.tour_ids,
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}
