//! Shopping cart services for tourists.

use crate::TOURIST_ROLE;
use crate::domain::cart::ShoppingCart;
use crate::domain::tour::Tour;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{CartReader, CartWriter, TourReader};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Loads the caller's cart, creating an empty one on first use.
pub fn get_or_create_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ShoppingCart>
where
    R: CartReader + CartWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    match repo.get_cart_by_tourist(user.user_id)? {
        Some(cart) => Ok(cart),
        None => Ok(repo.create_cart(user.user_id)?),
    }
}

/// Puts a published tour in the caller's cart. Each tour can be in the
/// cart at most once.
pub fn add_tour<R>(repo: &R, user: &AuthenticatedUser, tour_id: i32) -> ServiceResult<ShoppingCart>
where
    R: CartReader + CartWriter + TourReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_tour_by_id(tour_id)?
        .filter(Tour::is_published)
        .ok_or(ServiceError::NotFound)?;

    let cart = get_or_create_cart(repo, user)?;
    if cart.contains(tour_id) {
        return Err(ServiceError::Conflict(
            "Tour is already in the cart".to_string(),
        ));
    }

    Ok(repo.add_cart_item(cart.id, tour_id)?)
}

/// Takes a tour out of the caller's cart.
pub fn remove_tour<R>(
    repo: &R,
    user: &AuthenticatedUser,
    tour_id: i32,
) -> ServiceResult<ShoppingCart>
where
    R: CartReader + CartWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let cart = repo
        .get_cart_by_tourist(user.user_id)?
        .ok_or(ServiceError::NotFound)?;
    if !cart.contains(tour_id) {
        return Err(ServiceError::NotFound);
    }

    Ok(repo.remove_cart_item(cart.id, tour_id)?)
}

/// Empties the caller's cart.
pub fn clear_cart<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ShoppingCart>
where
    R: CartReader + CartWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let cart = repo
        .get_cart_by_tourist(user.user_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(repo.clear_cart(cart.id)?)
}
