//! Checkout and purchase history services for tourists.

use chrono::Utc;

use crate::TOURIST_ROLE;
use crate::domain::bonus::{BonusTransactionKind, NewBonusTransaction};
use crate::domain::purchase::{NewTourPurchase, PurchaseItem, PurchaseStatus, TourPurchase};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{
    BonusReader, CartReader, Pagination, PurchaseReader, PurchaseWriter, TourReader,
};
use crate::services::{ServiceError, ServiceResult, ensure_role};

/// Turns the caller's cart into a purchase.
///
/// `bonus_points_requested` is clamped to the available balance and the
/// cart total, so the client cannot overspend. The cart is emptied and the
/// balance settled in the same transaction as the insert.
pub fn checkout<R>(
    repo: &R,
    user: &AuthenticatedUser,
    bonus_points_requested: f64,
) -> ServiceResult<TourPurchase>
where
    R: CartReader + TourReader + BonusReader + PurchaseWriter + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let cart = repo
        .get_cart_by_tourist(user.user_id)?
        .filter(|cart| !cart.is_empty())
        .ok_or_else(|| ServiceError::Validation("Shopping cart is empty".to_string()))?;

    let tours = repo.list_tours_by_ids(&cart.tour_ids)?;
    if tours.len() != cart.tour_ids.len() {
        return Err(ServiceError::Conflict(
            "Some tours in the cart are no longer available".to_string(),
        ));
    }

    let items: Vec<PurchaseItem> = tours
        .iter()
        .map(|tour| PurchaseItem {
            tour_id: tour.id,
            price: tour.price,
        })
        .collect();
    let total_amount: f64 = items.iter().map(|item| item.price).sum();

    let available_points = repo
        .get_bonus_account(user.user_id)?
        .map_or(0.0, |account| account.available_points);
    let bonus_points_used = bonus_points_requested
        .max(0.0)
        .min(available_points)
        .min(total_amount);
    let final_amount = total_amount - bonus_points_used;

    let new_purchase = NewTourPurchase {
        tourist_id: user.user_id,
        items,
        total_amount,
        bonus_points_used,
        final_amount,
    };

    let spend = (bonus_points_used > 0.0).then(|| {
        NewBonusTransaction::new(
            user.user_id,
            -bonus_points_used,
            BonusTransactionKind::SpentOnPurchase,
            "Points spent at checkout".to_string(),
        )
    });

    repo.checkout(&new_purchase, cart.id, spend.as_ref())
        .map_err(|err| {
            log::error!("Checkout failed for tourist {}: {err}", user.user_id);
            err.into()
        })
}

/// The caller's purchase history, newest first.
pub fn purchase_history<R>(
    repo: &R,
    user: &AuthenticatedUser,
    pagination: Pagination,
) -> ServiceResult<(usize, Vec<TourPurchase>)>
where
    R: PurchaseReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;
    Ok(repo.list_purchases_by_tourist(user.user_id, Some(pagination))?)
}

/// Loads one of the caller's purchases. Foreign purchases stay invisible.
pub fn get_own_purchase<R>(
    repo: &R,
    user: &AuthenticatedUser,
    purchase_id: i32,
) -> ServiceResult<TourPurchase>
where
    R: PurchaseReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    repo.get_purchase_by_id(purchase_id)?
        .filter(|purchase| purchase.tourist_id == user.user_id)
        .ok_or(ServiceError::NotFound)
}

/// Cancels a completed purchase before any of its tours departs. The full
/// amount paid comes back as bonus points.
pub fn cancel_purchase<R>(
    repo: &R,
    user: &AuthenticatedUser,
    purchase_id: i32,
) -> ServiceResult<TourPurchase>
where
    R: PurchaseReader + PurchaseWriter + TourReader + ?Sized,
{
    ensure_role(user, TOURIST_ROLE)?;

    let purchase = repo
        .get_purchase_by_id(purchase_id)?
        .filter(|purchase| purchase.tourist_id == user.user_id)
        .ok_or(ServiceError::NotFound)?;

    if purchase.status != PurchaseStatus::Completed {
        return Err(ServiceError::Conflict(
            "Only completed purchases can be cancelled".to_string(),
        ));
    }

    let now = Utc::now().naive_utc();
    let tours = repo.list_tours_by_ids(&purchase.tour_ids)?;
    if tours.iter().any(|tour| tour.has_departed(now)) {
        return Err(ServiceError::Conflict(
            "Purchases with departed tours cannot be cancelled".to_string(),
        ));
    }

    let refund = NewBonusTransaction::new(
        user.user_id,
        purchase.final_amount,
        BonusTransactionKind::EarnedFromCancellation,
        "Refund for cancelled purchase".to_string(),
    )
    .for_purchase(purchase_id);

    repo.cancel_purchase(purchase_id, &refund).map_err(|err| {
        log::error!("Failed to cancel purchase {purchase_id}: {err}");
        err.into()
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::bonus::BonusAccount;
    use crate::domain::cart::ShoppingCart;
    use crate::domain::tour::{Tour, TourState};
    use crate::repository::TourListQuery;
    use crate::repository::errors::RepositoryResult;

    struct MockRepo {
        cart: Option<ShoppingCart>,
        tours: Vec<Tour>,
        account: Option<BonusAccount>,
        purchase: Option<TourPurchase>,
        checkouts: RefCell<Vec<(NewTourPurchase, Option<NewBonusTransaction>)>>,
        refunds: RefCell<Vec<NewBonusTransaction>>,
    }

    impl MockRepo {
        fn new(cart: Option<ShoppingCart>, tours: Vec<Tour>, account: Option<BonusAccount>) -> Self {
            Self {
                cart,
                tours,
                account,
                purchase: None,
                checkouts: RefCell::new(Vec::new()),
                refunds: RefCell::new(Vec::new()),
            }
        }

        fn with_purchase(purchase: TourPurchase, tours: Vec<Tour>) -> Self {
            Self {
                cart: None,
                tours,
                account: None,
                purchase: Some(purchase),
                checkouts: RefCell::new(Vec::new()),
                refunds: RefCell::new(Vec::new()),
            }
        }
    }

    impl CartReader for MockRepo {
        fn get_cart_by_tourist(&self, _tourist_id: i32) -> RepositoryResult<Option<ShoppingCart>> {
            Ok(self.cart.clone())
        }
    }

    impl TourReader for MockRepo {
        fn get_tour_by_id(&self, _id: i32) -> RepositoryResult<Option<Tour>> {
            Ok(None)
        }

        fn list_tours(&self, _query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)> {
            Ok((0, Vec::new()))
        }

        fn list_tours_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tour>> {
            Ok(self
                .tours
                .iter()
                .filter(|tour| ids.contains(&tour.id))
                .cloned()
                .collect())
        }
    }

    impl BonusReader for MockRepo {
        fn get_bonus_account(&self, _tourist_id: i32) -> RepositoryResult<Option<BonusAccount>> {
            Ok(self.account.clone())
        }

        fn list_bonus_transactions(
            &self,
            _tourist_id: i32,
            _pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<crate::domain::bonus::BonusTransaction>)> {
            Ok((0, Vec::new()))
        }

        fn list_stale_bonus_accounts(
            &self,
            _cutoff: chrono::NaiveDateTime,
        ) -> RepositoryResult<Vec<BonusAccount>> {
            Ok(Vec::new())
        }
    }

    impl PurchaseReader for MockRepo {
        fn get_purchase_by_id(&self, _id: i32) -> RepositoryResult<Option<TourPurchase>> {
            Ok(self.purchase.clone())
        }

        fn list_purchases_by_tourist(
            &self,
            _tourist_id: i32,
            _pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<TourPurchase>)> {
            Ok((0, Vec::new()))
        }

        fn has_completed_purchase_of_tour(
            &self,
            _tourist_id: i32,
            _tour_id: i32,
        ) -> RepositoryResult<bool> {
            Ok(false)
        }
    }

    impl PurchaseWriter for MockRepo {
        fn checkout(
            &self,
            new_purchase: &NewTourPurchase,
            _cart_id: i32,
            spend: Option<&NewBonusTransaction>,
        ) -> RepositoryResult<TourPurchase> {
            self.checkouts
                .borrow_mut()
                .push((new_purchase.clone(), spend.cloned()));
            Ok(TourPurchase {
                id: 100,
                tourist_id: new_purchase.tourist_id,
                tour_ids: new_purchase.items.iter().map(|item| item.tour_id).collect(),
                total_amount: new_purchase.total_amount,
                bonus_points_used: new_purchase.bonus_points_used,
                final_amount: new_purchase.final_amount,
                status: PurchaseStatus::Completed,
                purchased_at: Utc::now().naive_utc(),
            })
        }

        fn cancel_purchase(
            &self,
            _purchase_id: i32,
            refund: &NewBonusTransaction,
        ) -> RepositoryResult<TourPurchase> {
            self.refunds.borrow_mut().push(refund.clone());
            let mut purchase = self.purchase.clone().expect("purchase exists");
            purchase.status = PurchaseStatus::Cancelled;
            Ok(purchase)
        }
    }

    fn tourist() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 1,
            username: "ana".to_string(),
            role: TOURIST_ROLE.to_string(),
        }
    }

    fn tour(id: i32, price: f64, days_ahead: i64) -> Tour {
        let now = Utc::now().naive_utc();
        Tour {
            id,
            guide_id: 7,
            name: "Old town walk".to_string(),
            description: "Two hours through the old town".to_string(),
            difficulty: 2,
            category: 2,
            price,
            date: now + Duration::days(days_ahead),
            state: TourState::Complete,
            created_at: now,
            updated_at: now,
        }
    }

    fn cart(tour_ids: Vec<i32>) -> ShoppingCart {
        let now = Utc::now().naive_utc();
        ShoppingCart {
            id: 5,
            tourist_id: 1,
            tour_ids,
            created_at: now,
            updated_at: now,
        }
    }

    fn account(points: f64) -> BonusAccount {
        let now = Utc::now().naive_utc();
        BonusAccount {
            id: 2,
            tourist_id: 1,
            available_points: points,
            created_at: now,
            updated_at: now,
        }
    }

    fn completed_purchase(final_amount: f64) -> TourPurchase {
        TourPurchase {
            id: 100,
            tourist_id: 1,
            tour_ids: vec![3],
            total_amount: final_amount,
            bonus_points_used: 0.0,
            final_amount,
            status: PurchaseStatus::Completed,
            purchased_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn checkout_rejects_empty_cart() {
        let repo = MockRepo::new(Some(cart(Vec::new())), Vec::new(), None);

        let result = checkout(&repo, &tourist(), 0.0);

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }

    #[test]
    fn checkout_rejects_vanished_tours() {
        let repo = MockRepo::new(Some(cart(vec![3, 4])), vec![tour(3, 30.0, 10)], None);

        let result = checkout(&repo, &tourist(), 0.0);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn checkout_clamps_points_to_balance_and_total() {
        let repo = MockRepo::new(
            Some(cart(vec![3, 4])),
            vec![tour(3, 30.0, 10), tour(4, 20.0, 12)],
            Some(account(15.0)),
        );

        let purchase = checkout(&repo, &tourist(), 100.0).expect("should check out");

        assert_eq!(purchase.total_amount, 50.0);
        assert_eq!(purchase.bonus_points_used, 15.0);
        assert_eq!(purchase.final_amount, 35.0);
        let checkouts = repo.checkouts.borrow();
        let spend = checkouts[0].1.as_ref().expect("spend recorded");
        assert_eq!(spend.amount, -15.0);
        assert_eq!(spend.kind, BonusTransactionKind::SpentOnPurchase);
    }

    #[test]
    fn checkout_ignores_negative_point_requests() {
        let repo = MockRepo::new(
            Some(cart(vec![3])),
            vec![tour(3, 30.0, 10)],
            Some(account(15.0)),
        );

        let purchase = checkout(&repo, &tourist(), -5.0).expect("should check out");

        assert_eq!(purchase.bonus_points_used, 0.0);
        assert_eq!(purchase.final_amount, 30.0);
        assert!(repo.checkouts.borrow()[0].1.is_none());
    }

    #[test]
    fn checkout_covers_whole_total_with_points() {
        let repo = MockRepo::new(
            Some(cart(vec![3])),
            vec![tour(3, 30.0, 10)],
            Some(account(80.0)),
        );

        let purchase = checkout(&repo, &tourist(), 80.0).expect("should check out");

        assert_eq!(purchase.bonus_points_used, 30.0);
        assert_eq!(purchase.final_amount, 0.0);
    }

    #[test]
    fn cancel_refunds_the_amount_paid() {
        let repo = MockRepo::with_purchase(completed_purchase(35.0), vec![tour(3, 30.0, 10)]);

        let purchase = cancel_purchase(&repo, &tourist(), 100).expect("should cancel");

        assert_eq!(purchase.status, PurchaseStatus::Cancelled);
        let refunds = repo.refunds.borrow();
        assert_eq!(refunds[0].amount, 35.0);
        assert_eq!(refunds[0].kind, BonusTransactionKind::EarnedFromCancellation);
        assert_eq!(refunds[0].related_purchase_id, Some(100));
    }

    #[test]
    fn cancel_rejects_departed_tours() {
        let repo = MockRepo::with_purchase(completed_purchase(35.0), vec![tour(3, 30.0, -1)]);

        let result = cancel_purchase(&repo, &tourist(), 100);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
        assert!(repo.refunds.borrow().is_empty());
    }

    #[test]
    fn cancel_rejects_non_completed_purchases() {
        let mut purchase = completed_purchase(35.0);
        purchase.status = PurchaseStatus::Cancelled;
        let repo = MockRepo::with_purchase(purchase, vec![tour(3, 30.0, 10)]);

        let result = cancel_purchase(&repo, &tourist(), 100);

        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn cancel_rejects_foreign_purchases() {
        let mut purchase = completed_purchase(35.0);
        purchase.tourist_id = 2;
        let repo = MockRepo::with_purchase(purchase, vec![tour(3, 30.0, 10)]);

        let result = cancel_purchase(&repo, &tourist(), 100);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }
}
