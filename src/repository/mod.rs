//! Persistence layer for the booking platform.
//!
//! Access goes through narrow reader/writer traits per aggregate so services
//! can be tested against mocks. [`DieselRepository`] implements all of them
//! on top of the shared connection pool.

use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::bonus::{BonusAccount, BonusTransaction, NewBonusTransaction};
use crate::domain::cart::ShoppingCart;
use crate::domain::keypoint::{KeyPoint, NewKeyPoint, UpdateKeyPoint};
use crate::domain::problem::{NewTourProblem, TourProblem, TourProblemStatus};
use crate::domain::purchase::{NewTourPurchase, TourPurchase};
use crate::domain::replacement::{NewTourReplacement, TourReplacement, TourReplacementStatus};
use crate::domain::review::{NewTourReview, ReviewStatistics, TourReview};
use crate::domain::tour::{NewTour, Tour, TourState, UpdateTour};
use crate::domain::user::{LoginState, NewUser, UpdateProfile, User};
use crate::repository::errors::RepositoryResult;

pub mod bonus;
pub mod cart;
pub mod errors;
pub mod keypoint;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod problem;
pub mod purchase;
pub mod replacement;
pub mod review;
pub mod tour;
pub mod user;

/// Diesel implementation of every repository trait in this module.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// 0-based page index.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub(crate) fn limit(self) -> i64 {
        self.per_page as i64
    }

    pub(crate) fn offset(self) -> i64 {
        (self.page * self.per_page) as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default)]
pub struct TourListQuery {
    pub guide_id: Option<i32>,
    pub state: Option<TourState>,
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
    pub max_price: Option<f64>,
    /// When set, orders by tour date instead of id.
    pub date_sort: Option<SortDirection>,
    pub pagination: Option<Pagination>,
}

impl TourListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn guide(mut self, guide_id: i32) -> Self {
        self.guide_id = Some(guide_id);
        self
    }

    #[must_use]
    pub fn state(mut self, state: TourState) -> Self {
        self.state = Some(state);
        self
    }

    #[must_use]
    pub fn category(mut self, category: i32) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    #[must_use]
    pub fn sort_by_date(mut self, direction: SortDirection) -> Self {
        self.date_sort = Some(direction);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProblemListQuery {
    pub tourist_id: Option<i32>,
    /// Filter to problems on tours currently owned by this guide.
    pub guide_id: Option<i32>,
    pub status: Option<TourProblemStatus>,
    pub pagination: Option<Pagination>,
}

impl ProblemListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn tourist(mut self, tourist_id: i32) -> Self {
        self.tourist_id = Some(tourist_id);
        self
    }

    #[must_use]
    pub fn guide(mut self, guide_id: i32) -> Self {
        self.guide_id = Some(guide_id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TourProblemStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplacementListQuery {
    pub original_guide_id: Option<i32>,
    /// Excludes requests opened by this guide; used for the takeover board.
    pub exclude_guide_id: Option<i32>,
    pub status: Option<TourReplacementStatus>,
    /// Newest requests first; used for a guide's own request history.
    pub newest_first: bool,
    pub pagination: Option<Pagination>,
}

impl ReplacementListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn original_guide(mut self, guide_id: i32) -> Self {
        self.original_guide_id = Some(guide_id);
        self
    }

    #[must_use]
    pub fn newest_first(mut self) -> Self {
        self.newest_first = true;
        self
    }

    #[must_use]
    pub fn exclude_guide(mut self, guide_id: i32) -> Self {
        self.exclude_guide_id = Some(guide_id);
        self
    }

    #[must_use]
    pub fn status(mut self, status: TourReplacementStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    fn list_blocked_users(&self) -> RepositoryResult<Vec<User>>;
    fn list_user_interests(&self, user_id: i32) -> RepositoryResult<Vec<i32>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn set_login_state(&self, user_id: i32, state: LoginState) -> RepositoryResult<User>;
    fn update_profile(&self, user_id: i32, updates: &UpdateProfile) -> RepositoryResult<User>;
    fn set_user_interests(&self, user_id: i32, interest_ids: &[i32]) -> RepositoryResult<()>;
}

pub trait TourReader {
    fn get_tour_by_id(&self, id: i32) -> RepositoryResult<Option<Tour>>;
    fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)>;
    fn list_tours_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tour>>;
}

pub trait TourWriter {
    fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
    fn update_tour(&self, tour_id: i32, updates: &UpdateTour) -> RepositoryResult<Tour>;
    fn delete_tour(&self, tour_id: i32) -> RepositoryResult<()>;
}

pub trait KeyPointReader {
    fn get_keypoint_by_id(&self, id: i32) -> RepositoryResult<Option<KeyPoint>>;
    fn list_keypoints_by_tour(&self, tour_id: i32) -> RepositoryResult<Vec<KeyPoint>>;
    fn count_keypoints(&self, tour_id: i32) -> RepositoryResult<usize>;
}

pub trait KeyPointWriter {
    fn create_keypoint(&self, new_keypoint: &NewKeyPoint) -> RepositoryResult<KeyPoint>;
    fn update_keypoint(
        &self,
        keypoint_id: i32,
        updates: &UpdateKeyPoint,
    ) -> RepositoryResult<KeyPoint>;
    fn delete_keypoint(&self, keypoint_id: i32) -> RepositoryResult<()>;
}

pub trait CartReader {
    fn get_cart_by_tourist(&self, tourist_id: i32) -> RepositoryResult<Option<ShoppingCart>>;
}

pub trait CartWriter {
    fn create_cart(&self, tourist_id: i32) -> RepositoryResult<ShoppingCart>;
    fn add_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart>;
    fn remove_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart>;
    fn clear_cart(&self, cart_id: i32) -> RepositoryResult<ShoppingCart>;
}

pub trait PurchaseReader {
    fn get_purchase_by_id(&self, id: i32) -> RepositoryResult<Option<TourPurchase>>;
    fn list_purchases_by_tourist(
        &self,
        tourist_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<TourPurchase>)>;
    fn has_completed_purchase_of_tour(
        &self,
        tourist_id: i32,
        tour_id: i32,
    ) -> RepositoryResult<bool>;
}

pub trait PurchaseWriter {
    /// Inserts the purchase with its items, empties the cart and settles the
    /// bonus balance in one transaction. When `spend` is given, its
    /// `related_purchase_id` is replaced with the id of the new purchase.
    fn checkout(
        &self,
        new_purchase: &NewTourPurchase,
        cart_id: i32,
        spend: Option<&NewBonusTransaction>,
    ) -> RepositoryResult<TourPurchase>;
    /// Marks a completed purchase cancelled and credits the refund in one
    /// transaction.
    fn cancel_purchase(
        &self,
        purchase_id: i32,
        refund: &NewBonusTransaction,
    ) -> RepositoryResult<TourPurchase>;
}

pub trait BonusReader {
    fn get_bonus_account(&self, tourist_id: i32) -> RepositoryResult<Option<BonusAccount>>;
    fn list_bonus_transactions(
        &self,
        tourist_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<BonusTransaction>)>;
    /// Accounts holding points that have seen no balance change since
    /// `cutoff`.
    fn list_stale_bonus_accounts(
        &self,
        cutoff: NaiveDateTime,
    ) -> RepositoryResult<Vec<BonusAccount>>;
}

pub trait BonusWriter {
    fn create_bonus_account(&self, tourist_id: i32) -> RepositoryResult<BonusAccount>;
    /// Applies the signed transaction amount to the balance and records the
    /// ledger entry in one transaction.
    fn record_bonus_transaction(
        &self,
        tx: &NewBonusTransaction,
    ) -> RepositoryResult<BonusAccount>;
}

pub trait ProblemReader {
    fn get_problem_by_id(&self, id: i32)
    -> RepositoryResult<Option<(TourProblem, Tour, User)>>;
    fn list_problems(
        &self,
        query: ProblemListQuery,
    ) -> RepositoryResult<(usize, Vec<(TourProblem, Tour, User)>)>;
}

pub trait ProblemWriter {
    fn create_problem(&self, new_problem: &NewTourProblem) -> RepositoryResult<TourProblem>;
    /// Moves the problem to `status`, stamping the matching timestamp column.
    fn set_problem_status(
        &self,
        problem_id: i32,
        status: TourProblemStatus,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourProblem>;
}

pub trait ReplacementReader {
    fn get_replacement_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<(TourReplacement, Tour)>>;
    fn list_replacements(
        &self,
        query: ReplacementListQuery,
    ) -> RepositoryResult<(usize, Vec<(TourReplacement, Tour)>)>;
    fn has_pending_replacement(&self, tour_id: i32) -> RepositoryResult<bool>;
}

pub trait ReplacementWriter {
    fn create_replacement(
        &self,
        new_replacement: &NewTourReplacement,
    ) -> RepositoryResult<TourReplacement>;
    /// Accepts a pending request and reassigns the tour to the accepting
    /// guide in one transaction.
    fn accept_replacement(
        &self,
        replacement_id: i32,
        replacement_guide_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourReplacement>;
    /// Cancels a pending request.
    fn cancel_replacement(
        &self,
        replacement_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourReplacement>;
    /// Expires pending requests whose tour date has passed. Returns the
    /// number of affected rows.
    fn expire_stale_replacements(&self, now: NaiveDateTime) -> RepositoryResult<usize>;
}

pub trait ReviewReader {
    fn get_review_by_id(&self, id: i32) -> RepositoryResult<Option<TourReview>>;
    fn list_reviews_by_purchase(&self, purchase_id: i32) -> RepositoryResult<Vec<TourReview>>;
    fn list_reviews_by_tour(
        &self,
        tour_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<TourReview>)>;
    fn review_exists(&self, purchase_id: i32, tour_id: i32) -> RepositoryResult<bool>;
    fn get_review_statistics(&self, tour_id: i32) -> RepositoryResult<ReviewStatistics>;
}

pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewTourReview) -> RepositoryResult<TourReview>;
}
