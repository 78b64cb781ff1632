//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::bonus::{BonusAccount, BonusTransaction, NewBonusTransaction};
use crate::domain::cart::ShoppingCart;
use crate::domain::keypoint::{KeyPoint, NewKeyPoint, UpdateKeyPoint};
use crate::domain::problem::{NewTourProblem, TourProblem, TourProblemStatus};
use crate::domain::purchase::{NewTourPurchase, TourPurchase};
use crate::domain::replacement::{NewTourReplacement, TourReplacement};
use crate::domain::review::{NewTourReview, ReviewStatistics, TourReview};
use crate::domain::tour::{NewTour, Tour, UpdateTour};
use crate::domain::user::{LoginState, NewUser, UpdateProfile, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BonusReader, BonusWriter, CartReader, CartWriter, KeyPointReader, KeyPointWriter, Pagination,
    ProblemListQuery, ProblemReader, ProblemWriter, PurchaseReader, PurchaseWriter,
    ReplacementListQuery, ReplacementReader, ReplacementWriter, ReviewReader, ReviewWriter,
    TourListQuery, TourReader, TourWriter, UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
        fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
        fn list_blocked_users(&self) -> RepositoryResult<Vec<User>>;
        fn list_user_interests(&self, user_id: i32) -> RepositoryResult<Vec<i32>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
        fn set_login_state(&self, user_id: i32, state: LoginState) -> RepositoryResult<User>;
        fn update_profile(&self, user_id: i32, updates: &UpdateProfile) -> RepositoryResult<User>;
        fn set_user_interests(&self, user_id: i32, interest_ids: &[i32]) -> RepositoryResult<()>;
    }

    impl TourReader for Repository {
        fn get_tour_by_id(&self, id: i32) -> RepositoryResult<Option<Tour>>;
        fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)>;
        fn list_tours_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tour>>;
    }

    impl TourWriter for Repository {
        fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour>;
        fn update_tour(&self, tour_id: i32, updates: &UpdateTour) -> RepositoryResult<Tour>;
        fn delete_tour(&self, tour_id: i32) -> RepositoryResult<()>;
    }

    impl KeyPointReader for Repository {
        fn get_keypoint_by_id(&self, id: i32) -> RepositoryResult<Option<KeyPoint>>;
        fn list_keypoints_by_tour(&self, tour_id: i32) -> RepositoryResult<Vec<KeyPoint>>;
        fn count_keypoints(&self, tour_id: i32) -> RepositoryResult<usize>;
    }

    impl KeyPointWriter for Repository {
        fn create_keypoint(&self, new_keypoint: &NewKeyPoint) -> RepositoryResult<KeyPoint>;
        fn update_keypoint(
            &self,
            keypoint_id: i32,
            updates: &UpdateKeyPoint,
        ) -> RepositoryResult<KeyPoint>;
        fn delete_keypoint(&self, keypoint_id: i32) -> RepositoryResult<()>;
    }

    impl CartReader for Repository {
        fn get_cart_by_tourist(&self, tourist_id: i32) -> RepositoryResult<Option<ShoppingCart>>;
    }

    impl CartWriter for Repository {
        fn create_cart(&self, tourist_id: i32) -> RepositoryResult<ShoppingCart>;
        fn add_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart>;
        fn remove_cart_item(&self, cart_id: i32, tour_id: i32) -> RepositoryResult<ShoppingCart>;
        fn clear_cart(&self, cart_id: i32) -> RepositoryResult<ShoppingCart>;
    }

    impl PurchaseReader for Repository {
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

    impl PurchaseWriter for Repository {
        fn checkout<'a>(
            &self,
            new_purchase: &NewTourPurchase,
            cart_id: i32,
            spend: Option<&'a NewBonusTransaction>,
        ) -> RepositoryResult<TourPurchase>;
        fn cancel_purchase(
            &self,
            purchase_id: i32,
            refund: &NewBonusTransaction,
        ) -> RepositoryResult<TourPurchase>;
    }

    impl BonusReader for Repository {
        fn get_bonus_account(&self, tourist_id: i32) -> RepositoryResult<Option<BonusAccount>>;
        fn list_bonus_transactions(
            &self,
            tourist_id: i32,
            pagination: Option<Pagination>,
        ) -> RepositoryResult<(usize, Vec<BonusTransaction>)>;
        fn list_stale_bonus_accounts(
            &self,
            cutoff: NaiveDateTime,
        ) -> RepositoryResult<Vec<BonusAccount>>;
    }

    impl BonusWriter for Repository {
        fn create_bonus_account(&self, tourist_id: i32) -> RepositoryResult<BonusAccount>;
        fn record_bonus_transaction(
            &self,
            tx: &NewBonusTransaction,
        ) -> RepositoryResult<BonusAccount>;
    }

    impl ProblemReader for Repository {
        fn get_problem_by_id(&self, id: i32)
        -> RepositoryResult<Option<(TourProblem, Tour, User)>>;
        fn list_problems(
            &self,
            query: ProblemListQuery,
        ) -> RepositoryResult<(usize, Vec<(TourProblem, Tour, User)>)>;
    }

    impl ProblemWriter for Repository {
        fn create_problem(&self, new_problem: &NewTourProblem) -> RepositoryResult<TourProblem>;
        fn set_problem_status(
            &self,
            problem_id: i32,
            status: TourProblemStatus,
            at: NaiveDateTime,
        ) -> RepositoryResult<TourProblem>;
    }

    impl ReplacementReader for Repository {
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

    impl ReplacementWriter for Repository {
        fn create_replacement(
            &self,
            new_replacement: &NewTourReplacement,
        ) -> RepositoryResult<TourReplacement>;
        fn accept_replacement(
            &self,
            replacement_id: i32,
            replacement_guide_id: i32,
            at: NaiveDateTime,
        ) -> RepositoryResult<TourReplacement>;
        fn cancel_replacement(
            &self,
            replacement_id: i32,
            at: NaiveDateTime,
        ) -> RepositoryResult<TourReplacement>;
        fn expire_stale_replacements(&self, now: NaiveDateTime) -> RepositoryResult<usize>;
    }

    impl ReviewReader for Repository {
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

    impl ReviewWriter for Repository {
        fn create_review(&self, new_review: &NewTourReview) -> RepositoryResult<TourReview>;
    }
}
