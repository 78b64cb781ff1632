//! Repository implementation for tour reviews and their aggregates.

use diesel::dsl::exists;
use diesel::prelude::*;

use crate::domain::review::{NewTourReview, ReviewStatistics, TourReview};
use crate::models::review::{NewTourReview as DbNewTourReview, TourReview as DbTourReview};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, Pagination, ReviewReader, ReviewWriter};

impl ReviewReader for DieselRepository {
    fn get_review_by_id(&self, id: i32) -> RepositoryResult<Option<TourReview>> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;
        let review = tour_reviews::table
            .find(id)
            .first::<DbTourReview>(&mut conn)
            .optional()?;

        Ok(review.map(TourReview::from))
    }

    fn list_reviews_by_purchase(&self, purchase_id: i32) -> RepositoryResult<Vec<TourReview>> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;
        let reviews = tour_reviews::table
            .filter(tour_reviews::purchase_id.eq(purchase_id))
            .order((tour_reviews::reviewed_at.desc(), tour_reviews::id.desc()))
            .load::<DbTourReview>(&mut conn)?;

        Ok(reviews.into_iter().map(TourReview::from).collect())
    }

    fn list_reviews_by_tour(
        &self,
        tour_id: i32,
        pagination: Option<Pagination>,
    ) -> RepositoryResult<(usize, Vec<TourReview>)> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;

        let query_builder = || {
            tour_reviews::table
                .filter(tour_reviews::tour_id.eq(tour_id))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items =
            query_builder().order((tour_reviews::reviewed_at.desc(), tour_reviews::id.desc()));

        if let Some(pagination) = &pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let reviews = items
            .load::<DbTourReview>(&mut conn)?
            .into_iter()
            .map(TourReview::from)
            .collect();

        Ok((total, reviews))
    }

    fn review_exists(&self, purchase_id: i32, tour_id: i32) -> RepositoryResult<bool> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;
        let found = diesel::select(exists(
            tour_reviews::table
                .filter(tour_reviews::purchase_id.eq(purchase_id))
                .filter(tour_reviews::tour_id.eq(tour_id)),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }

    fn get_review_statistics(&self, tour_id: i32) -> RepositoryResult<ReviewStatistics> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;
        let ratings = tour_reviews::table
            .filter(tour_reviews::tour_id.eq(tour_id))
            .select(tour_reviews::rating)
            .load::<i32>(&mut conn)?;

        Ok(ReviewStatistics::from_ratings(tour_id, &ratings))
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &NewTourReview) -> RepositoryResult<TourReview> {
        use crate::schema::tour_reviews;

        let mut conn = self.conn()?;
        let db_new_review: DbNewTourReview = new_review.into();

        let review = diesel::insert_into(tour_reviews::table)
            .values(&db_new_review)
            .get_result::<DbTourReview>(&mut conn)?;

        Ok(TourReview::from(review))
    }
}
