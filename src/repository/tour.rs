//! Repository implementation for tours.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::tour::{NewTour, Tour, UpdateTour};
use crate::models::tour::{NewTour as DbNewTour, Tour as DbTour, UpdateTour as DbUpdateTour};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, SortDirection, TourListQuery, TourReader, TourWriter};

impl TourReader for DieselRepository {
    fn get_tour_by_id(&self, id: i32) -> RepositoryResult<Option<Tour>> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let tour = tours::table.find(id).first::<DbTour>(&mut conn).optional()?;

        tour.map(|t| Tour::try_from(t).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_tours(&self, query: TourListQuery) -> RepositoryResult<(usize, Vec<Tour>)> {
        use crate::schema::tours;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = tours::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(guide_id) = query.guide_id {
                items = items.filter(tours::guide_id.eq(guide_id));
            }
            if let Some(state) = query.state {
                items = items.filter(tours::state.eq(i32::from(state)));
            }
            if let Some(category) = query.category {
                items = items.filter(tours::category.eq(category));
            }
            if let Some(difficulty) = query.difficulty {
                items = items.filter(tours::difficulty.eq(difficulty));
            }
            if let Some(max_price) = query.max_price {
                items = items.filter(tours::price.le(max_price));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = match query.date_sort {
            Some(SortDirection::Ascending) => query_builder().order(tours::date.asc()),
            Some(SortDirection::Descending) => query_builder().order(tours::date.desc()),
            None => query_builder().order(tours::id.asc()),
        };

        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let tours = items
            .load::<DbTour>(&mut conn)?
            .into_iter()
            .map(|t| Tour::try_from(t).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<Tour>>>()?;

        Ok((total, tours))
    }

    fn list_tours_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Tour>> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        tours::table
            .filter(tours::id.eq_any(ids))
            .order(tours::id.asc())
            .load::<DbTour>(&mut conn)?
            .into_iter()
            .map(|t| Tour::try_from(t).map_err(RepositoryError::from))
            .collect()
    }
}

impl TourWriter for DieselRepository {
    fn create_tour(&self, new_tour: &NewTour) -> RepositoryResult<Tour> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let db_new_tour: DbNewTour = new_tour.into();

        let tour = diesel::insert_into(tours::table)
            .values(&db_new_tour)
            .get_result::<DbTour>(&mut conn)?;

        Tour::try_from(tour).map_err(RepositoryError::from)
    }

    fn update_tour(&self, tour_id: i32, updates: &UpdateTour) -> RepositoryResult<Tour> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateTour = updates.into();

        let tour = diesel::update(tours::table.find(tour_id))
            .set((db_updates, tours::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbTour>(&mut conn)?;

        Tour::try_from(tour).map_err(RepositoryError::from)
    }

    fn delete_tour(&self, tour_id: i32) -> RepositoryResult<()> {
        use crate::schema::tours;

        let mut conn = self.conn()?;
        let affected = diesel::delete(tours::table.find(tour_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
