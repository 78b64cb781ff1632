//! Repository implementation for guide replacement requests.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, Utc};
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::replacement::{NewTourReplacement, TourReplacement, TourReplacementStatus};
use crate::domain::tour::Tour;
use crate::models::replacement::{
    NewTourReplacement as DbNewTourReplacement, TourReplacement as DbTourReplacement,
};
use crate::models::tour::Tour as DbTour;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, ReplacementListQuery, ReplacementReader, ReplacementWriter,
};

fn attach_tours(
    conn: &mut SqliteConnection,
    heads: Vec<DbTourReplacement>,
) -> RepositoryResult<Vec<(TourReplacement, Tour)>> {
    use crate::schema::tours;

    let tour_ids: Vec<i32> = {
        let set: HashSet<i32> = heads.iter().map(|r| r.tour_id).collect();
        set.into_iter().collect()
    };

    let tour_map: HashMap<i32, DbTour> = tours::table
        .filter(tours::id.eq_any(tour_ids))
        .load::<DbTour>(conn)?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let mut combined = Vec::with_capacity(heads.len());
    for head in heads {
        let Some(db_tour) = tour_map.get(&head.tour_id) else {
            continue;
        };
        combined.push((
            TourReplacement::try_from(head).map_err(RepositoryError::from)?,
            Tour::try_from(db_tour.clone()).map_err(RepositoryError::from)?,
        ));
    }

    Ok(combined)
}

impl ReplacementReader for DieselRepository {
    fn get_replacement_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<(TourReplacement, Tour)>> {
        use crate::schema::tour_replacements;

        let mut conn = self.conn()?;
        let head = tour_replacements::table
            .find(id)
            .first::<DbTourReplacement>(&mut conn)
            .optional()?;

        match head {
            Some(head) => Ok(attach_tours(&mut conn, vec![head])?.into_iter().next()),
            None => Ok(None),
        }
    }

    fn list_replacements(
        &self,
        query: ReplacementListQuery,
    ) -> RepositoryResult<(usize, Vec<(TourReplacement, Tour)>)> {
        use crate::schema::tour_replacements;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = tour_replacements::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(guide_id) = query.original_guide_id {
                items = items.filter(tour_replacements::original_guide_id.eq(guide_id));
            }
            if let Some(guide_id) = query.exclude_guide_id {
                items = items.filter(tour_replacements::original_guide_id.ne(guide_id));
            }
            if let Some(status) = query.status {
                items = items.filter(tour_replacements::status.eq(i32::from(status)));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = if query.newest_first {
            query_builder().order((
                tour_replacements::requested_at.desc(),
                tour_replacements::id.desc(),
            ))
        } else {
            query_builder().order((
                tour_replacements::requested_at.asc(),
                tour_replacements::id.asc(),
            ))
        };

        if let Some(pagination) = &query.pagination {
            items = items.limit(pagination.limit()).offset(pagination.offset());
        }

        let heads = items.load::<DbTourReplacement>(&mut conn)?;
        let combined = attach_tours(&mut conn, heads)?;

        Ok((total, combined))
    }

    fn has_pending_replacement(&self, tour_id: i32) -> RepositoryResult<bool> {
        use crate::schema::tour_replacements;

        let mut conn = self.conn()?;
        let found = diesel::select(exists(
            tour_replacements::table
                .filter(tour_replacements::tour_id.eq(tour_id))
                .filter(
                    tour_replacements::status.eq(i32::from(TourReplacementStatus::Pending)),
                ),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(found)
    }
}

impl ReplacementWriter for DieselRepository {
    fn create_replacement(
        &self,
        new_replacement: &NewTourReplacement,
    ) -> RepositoryResult<TourReplacement> {
        use crate::schema::tour_replacements;

        let mut conn = self.conn()?;
        let db_new_replacement: DbNewTourReplacement = new_replacement.into();

        let replacement = diesel::insert_into(tour_replacements::table)
            .values(&db_new_replacement)
            .get_result::<DbTourReplacement>(&mut conn)?;

        TourReplacement::try_from(replacement).map_err(RepositoryError::from)
    }

    fn accept_replacement(
        &self,
        replacement_id: i32,
        replacement_guide_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourReplacement> {
        use crate::schema::{tour_replacements, tours};

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(
                tour_replacements::table
                    .find(replacement_id)
                    .filter(
                        tour_replacements::status.eq(i32::from(TourReplacementStatus::Pending)),
                    ),
            )
            .set((
                tour_replacements::status.eq(i32::from(TourReplacementStatus::Accepted)),
                tour_replacements::replacement_guide_id.eq(Some(replacement_guide_id)),
                tour_replacements::accepted_at.eq(Some(at)),
            ))
            .execute(conn)?;

            if affected == 0 {
                return Err(pending_guard_error(conn, replacement_id)?);
            }

            let replacement = tour_replacements::table
                .find(replacement_id)
                .first::<DbTourReplacement>(conn)?;

            diesel::update(tours::table.find(replacement.tour_id))
                .set((
                    tours::guide_id.eq(replacement_guide_id),
                    tours::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            TourReplacement::try_from(replacement).map_err(RepositoryError::from)
        })
    }

    fn cancel_replacement(
        &self,
        replacement_id: i32,
        at: NaiveDateTime,
    ) -> RepositoryResult<TourReplacement> {
        use crate::schema::tour_replacements;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(
                tour_replacements::table
                    .find(replacement_id)
                    .filter(
                        tour_replacements::status.eq(i32::from(TourReplacementStatus::Pending)),
                    ),
            )
            .set((
                tour_replacements::status.eq(i32::from(TourReplacementStatus::Cancelled)),
                tour_replacements::cancelled_at.eq(Some(at)),
            ))
            .execute(conn)?;

            if affected == 0 {
                return Err(pending_guard_error(conn, replacement_id)?);
            }

            let replacement = tour_replacements::table
                .find(replacement_id)
                .first::<DbTourReplacement>(conn)?;

            TourReplacement::try_from(replacement).map_err(RepositoryError::from)
        })
    }

    fn expire_stale_replacements(&self, now: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::{tour_replacements, tours};

        let mut conn = self.conn()?;

        let departed_tours = tours::table.filter(tours::date.le(now)).select(tours::id);

        let affected = diesel::update(
            tour_replacements::table
                .filter(tour_replacements::status.eq(i32::from(TourReplacementStatus::Pending)))
                .filter(tour_replacements::tour_id.eq_any(departed_tours)),
        )
        .set(tour_replacements::status.eq(i32::from(TourReplacementStatus::Expired)))
        .execute(&mut conn)?;

        Ok(affected)
    }
}

/// Distinguishes a missing row from one that already left the pending state.
fn pending_guard_error(
    conn: &mut SqliteConnection,
    replacement_id: i32,
) -> RepositoryResult<RepositoryError> {
    use crate::schema::tour_replacements;

    let exists = tour_replacements::table
        .find(replacement_id)
        .first::<DbTourReplacement>(conn)
        .optional()?
        .is_some();

    Ok(if exists {
        RepositoryError::ConstraintViolation("Replacement request is not pending".to_string())
    } else {
        RepositoryError::NotFound
    })
}
