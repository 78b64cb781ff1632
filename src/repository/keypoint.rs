//! Repository implementation for tour key points.

use diesel::prelude::*;

use crate::domain::keypoint::{KeyPoint, NewKeyPoint, UpdateKeyPoint};
use crate::models::keypoint::{
    KeyPoint as DbKeyPoint, NewKeyPoint as DbNewKeyPoint, UpdateKeyPoint as DbUpdateKeyPoint,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, KeyPointReader, KeyPointWriter};

impl KeyPointReader for DieselRepository {
    fn get_keypoint_by_id(&self, id: i32) -> RepositoryResult<Option<KeyPoint>> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let keypoint = keypoints::table
            .find(id)
            .first::<DbKeyPoint>(&mut conn)
            .optional()?;

        Ok(keypoint.map(Into::into))
    }

    fn list_keypoints_by_tour(&self, tour_id: i32) -> RepositoryResult<Vec<KeyPoint>> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let keypoints = keypoints::table
            .filter(keypoints::tour_id.eq(tour_id))
            .order(keypoints::position.asc())
            .load::<DbKeyPoint>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(keypoints)
    }

    fn count_keypoints(&self, tour_id: i32) -> RepositoryResult<usize> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let total: i64 = keypoints::table
            .filter(keypoints::tour_id.eq(tour_id))
            .count()
            .get_result(&mut conn)?;

        Ok(total as usize)
    }
}

impl KeyPointWriter for DieselRepository {
    fn create_keypoint(&self, new_keypoint: &NewKeyPoint) -> RepositoryResult<KeyPoint> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let db_new_keypoint: DbNewKeyPoint = new_keypoint.into();

        let keypoint = diesel::insert_into(keypoints::table)
            .values(&db_new_keypoint)
            .get_result::<DbKeyPoint>(&mut conn)?;

        Ok(keypoint.into())
    }

    fn update_keypoint(
        &self,
        keypoint_id: i32,
        updates: &UpdateKeyPoint,
    ) -> RepositoryResult<KeyPoint> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateKeyPoint = updates.into();

        let keypoint = diesel::update(keypoints::table.find(keypoint_id))
            .set(db_updates)
            .get_result::<DbKeyPoint>(&mut conn)?;

        Ok(keypoint.into())
    }

    fn delete_keypoint(&self, keypoint_id: i32) -> RepositoryResult<()> {
        use crate::schema::keypoints;

        let mut conn = self.conn()?;
        let affected = diesel::delete(keypoints::table.find(keypoint_id)).execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
