//! Repository implementation for platform users.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::user::{LoginState, NewUser, UpdateProfile, User};
use crate::models::user::{
    LoginStateChangeset, NewUser as DbNewUser, UpdateProfileChangeset, User as DbUser,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table.find(id).first::<DbUser>(&mut conn).optional()?;

        user.map(|u| User::try_from(u).map_err(RepositoryError::from))
            .transpose()
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::username.eq(username))
            .first::<DbUser>(&mut conn)
            .optional()?;

        user.map(|u| User::try_from(u).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_blocked_users(&self) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        users::table
            .filter(users::blocked.eq(true))
            .order(users::id.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|u| User::try_from(u).map_err(RepositoryError::from))
            .collect()
    }

    fn list_user_interests(&self, user_id: i32) -> RepositoryResult<Vec<i32>> {
        use crate::schema::user_interests;

        let mut conn = self.conn()?;
        let interests = user_interests::table
            .filter(user_interests::user_id.eq(user_id))
            .select(user_interests::interest_id)
            .order(user_interests::interest_id.asc())
            .load::<i32>(&mut conn)?;

        Ok(interests)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }

    fn set_login_state(&self, user_id: i32, state: LoginState) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let changeset: LoginStateChangeset = state.into();

        let user = diesel::update(users::table.find(user_id))
            .set((changeset, users::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }

    fn update_profile(&self, user_id: i32, updates: &UpdateProfile) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let changeset: UpdateProfileChangeset = updates.into();

        let user = diesel::update(users::table.find(user_id))
            .set((changeset, users::updated_at.eq(Utc::now().naive_utc())))
            .get_result::<DbUser>(&mut conn)?;

        User::try_from(user).map_err(RepositoryError::from)
    }

    fn set_user_interests(&self, user_id: i32, interest_ids: &[i32]) -> RepositoryResult<()> {
        use crate::schema::user_interests;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                user_interests::table.filter(user_interests::user_id.eq(user_id)),
            )
            .execute(conn)?;

            let rows: Vec<_> = interest_ids
                .iter()
                .map(|&interest_id| {
                    (
                        user_interests::user_id.eq(user_id),
                        user_interests::interest_id.eq(interest_id),
                    )
                })
                .collect();
            diesel::insert_into(user_interests::table)
                .values(&rows)
                .execute(conn)?;

            Ok(())
        })
    }
}
