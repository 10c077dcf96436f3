use diesel::prelude::*;

use crate::domain::types::{UserEmail, UserId};
use crate::domain::user::{NewUser, User, UserProfile};
use crate::models::user::{NewUser as DbNewUser, User as DbUser, UserProfile as DbUserProfile};
use crate::repository::{DieselRepository, RepositoryResult, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::id.eq(id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(TryInto::try_into).transpose()?)
    }

    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(TryInto::try_into).transpose()?)
    }

    fn get_user_by_reset_token(&self, token: &str) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let user = users::table
            .filter(users::password_reset_token.eq(token))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(TryInto::try_into).transpose()?)
    }

    fn get_user_profile(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;

        let profile = user_profiles::table
            .filter(user_profiles::user_id.eq(user_id.get()))
            .first::<DbUserProfile>(&mut conn)
            .optional()?;

        Ok(profile.map(TryInto::try_into).transpose()?)
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user: DbNewUser = user.clone().into();

        let created = diesel::insert_into(users::table)
            .values(db_user)
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn set_password_reset_token(&self, user_id: UserId, token: &str) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let affected = diesel::update(users::table.filter(users::id.eq(user_id.get())))
            .set(users::password_reset_token.eq(Some(token)))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn reset_password(&self, user_id: UserId, password_hash: &str) -> RepositoryResult<usize> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let affected = diesel::update(users::table.filter(users::id.eq(user_id.get())))
            .set((
                users::password_hash.eq(password_hash),
                users::password_reset_token.eq(None::<String>),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn save_user_profile(&self, profile: &UserProfile) -> RepositoryResult<UserProfile> {
        use crate::schema::user_profiles;

        let mut conn = self.conn()?;
        let row: DbUserProfile = profile.clone().into();

        let saved = diesel::insert_into(user_profiles::table)
            .values(&row)
            .on_conflict(user_profiles::user_id)
            .do_update()
            .set(&row)
            .get_result::<DbUserProfile>(&mut conn)?;

        Ok(saved.try_into()?)
    }
}
