use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::types::{
    Address, Company, Homepage, PersonName, Phone, TypeConstraintError, UserEmail, UserRole,
};
use crate::domain::user::{
    NewUser as DomainNewUser, User as DomainUser, UserProfile as DomainUserProfile,
};

/// Diesel model representing the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
    pub password_reset_token: Option<String>,
}

/// Insertable form of [`User`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            email: UserEmail::new(user.email)?,
            first_name: PersonName::new(user.first_name)?,
            last_name: PersonName::new(user.last_name)?,
            password_hash: user.password_hash,
            role: UserRole::try_from(user.role.as_str())?,
            enabled: user.enabled,
            created_at: user.created_at,
        })
    }
}

impl From<DomainNewUser> for NewUser {
    fn from(user: DomainNewUser) -> Self {
        Self {
            email: user.email.into_inner(),
            first_name: user.first_name.into_inner(),
            last_name: user.last_name.into_inner(),
            password_hash: user.password_hash,
            role: user.role.as_str().to_string(),
            enabled: user.enabled,
            created_at: user.created_at,
        }
    }
}

/// Row of the `user_profiles` table. `None` fields are written as `NULL` so
/// that saving a profile clears omitted values.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_profiles)]
#[diesel(primary_key(user_id))]
#[diesel(treat_none_as_null = true)]
pub struct UserProfile {
    pub user_id: i32,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub homepage: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserProfile> for DomainUserProfile {
    type Error = TypeConstraintError;

    fn try_from(profile: UserProfile) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: profile.user_id.try_into()?,
            address: profile.address.map(Address::new).transpose()?,
            phone: profile.phone.map(Phone::new).transpose()?,
            company: profile.company.map(Company::new).transpose()?,
            homepage: profile.homepage.map(Homepage::new).transpose()?,
            birthday: profile.birthday,
            updated_at: profile.updated_at,
        })
    }
}

impl From<DomainUserProfile> for UserProfile {
    fn from(profile: DomainUserProfile) -> Self {
        Self {
            user_id: profile.user_id.get(),
            address: profile.address.map(Address::into_inner),
            phone: profile.phone.map(Phone::into_inner),
            company: profile.company.map(Company::into_inner),
            homepage: profile.homepage.map(Homepage::into_inner),
            birthday: profile.birthday,
            updated_at: profile.updated_at,
        }
    }
}
