use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Address, Company, Homepage, PersonName, Phone, UserEmail, UserId, UserRole,
};

/// Registered platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    /// Argon2 PHC string; never leaves the server.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password_hash: String,
    pub role: UserRole,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
}

/// Public contact details of a photographer. Saving a profile replaces every
/// field, so a missing value clears it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user_id: UserId,
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub company: Option<Company>,
    pub homepage: Option<Homepage>,
    pub birthday: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}
