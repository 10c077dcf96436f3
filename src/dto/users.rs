use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::user::{User, UserProfile};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: &'static str,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            email: value.email.as_str().to_string(),
            first_name: value.first_name.as_str().to_string(),
            last_name: value.last_name.as_str().to_string(),
            role: value.role.as_str(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDto {
    pub user_id: i32,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub homepage: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub updated_at: NaiveDateTime,
}

impl From<UserProfile> for ProfileDto {
    fn from(value: UserProfile) -> Self {
        Self {
            user_id: value.user_id.get(),
            address: value.address.map(String::from),
            phone: value.phone.map(String::from),
            company: value.company.map(String::from),
            homepage: value.homepage.map(String::from),
            birthday: value.birthday,
            updated_at: value.updated_at,
        }
    }
}
