//! Domain entities and value objects of the photo platform.

pub mod auth;
pub mod collection;
pub mod image;
pub mod types;
pub mod user;
