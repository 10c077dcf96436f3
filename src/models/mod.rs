//! Diesel row types and their conversions to domain entities.

pub mod collection;
#[cfg(feature = "server")]
pub mod config;
pub mod image;
pub mod user;
