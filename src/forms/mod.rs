//! Request bodies accepted by the JSON API and their validated payloads.

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod collections;
pub mod images;
pub mod profiles;

/// Treat a missing or blank optional text field as absent.
pub(crate) fn optional_text<T>(
    value: Option<String>,
    build: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    match value {
        Some(text) if !text.trim().is_empty() => build(text).map(Some),
        _ => Ok(None),
    }
}
