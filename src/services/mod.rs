//! Business operations of the photo platform.
//!
//! Every function receives the caller as an explicit [`AuthenticatedUser`]
//! and is generic over the repository traits it needs, so that routes stay
//! thin and tests can run against the in-memory repository.

use crate::domain::auth::AuthenticatedUser;
use crate::domain::types::UserRole;
use crate::repository::RepositoryError;

pub mod auth;
pub mod collections;
pub mod errors;
pub mod images;
pub mod profiles;

pub use errors::{ConflictKind, ServiceError, ServiceResult};

/// Photographers are the only users allowed to upload images and manage
/// collections.
fn ensure_photographer(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.has_role(UserRole::Photographer) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// Log a repository failure and hide it behind [`ServiceError::Internal`].
fn internal(action: &'static str) -> impl FnOnce(RepositoryError) -> ServiceError {
    move |e| {
        log::error!("Failed to {action}: {e}");
        ServiceError::Internal
    }
}
