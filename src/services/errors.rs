use thiserror::Error;

/// Reason a write was rejected as conflicting with existing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Another account is registered with the same email.
    EmailExists,
    /// The image is already a member of the collection.
    ImageAlreadyInCollection,
}

/// Generic error type used by service layer functions.
///
/// Expected business failures carry a stable numeric [`code`](Self::code)
/// that the HTTP layer forwards to clients. `Internal` never does: it marks
/// a broken invariant or an infrastructure failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
    /// `ids` lists the requested identifiers that could not be resolved.
    #[error("{entity} not found")]
    NotFound { entity: &'static str, ids: Vec<i32> },
    #[error("conflict: {detail}")]
    Conflict { kind: ConflictKind, detail: String },
    /// The user is not allowed to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// A submitted form failed validation.
    #[error("{0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

impl ServiceError {
    pub const BAD_REQUEST: u32 = 10000;
    pub const NOT_FOUND: u32 = 10001;
    pub const UNAUTHORIZED: u32 = 10002;
    pub const USER_EMAIL_EXISTS: u32 = 11002;
    pub const IMAGE_ALREADY_IN_COLLECTION: u32 = 11003;

    /// Client-facing code, or `None` for internal failures.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::InvalidArgument { .. } | Self::Form(_) => Some(Self::BAD_REQUEST),
            Self::NotFound { .. } => Some(Self::NOT_FOUND),
            Self::Unauthorized => Some(Self::UNAUTHORIZED),
            Self::Conflict {
                kind: ConflictKind::EmailExists,
                ..
            } => Some(Self::USER_EMAIL_EXISTS),
            Self::Conflict {
                kind: ConflictKind::ImageAlreadyInCollection,
                ..
            } => Some(Self::IMAGE_ALREADY_IN_COLLECTION),
            Self::Internal => None,
        }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::Form(_) => "invalid_form",
            Self::Internal => "internal",
        }
    }

    pub(crate) fn not_found(entity: &'static str) -> Self {
        Self::NotFound {
            entity,
            ids: Vec::new(),
        }
    }
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_have_no_client_code() {
        assert_eq!(ServiceError::Internal.code(), None);
        assert_eq!(ServiceError::not_found("image").code(), Some(10001));
        assert_eq!(
            ServiceError::InvalidArgument {
                field: "collection_id",
                reason: "missing".into(),
            }
            .code(),
            Some(10000)
        );
        assert_eq!(
            ServiceError::Conflict {
                kind: ConflictKind::EmailExists,
                detail: "taken".into(),
            }
            .code(),
            Some(11002)
        );
    }
}
