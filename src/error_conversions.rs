//! Conversions from validation errors into [`ServiceError`].
//!
//! Kept apart from the domain layer so that `data`-only consumers do not pull
//! in service and form types.

use crate::domain::types::TypeConstraintError;
use crate::forms::auth::AuthFormError;
use crate::forms::collections::CollectionFormError;
use crate::forms::images::ImageFormError;
use crate::forms::profiles::ProfileFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        let field = match &val {
            TypeConstraintError::NonPositiveId(field)
            | TypeConstraintError::NegativeNumber(field)
            | TypeConstraintError::EmptyString(field)
            | TypeConstraintError::InvalidEmail(field) => field,
            TypeConstraintError::InvalidValue(_) => "value",
        };
        ServiceError::InvalidArgument {
            field,
            reason: val.to_string(),
        }
    }
}

impl From<AuthFormError> for ServiceError {
    fn from(val: AuthFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ImageFormError> for ServiceError {
    fn from(val: ImageFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CollectionFormError> for ServiceError {
    fn from(val: CollectionFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ProfileFormError> for ServiceError {
    fn from(val: ProfileFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
