use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::collection::CollectionUpdate;
use crate::domain::types::{CollectionName, Description, ImageId, TypeConstraintError};
use crate::forms::optional_text;

#[derive(Debug, Error)]
pub enum CollectionFormError {
    #[error("Collection form validation failed: {0}")]
    Validation(String),
    #[error("Collection form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CollectionFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CollectionFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Body of `POST /collections`. Visibility cannot be chosen on creation.
#[derive(Deserialize, Validate)]
pub struct AddCollectionForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCollectionFormPayload {
    pub name: CollectionName,
    pub description: Option<Description>,
}

impl TryFrom<AddCollectionForm> for AddCollectionFormPayload {
    type Error = CollectionFormError;

    fn try_from(value: AddCollectionForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: CollectionName::new(value.name)?,
            description: optional_text(value.description, Description::new)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCollectionForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
}

impl TryFrom<UpdateCollectionForm> for CollectionUpdate {
    type Error = CollectionFormError;

    fn try_from(value: UpdateCollectionForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: optional_text(value.name, CollectionName::new)?,
            description: optional_text(value.description, Description::new)?,
            is_public: value.is_public,
        })
    }
}

/// Body of `POST /collections/{id}/images`.
///
/// An empty list is accepted here; the service reports it as not found.
#[derive(Deserialize, Validate)]
pub struct AddImagesToCollectionForm {
    pub image_ids: Vec<i32>,
}

/// Ids that can never name an image (zero or negative) are kept apart in
/// `invalid_ids` so they are reported as missing images, like ids that
/// resolve to nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct AddImagesToCollectionFormPayload {
    pub image_ids: Vec<ImageId>,
    pub invalid_ids: Vec<i32>,
}

impl TryFrom<AddImagesToCollectionForm> for AddImagesToCollectionFormPayload {
    type Error = CollectionFormError;

    fn try_from(value: AddImagesToCollectionForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let mut image_ids = Vec::with_capacity(value.image_ids.len());
        let mut invalid_ids = Vec::new();
        for raw in value.image_ids {
            match ImageId::new(raw) {
                Ok(id) => image_ids.push(id),
                Err(_) => invalid_ids.push(raw),
            }
        }

        Ok(Self {
            image_ids,
            invalid_ids,
        })
    }
}
