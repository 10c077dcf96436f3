use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CollectionId, CollectionName, Description, ImageId, UserId};

/// Named grouping of images owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    pub id: CollectionId,
    pub owner_id: UserId,
    pub name: CollectionName,
    pub description: Option<Description>,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Collection`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCollection {
    pub owner_id: UserId,
    pub name: CollectionName,
    pub description: Option<Description>,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewCollection {
    /// New collections are never public and never part of the show case.
    pub fn private(
        owner_id: UserId,
        name: CollectionName,
        description: Option<Description>,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            owner_id,
            name,
            description,
            is_public: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changes applied to an existing [`Collection`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionUpdate {
    pub name: Option<CollectionName>,
    pub description: Option<Description>,
    pub is_public: Option<bool>,
}

/// Membership link between a collection and an image.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CollectionImage {
    pub collection_id: CollectionId,
    pub image_id: ImageId,
    pub created_at: NaiveDateTime,
}
