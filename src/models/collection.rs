use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::collection::{
    Collection as DomainCollection, CollectionImage as DomainCollectionImage, CollectionUpdate,
    NewCollection as DomainNewCollection,
};
use crate::domain::types::{CollectionName, Description, TypeConstraintError};

/// Diesel model representing the `collections` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::collections)]
pub struct Collection {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Collection`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::collections)]
pub struct NewCollection {
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::collections)]
pub struct CollectionChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `collection_images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::collection_images)]
#[diesel(primary_key(collection_id, image_id))]
pub struct CollectionImage {
    pub collection_id: i32,
    pub image_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::collection_images)]
pub struct NewCollectionImage {
    pub collection_id: i32,
    pub image_id: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Collection> for DomainCollection {
    type Error = TypeConstraintError;

    fn try_from(collection: Collection) -> Result<Self, Self::Error> {
        Ok(Self {
            id: collection.id.try_into()?,
            owner_id: collection.owner_id.try_into()?,
            name: CollectionName::new(collection.name)?,
            description: collection.description.map(Description::new).transpose()?,
            is_public: collection.is_public,
            created_at: collection.created_at,
            updated_at: collection.updated_at,
        })
    }
}

impl TryFrom<CollectionImage> for DomainCollectionImage {
    type Error = TypeConstraintError;

    fn try_from(link: CollectionImage) -> Result<Self, Self::Error> {
        Ok(Self {
            collection_id: link.collection_id.try_into()?,
            image_id: link.image_id.try_into()?,
            created_at: link.created_at,
        })
    }
}

impl From<DomainNewCollection> for NewCollection {
    fn from(collection: DomainNewCollection) -> Self {
        Self {
            owner_id: collection.owner_id.get(),
            name: collection.name.into_inner(),
            description: collection.description.map(Description::into_inner),
            is_public: collection.is_public,
            created_at: collection.created_at,
            updated_at: collection.updated_at,
        }
    }
}

impl CollectionChangeset {
    pub fn new(update: CollectionUpdate, now: NaiveDateTime) -> Self {
        Self {
            name: update.name.map(CollectionName::into_inner),
            description: update.description.map(Description::into_inner),
            is_public: update.is_public,
            updated_at: now,
        }
    }
}
