use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::collection::{Collection, CollectionImage};
use crate::domain::image::Image;
use crate::dto::images::ImageDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionDto {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    /// Only filled in when a single collection is requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageDto>>,
}

impl From<Collection> for CollectionDto {
    fn from(value: Collection) -> Self {
        Self {
            id: value.id.get(),
            owner_id: value.owner_id.get(),
            name: value.name.as_str().to_string(),
            description: value.description.map(|d| d.as_str().to_string()),
            is_public: value.is_public,
            created_at: value.created_at,
            updated_at: value.updated_at,
            images: None,
        }
    }
}

impl From<(Collection, Vec<Image>)> for CollectionDto {
    fn from((collection, images): (Collection, Vec<Image>)) -> Self {
        Self {
            images: Some(images.into_iter().map(ImageDto::from).collect()),
            ..collection.into()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CollectionImageDto {
    pub collection_id: i32,
    pub image_id: i32,
    pub created_at: NaiveDateTime,
}

impl From<CollectionImage> for CollectionImageDto {
    fn from(value: CollectionImage) -> Self {
        Self {
            collection_id: value.collection_id.get(),
            image_id: value.image_id.get(),
            created_at: value.created_at,
        }
    }
}
