use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::image::{Image, UserImage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub compression: Option<String>,
    pub x_dimension: Option<i32>,
    pub y_dimension: Option<i32>,
    pub x_resolution: Option<f64>,
    pub y_resolution: Option<f64>,
    pub resolution_unit: Option<String>,
    pub path: String,
    pub created_at: NaiveDateTime,
}

impl From<Image> for ImageDto {
    fn from(value: Image) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.as_str().to_string(),
            description: value.description.map(|d| d.as_str().to_string()),
            price: value.price.get(),
            compression: value.compression.map(|c| c.as_str().to_string()),
            x_dimension: value.x_dimension.map(|d| d.get()),
            y_dimension: value.y_dimension.map(|d| d.get()),
            x_resolution: value.x_resolution.map(|r| r.get()),
            y_resolution: value.y_resolution.map(|r| r.get()),
            resolution_unit: value.resolution_unit.map(|u| u.as_str().to_string()),
            path: value.path.as_str().to_string(),
            created_at: value.created_at,
        }
    }
}

/// An image as seen by its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserImageDto {
    pub owner_id: i32,
    #[serde(flatten)]
    pub image: ImageDto,
}

impl From<UserImage> for UserImageDto {
    fn from(value: UserImage) -> Self {
        Self {
            owner_id: value.owner_id.get(),
            image: value.image.into(),
        }
    }
}
