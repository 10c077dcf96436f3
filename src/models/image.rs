use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::image::{
    Image as DomainImage, ImageUpdate, NewImage as DomainNewImage, UserImage as DomainUserImage,
};
use crate::domain::types::{
    Compression, Description, Dimension, ImageName, ImagePrice, Resolution, ResolutionUnit,
    StoragePath, TypeConstraintError,
};

/// Diesel model representing the `images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::images)]
pub struct Image {
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

/// Insertable form of [`Image`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::images)]
pub struct NewImage {
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

/// Partial update of [`Image`]; `None` fields are skipped by Diesel.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::images)]
pub struct ImageChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub compression: Option<String>,
    pub resolution_unit: Option<String>,
}

/// Diesel model representing the `user_images` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::user_images)]
#[diesel(primary_key(image_id))]
pub struct UserImage {
    pub image_id: i32,
    pub owner_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::user_images)]
pub struct NewUserImage {
    pub image_id: i32,
    pub owner_id: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Image> for DomainImage {
    type Error = TypeConstraintError;

    fn try_from(image: Image) -> Result<Self, Self::Error> {
        Ok(Self {
            id: image.id.try_into()?,
            name: ImageName::new(image.name)?,
            description: image.description.map(Description::new).transpose()?,
            price: ImagePrice::new(image.price)?,
            compression: image.compression.map(Compression::new).transpose()?,
            x_dimension: image.x_dimension.map(Dimension::new).transpose()?,
            y_dimension: image.y_dimension.map(Dimension::new).transpose()?,
            x_resolution: image.x_resolution.map(Resolution::new).transpose()?,
            y_resolution: image.y_resolution.map(Resolution::new).transpose()?,
            resolution_unit: image.resolution_unit.map(ResolutionUnit::new).transpose()?,
            path: StoragePath::new(image.path)?,
            created_at: image.created_at,
        })
    }
}

impl TryFrom<(UserImage, Image)> for DomainUserImage {
    type Error = TypeConstraintError;

    fn try_from((user_image, image): (UserImage, Image)) -> Result<Self, Self::Error> {
        if user_image.image_id != image.id {
            return Err(TypeConstraintError::InvalidValue(format!(
                "user image {} does not reference image {}",
                user_image.image_id, image.id
            )));
        }
        Ok(Self {
            owner_id: user_image.owner_id.try_into()?,
            image: image.try_into()?,
            created_at: user_image.created_at,
        })
    }
}

impl From<DomainNewImage> for NewImage {
    fn from(image: DomainNewImage) -> Self {
        Self {
            name: image.name.into_inner(),
            description: image.description.map(Description::into_inner),
            price: image.price.get(),
            compression: image.compression.map(Compression::into_inner),
            x_dimension: image.x_dimension.map(Dimension::get),
            y_dimension: image.y_dimension.map(Dimension::get),
            x_resolution: image.x_resolution.map(Resolution::get),
            y_resolution: image.y_resolution.map(Resolution::get),
            resolution_unit: image.resolution_unit.map(ResolutionUnit::into_inner),
            path: image.path.into_inner(),
            created_at: image.created_at,
        }
    }
}

impl From<ImageUpdate> for ImageChangeset {
    fn from(update: ImageUpdate) -> Self {
        Self {
            name: update.name.map(ImageName::into_inner),
            description: update.description.map(Description::into_inner),
            price: update.price.map(ImagePrice::get),
            compression: update.compression.map(Compression::into_inner),
            resolution_unit: update.resolution_unit.map(ResolutionUnit::into_inner),
        }
    }
}
