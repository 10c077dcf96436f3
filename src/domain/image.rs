use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Compression, Description, Dimension, ImageId, ImageName, ImagePrice, Resolution,
    ResolutionUnit, StoragePath, UserId,
};

/// Metadata of an uploaded image asset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    pub id: ImageId,
    pub name: ImageName,
    pub description: Option<Description>,
    pub price: ImagePrice,
    pub compression: Option<Compression>,
    pub x_dimension: Option<Dimension>,
    pub y_dimension: Option<Dimension>,
    pub x_resolution: Option<Resolution>,
    pub y_resolution: Option<Resolution>,
    pub resolution_unit: Option<ResolutionUnit>,
    pub path: StoragePath,
    pub created_at: NaiveDateTime,
}

/// Information required to create a new [`Image`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewImage {
    pub name: ImageName,
    pub description: Option<Description>,
    pub price: ImagePrice,
    pub compression: Option<Compression>,
    pub x_dimension: Option<Dimension>,
    pub y_dimension: Option<Dimension>,
    pub x_resolution: Option<Resolution>,
    pub y_resolution: Option<Resolution>,
    pub resolution_unit: Option<ResolutionUnit>,
    pub path: StoragePath,
    pub created_at: NaiveDateTime,
}

/// Explicit metadata update of an existing [`Image`]. `None` leaves the
/// stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageUpdate {
    pub name: Option<ImageName>,
    pub description: Option<Description>,
    pub price: Option<ImagePrice>,
    pub compression: Option<Compression>,
    pub resolution_unit: Option<ResolutionUnit>,
}

impl ImageUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.compression.is_none()
            && self.resolution_unit.is_none()
    }
}

/// Ownership link between a user and an image.
///
/// Every image has exactly one owner, recorded when the image is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserImage {
    pub owner_id: UserId,
    pub image: Image,
    pub created_at: NaiveDateTime,
}
