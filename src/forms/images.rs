use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::image::{ImageUpdate, NewImage};
use crate::domain::types::{
    Compression, Description, Dimension, ImageName, ImagePrice, Resolution, ResolutionUnit,
    StoragePath, TypeConstraintError,
};
use crate::forms::optional_text;

#[derive(Debug, Error)]
pub enum ImageFormError {
    #[error("Image form validation failed: {0}")]
    Validation(String),
    #[error("Image form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ImageFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ImageFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Metadata of one uploaded asset.
#[derive(Serialize, Deserialize, Validate)]
pub struct ImageForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub compression: Option<String>,
    #[validate(range(min = 0))]
    pub x_dimension: Option<i32>,
    #[validate(range(min = 0))]
    pub y_dimension: Option<i32>,
    #[validate(range(min = 0.0))]
    pub x_resolution: Option<f64>,
    #[validate(range(min = 0.0))]
    pub y_resolution: Option<f64>,
    pub resolution_unit: Option<String>,
    #[validate(length(min = 1))]
    pub path: String,
}

impl TryFrom<ImageForm> for NewImage {
    type Error = ImageFormError;

    fn try_from(value: ImageForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: ImageName::new(value.name)?,
            description: optional_text(value.description, Description::new)?,
            price: ImagePrice::new(value.price)?,
            compression: optional_text(value.compression, Compression::new)?,
            x_dimension: value.x_dimension.map(Dimension::new).transpose()?,
            y_dimension: value.y_dimension.map(Dimension::new).transpose()?,
            x_resolution: value.x_resolution.map(Resolution::new).transpose()?,
            y_resolution: value.y_resolution.map(Resolution::new).transpose()?,
            resolution_unit: optional_text(value.resolution_unit, ResolutionUnit::new)?,
            path: StoragePath::new(value.path)?,
            created_at: Utc::now().naive_utc(),
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UploadImagesForm {
    #[validate(length(min = 1))]
    pub images: Vec<ImageForm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadImagesFormPayload {
    pub images: Vec<NewImage>,
}

impl TryFrom<UploadImagesForm> for UploadImagesFormPayload {
    type Error = ImageFormError;

    fn try_from(value: UploadImagesForm) -> Result<Self, Self::Error> {
        value.validate()?;

        let images = value
            .images
            .into_iter()
            .map(NewImage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { images })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateImageForm {
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub compression: Option<String>,
    pub resolution_unit: Option<String>,
}

impl TryFrom<UpdateImageForm> for ImageUpdate {
    type Error = ImageFormError;

    fn try_from(value: UpdateImageForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            name: optional_text(value.name, ImageName::new)?,
            description: optional_text(value.description, Description::new)?,
            price: value.price.map(ImagePrice::new).transpose()?,
            compression: optional_text(value.compression, Compression::new)?,
            resolution_unit: optional_text(value.resolution_unit, ResolutionUnit::new)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_form(name: &str, price: f64) -> ImageForm {
        ImageForm {
            name: name.into(),
            description: Some("   ".into()),
            price,
            compression: Some("JPEG".into()),
            x_dimension: Some(4000),
            y_dimension: Some(3000),
            x_resolution: Some(300.0),
            y_resolution: Some(300.0),
            resolution_unit: Some("dpi".into()),
            path: "uploads/sunset.jpg".into(),
        }
    }

    #[test]
    fn upload_form_keeps_input_order() {
        let form = UploadImagesForm {
            images: vec![image_form("Sunset", 10.0), image_form("Dawn", 0.0)],
        };
        let payload = UploadImagesFormPayload::try_from(form).unwrap();
        let names: Vec<&str> = payload.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Sunset", "Dawn"]);
        assert!(payload.images[0].description.is_none());
    }

    #[test]
    fn upload_form_rejects_negative_price() {
        let form = UploadImagesForm {
            images: vec![image_form("Sunset", -1.0)],
        };
        assert!(matches!(
            UploadImagesFormPayload::try_from(form).unwrap_err(),
            ImageFormError::Validation(_)
        ));
    }

    #[test]
    fn upload_form_requires_at_least_one_image() {
        let form = UploadImagesForm { images: vec![] };
        let err = UploadImagesFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, ImageFormError::Validation(_)));
    }
}
