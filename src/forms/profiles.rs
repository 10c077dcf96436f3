use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{Address, Company, Homepage, Phone, TypeConstraintError};
use crate::forms::optional_text;

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("Profile form validation failed: {0}")]
    Validation(String),
    #[error("Profile form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Birthday cannot be in the future")]
    BirthdayInFuture,
}

impl From<ValidationErrors> for ProfileFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ProfileFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Body of `PUT /profile`. Omitted fields are cleared.
#[derive(Deserialize, Validate)]
pub struct ProfileForm {
    #[validate(length(max = 255))]
    pub address: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 255))]
    pub company: Option<String>,
    #[validate(length(max = 255))]
    pub homepage: Option<String>,
    /// `YYYY-MM-DD`.
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileFormPayload {
    pub address: Option<Address>,
    pub phone: Option<Phone>,
    pub company: Option<Company>,
    pub homepage: Option<Homepage>,
    pub birthday: Option<NaiveDate>,
}

impl TryFrom<ProfileForm> for ProfileFormPayload {
    type Error = ProfileFormError;

    fn try_from(value: ProfileForm) -> Result<Self, Self::Error> {
        value.validate()?;

        if value
            .birthday
            .is_some_and(|birthday| birthday > Utc::now().date_naive())
        {
            return Err(ProfileFormError::BirthdayInFuture);
        }

        Ok(Self {
            address: optional_text(value.address, Address::new)?,
            phone: optional_text(value.phone, Phone::new)?,
            company: optional_text(value.company, Company::new)?,
            homepage: optional_text(value.homepage, Homepage::new)?,
            birthday: value.birthday,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProfileForm {
        ProfileForm {
            address: Some("Wilhelminenhofstr. 75A, Berlin".into()),
            phone: Some(" +49 30 5019 0 ".into()),
            company: Some("".into()),
            homepage: None,
            birthday: NaiveDate::from_ymd_opt(1980, 5, 17),
        }
    }

    #[test]
    fn blank_fields_are_cleared_and_text_trimmed() {
        let payload = ProfileFormPayload::try_from(form()).unwrap();
        assert_eq!(payload.phone.unwrap().as_str(), "+49 30 5019 0");
        assert!(payload.company.is_none());
        assert!(payload.homepage.is_none());
    }

    #[test]
    fn rejects_future_birthday() {
        let mut form = form();
        form.birthday = Some(Utc::now().date_naive() + chrono::Days::new(1));
        let err = ProfileFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, ProfileFormError::BirthdayInFuture));
    }

    #[test]
    fn rejects_overlong_phone() {
        let mut form = form();
        form.phone = Some("1".repeat(40));
        let err = ProfileFormPayload::try_from(form).unwrap_err();
        assert!(matches!(err, ProfileFormError::Validation(_)));
    }
}
