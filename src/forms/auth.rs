use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{PersonName, TypeConstraintError, UserEmail, UserRole};
use crate::domain::user::NewUser;

#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("Form validation failed: {0}")]
    Validation(String),
    #[error("Form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Password confirmation does not match")]
    PasswordMismatch,
}

impl From<ValidationErrors> for AuthFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AuthFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

#[derive(Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub password_confirm: String,
    /// Register as a photographer instead of a customer.
    #[serde(default)]
    pub photographer: bool,
}

#[derive(Clone, PartialEq)]
pub struct RegisterFormPayload {
    pub email: UserEmail,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: String,
    pub role: UserRole,
}

impl std::fmt::Debug for RegisterFormPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterFormPayload")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("password", &"********")
            .field("role", &self.role)
            .finish()
    }
}

impl RegisterFormPayload {
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            password_hash,
            role: self.role,
            enabled: true,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<RegisterForm> for RegisterFormPayload {
    type Error = AuthFormError;

    fn try_from(value: RegisterForm) -> Result<Self, Self::Error> {
        value.validate()?;
        if value.password != value.password_confirm {
            return Err(AuthFormError::PasswordMismatch);
        }

        Ok(Self {
            email: UserEmail::new(value.email)?,
            first_name: PersonName::new(value.first_name)?,
            last_name: PersonName::new(value.last_name)?,
            password: value.password,
            role: if value.photographer {
                UserRole::Photographer
            } else {
                UserRole::Customer
            },
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Clone, PartialEq)]
pub struct LoginFormPayload {
    pub email: UserEmail,
    pub password: String,
}

impl std::fmt::Debug for LoginFormPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFormPayload")
            .field("email", &self.email)
            .field("password", &"********")
            .finish()
    }
}

impl TryFrom<LoginForm> for LoginFormPayload {
    type Error = AuthFormError;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            email: UserEmail::new(value.email)?,
            password: value.password,
        })
    }
}

/// Body of `POST /auth/password/lost`.
#[derive(Deserialize, Validate)]
pub struct PasswordLostForm {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PasswordLostFormPayload {
    pub email: UserEmail,
}

impl TryFrom<PasswordLostForm> for PasswordLostFormPayload {
    type Error = AuthFormError;

    fn try_from(value: PasswordLostForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            email: UserEmail::new(value.email)?,
        })
    }
}

/// Body of `POST /auth/password/reset`.
#[derive(Deserialize, Validate)]
pub struct PasswordResetForm {
    #[validate(length(min = 1))]
    pub password_reset_token: String,
    #[validate(length(min = 8))]
    pub new_password: String,
    pub password_confirm: String,
}

#[derive(Clone, PartialEq)]
pub struct PasswordResetFormPayload {
    pub token: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordResetFormPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetFormPayload")
            .field("token", &"********")
            .field("new_password", &"********")
            .finish()
    }
}

impl TryFrom<PasswordResetForm> for PasswordResetFormPayload {
    type Error = AuthFormError;

    fn try_from(value: PasswordResetForm) -> Result<Self, Self::Error> {
        value.validate()?;
        if value.new_password != value.password_confirm {
            return Err(AuthFormError::PasswordMismatch);
        }

        Ok(Self {
            token: value.password_reset_token.trim().to_string(),
            new_password: value.new_password,
        })
    }
}
