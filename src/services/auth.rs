use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::forms::auth::{
    LoginFormPayload, PasswordLostFormPayload, PasswordResetFormPayload, RegisterFormPayload,
};
use crate::repository::{RepositoryError, UserReader, UserWriter};

use super::{ConflictKind, ServiceError, ServiceResult, internal};

fn email_exists(email: &str) -> ServiceError {
    ServiceError::Conflict {
        kind: ConflictKind::EmailExists,
        detail: format!("email {email} is already registered"),
    }
}

fn invalid_credentials() -> ServiceError {
    ServiceError::InvalidArgument {
        field: "credentials",
        reason: "email or password is wrong".to_string(),
    }
}

/// Hash a password into an Argon2id PHC string with a random salt.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt_bytes: [u8; 16] = rand::random();
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| {
        log::error!("Failed to encode password salt: {e}");
        ServiceError::Internal
    })?;

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            log::error!("Failed to hash password: {e}");
            ServiceError::Internal
        })
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    match PasswordHash::new(password_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            log::error!("Stored password hash is malformed: {e}");
            false
        }
    }
}

/// Register a new account. Emails are unique across the platform.
pub fn register_user<R>(payload: RegisterFormPayload, repo: &R) -> ServiceResult<User>
where
    R: UserReader + UserWriter,
{
    match repo.get_user_by_email(&payload.email) {
        Ok(Some(_)) => return Err(email_exists(payload.email.as_str())),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to look up user by email: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let password_hash = hash_password(&payload.password)?;
    let email = payload.email.clone();
    let new_user = payload.into_new_user(password_hash);

    match repo.create_user(&new_user) {
        Ok(user) => {
            log::info!("Registered user {} with role {}", user.id, user.role);
            Ok(user)
        }
        Err(RepositoryError::Conflict(_)) => Err(email_exists(email.as_str())),
        Err(e) => {
            log::error!("Failed to create user: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Check the credentials and return the identity to store in the session.
pub fn login<R>(payload: LoginFormPayload, repo: &R) -> ServiceResult<AuthenticatedUser>
where
    R: UserReader,
{
    let user = repo
        .get_user_by_email(&payload.email)
        .map_err(internal("look up user by email"))?
        .ok_or_else(invalid_credentials)?;

    if !verify_password(&payload.password, &user.password_hash) {
        log::info!("Rejected login for {}", user.email);
        return Err(invalid_credentials());
    }

    if !user.enabled {
        return Err(ServiceError::Unauthorized);
    }

    Ok(AuthenticatedUser::from(&user))
}

/// Reload the account behind the session identity.
pub fn current_user<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    repo.get_user_by_id(user.id)
        .map_err(internal("get user by id"))?
        .ok_or_else(|| ServiceError::not_found("user"))
}

/// An issued password reset token and the account it belongs to.
#[derive(Debug, Clone)]
pub struct PasswordResetTicket {
    pub user: User,
    pub token: String,
}

fn new_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Issue a fresh reset token for the account registered under the email.
///
/// Any earlier token of the account stops working.
pub fn password_lost<R>(
    payload: PasswordLostFormPayload,
    repo: &R,
) -> ServiceResult<PasswordResetTicket>
where
    R: UserReader + UserWriter,
{
    let user = repo
        .get_user_by_email(&payload.email)
        .map_err(internal("look up user by email"))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let token = new_reset_token();
    match repo.set_password_reset_token(user.id, &token) {
        Ok(0) => return Err(ServiceError::not_found("user")),
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to store password reset token: {e}");
            return Err(ServiceError::Internal);
        }
    }

    log::info!("Issued password reset token for user {}", user.id);
    Ok(PasswordResetTicket { user, token })
}

/// Set a new password using a token issued by [`password_lost`]. Tokens are
/// single use.
pub fn password_reset<R>(payload: PasswordResetFormPayload, repo: &R) -> ServiceResult<()>
where
    R: UserReader + UserWriter,
{
    let unknown_token = || ServiceError::InvalidArgument {
        field: "password_reset_token",
        reason: "unknown or expired password reset token".to_string(),
    };

    let user = repo
        .get_user_by_reset_token(&payload.token)
        .map_err(internal("look up user by reset token"))?
        .ok_or_else(unknown_token)?;

    let password_hash = hash_password(&payload.new_password)?;

    match repo.reset_password(user.id, &password_hash) {
        Ok(0) => Err(unknown_token()),
        Ok(_) => {
            log::info!("Reset password of user {}", user.id);
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to reset password: {e}");
            Err(ServiceError::Internal)
        }
    }
}
