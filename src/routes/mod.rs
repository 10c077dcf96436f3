use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::dto::ErrorDto;
use crate::repository::{DieselRepository, UserReader};
use crate::services::ServiceError;

pub mod auth;
pub mod collections;
pub mod images;
pub mod profiles;

/// `?page=` of listing endpoints.
#[derive(Deserialize, Debug)]
pub struct PageParams {
    pub page: Option<usize>,
}

impl PageParams {
    pub fn page(&self) -> usize {
        self.page.filter(|page| *page > 0).unwrap_or(1)
    }
}

/// Translate a service failure into its JSON error response.
pub fn service_error_response(error: ServiceError) -> HttpResponse {
    let Some(body) = ErrorDto::from_error(&error) else {
        return HttpResponse::InternalServerError().finish();
    };
    match error {
        ServiceError::InvalidArgument { .. } | ServiceError::Form(_) => {
            HttpResponse::BadRequest().json(body)
        }
        ServiceError::NotFound { .. } => HttpResponse::NotFound().json(body),
        ServiceError::Conflict { .. } => HttpResponse::Conflict().json(body),
        ServiceError::Unauthorized => HttpResponse::Forbidden().json(body),
        ServiceError::Internal => HttpResponse::InternalServerError().finish(),
    }
}

fn unauthenticated(reason: &'static str) -> actix_web::Error {
    let body = ErrorDto {
        code: ServiceError::UNAUTHORIZED,
        kind: "unauthenticated",
        message: "login required".to_string(),
        ids: Vec::new(),
    };
    InternalError::from_response(reason, HttpResponse::Unauthorized().json(body)).into()
}

fn identity_from_request(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let identity = req
        .get_identity()
        .map_err(|_| unauthenticated("no session identity"))?;
    let id = identity
        .id()
        .map_err(|_| unauthenticated("no session identity"))?;
    let stored: AuthenticatedUser = serde_json::from_str(&id).map_err(|e| {
        log::warn!("Discarding unreadable session identity: {e}");
        unauthenticated("unreadable session identity")
    })?;

    let Some(repo) = req.app_data::<web::Data<DieselRepository>>() else {
        log::error!("Repository is not registered as app data");
        return Err(InternalError::from_response(
            "repository missing",
            HttpResponse::InternalServerError().finish(),
        )
        .into());
    };
    refresh_identity(&stored, repo.get_ref())
}

/// Re-read the account behind a session identity. Accounts deleted or
/// disabled after login lose access; a changed role takes effect at once.
fn refresh_identity<R>(
    stored: &AuthenticatedUser,
    repo: &R,
) -> Result<AuthenticatedUser, actix_web::Error>
where
    R: UserReader,
{
    match repo.get_user_by_id(stored.id) {
        Ok(Some(user)) if user.enabled => Ok(AuthenticatedUser::from(&user)),
        Ok(Some(_)) => Err(unauthenticated("account disabled")),
        Ok(None) => Err(unauthenticated("account removed")),
        Err(e) => {
            log::error!("Failed to reload session user {}: {e}", stored.id);
            Err(InternalError::from_response(
                "user lookup failed",
                HttpResponse::InternalServerError().finish(),
            )
            .into())
        }
    }
}

/// The caller, as stored in the session by a successful login.
impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(identity_from_request(req))
    }
}

/// Register every API endpoint under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(auth::register)
            .service(auth::login)
            .service(auth::logout)
            .service(auth::me)
            .service(auth::password_lost)
            .service(auth::password_reset)
            .service(profiles::show_profile)
            .service(profiles::save_profile)
            .service(images::list_images)
            .service(images::upload_images)
            .service(images::show_image)
            .service(images::update_image)
            .service(collections::list_collections)
            .service(collections::add_collection)
            .service(collections::delete_all_collections)
            .service(collections::show_collection)
            .service(collections::update_collection)
            .service(collections::delete_collection)
            .service(collections::add_images_to_collection)
            .service(collections::add_image_to_collection)
            .service(collections::remove_image_from_collection),
    );
}
