use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::users::UserDto;
use crate::forms::auth::{
    LoginForm, LoginFormPayload, PasswordLostForm, PasswordLostFormPayload, PasswordResetForm,
    PasswordResetFormPayload, RegisterForm, RegisterFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::auth::{
    current_user as current_user_service, login as login_service,
    password_lost as password_lost_service, password_reset as password_reset_service,
    register_user as register_user_service,
};

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<RegisterForm>,
) -> impl Responder {
    let payload: RegisterFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match register_user_service(payload, repo.get_ref()) {
        Ok(user) => HttpResponse::Created().json(UserDto::from(user)),
        Err(err) => service_error_response(err),
    }
}

#[post("/auth/login")]
pub async fn login(
    request: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<LoginForm>,
) -> impl Responder {
    let payload: LoginFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    let user = match login_service(payload, repo.get_ref()) {
        Ok(user) => user,
        Err(err) => return service_error_response(err),
    };

    let identity = match serde_json::to_string(&user) {
        Ok(identity) => identity,
        Err(e) => {
            log::error!("Failed to serialize session identity: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = Identity::login(&request.extensions(), identity) {
        log::error!("Failed to store session identity: {e}");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok().json(user)
}

#[post("/auth/logout")]
pub async fn logout(identity: Identity) -> impl Responder {
    identity.logout();
    HttpResponse::NoContent().finish()
}

#[get("/auth/me")]
pub async fn me(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    match current_user_service(&user, repo.get_ref()) {
        Ok(user) => HttpResponse::Ok().json(UserDto::from(user)),
        Err(err) => service_error_response(err),
    }
}

/// Issue a password reset token. No mail transport is configured, so the
/// token is handed to the operator through the server log.
#[post("/auth/password/lost")]
pub async fn password_lost(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PasswordLostForm>,
) -> impl Responder {
    let payload: PasswordLostFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match password_lost_service(payload, repo.get_ref()) {
        Ok(ticket) => {
            log::info!(
                "Password reset token for {}: {}",
                ticket.user.email,
                ticket.token
            );
            HttpResponse::NoContent().finish()
        }
        Err(err) => service_error_response(err),
    }
}

#[post("/auth/password/reset")]
pub async fn password_reset(
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<PasswordResetForm>,
) -> impl Responder {
    let payload: PasswordResetFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match password_reset_service(payload, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
