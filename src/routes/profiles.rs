use actix_web::{HttpResponse, Responder, get, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::users::ProfileDto;
use crate::forms::profiles::{ProfileForm, ProfileFormPayload};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::profiles::{
    get_profile as get_profile_service, save_profile as save_profile_service,
};

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_profile_service(&user, repo.get_ref()) {
        Ok(profile) => HttpResponse::Ok().json(ProfileDto::from(profile)),
        Err(err) => service_error_response(err),
    }
}

#[put("/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ProfileForm>,
) -> impl Responder {
    let payload: ProfileFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match save_profile_service(&user, payload, repo.get_ref()) {
        Ok(profile) => HttpResponse::Ok().json(ProfileDto::from(profile)),
        Err(err) => service_error_response(err),
    }
}
