use actix_web::{HttpResponse, Responder, get, post, put, web};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::image::ImageUpdate;
use crate::domain::types::ImageId;
use crate::dto::PageDto;
use crate::dto::images::{ImageDto, UserImageDto};
use crate::forms::images::{UpdateImageForm, UploadImagesForm, UploadImagesFormPayload};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, service_error_response};
use crate::services::ServiceError;
use crate::services::images::{
    create_photograph_images as create_photograph_images_service,
    get_image as get_image_service, list_user_images as list_user_images_service,
    update_image as update_image_service,
};

#[get("/images")]
pub async fn list_images(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let page = params.page();
    let per_page = server_config.page_size;

    match list_user_images_service(&user, page, per_page, repo.get_ref()) {
        Ok((total, images)) => HttpResponse::Ok().json(PageDto::new(
            images.into_iter().map(UserImageDto::from).collect(),
            total,
            page,
            per_page,
        )),
        Err(err) => service_error_response(err),
    }
}

/// Register the metadata of freshly stored image files.
#[post("/images")]
pub async fn upload_images(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UploadImagesForm>,
) -> impl Responder {
    let payload: UploadImagesFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match create_photograph_images_service(&user, payload.images, repo.get_ref()) {
        Ok(images) => HttpResponse::Created().json(
            images
                .into_iter()
                .map(UserImageDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => service_error_response(err),
    }
}

#[get("/images/{image_id}")]
pub async fn show_image(
    image_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let image_id = match ImageId::try_from(image_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return service_error_response(e.into()),
    };

    match get_image_service(&user, image_id, repo.get_ref()) {
        Ok(image) => HttpResponse::Ok().json(ImageDto::from(image)),
        Err(err) => service_error_response(err),
    }
}

#[put("/images/{image_id}")]
pub async fn update_image(
    image_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateImageForm>,
) -> impl Responder {
    let update: ImageUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    let image_id = match ImageId::try_from(image_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return service_error_response(e.into()),
    };

    match update_image_service(&user, image_id, update, repo.get_ref()) {
        Ok(image) => HttpResponse::Ok().json(ImageDto::from(image)),
        Err(err) => service_error_response(err),
    }
}
