use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::collection::CollectionUpdate;
use crate::domain::types::{CollectionId, ImageId};
use crate::dto::PageDto;
use crate::dto::collections::{CollectionDto, CollectionImageDto};
use crate::forms::collections::{
    AddCollectionForm, AddCollectionFormPayload, AddImagesToCollectionForm,
    AddImagesToCollectionFormPayload, UpdateCollectionForm,
};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{PageParams, service_error_response};
use crate::services::ServiceError;
use crate::services::collections::{
    add_image_to_collection as add_image_to_collection_service,
    add_images_to_collection as add_images_to_collection_service,
    create_collection as create_collection_service,
    delete_all_collections as delete_all_collections_service,
    delete_collection as delete_collection_service, get_collection as get_collection_service,
    list_collections as list_collections_service,
    remove_image_from_collection as remove_image_from_collection_service,
    update_collection as update_collection_service,
};

#[derive(Serialize)]
struct DeletedDto {
    deleted: usize,
}

#[get("/collections")]
pub async fn list_collections(
    params: web::Query<PageParams>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let page = params.page();
    let per_page = server_config.page_size;

    match list_collections_service(&user, page, per_page, repo.get_ref()) {
        Ok((total, collections)) => HttpResponse::Ok().json(PageDto::new(
            collections.into_iter().map(CollectionDto::from).collect(),
            total,
            page,
            per_page,
        )),
        Err(err) => service_error_response(err),
    }
}

#[post("/collections")]
pub async fn add_collection(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCollectionForm>,
) -> impl Responder {
    let payload: AddCollectionFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    match create_collection_service(&user, payload.name, payload.description, repo.get_ref()) {
        Ok(collection) => HttpResponse::Created().json(CollectionDto::from(collection)),
        Err(err) => service_error_response(err),
    }
}

#[delete("/collections")]
pub async fn delete_all_collections(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_all_collections_service(&user, repo.get_ref()) {
        Ok(deleted) => HttpResponse::Ok().json(DeletedDto { deleted }),
        Err(err) => service_error_response(err),
    }
}

#[get("/collections/{collection_id}")]
pub async fn show_collection(
    collection_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let collection_id = match CollectionId::try_from(collection_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return service_error_response(e.into()),
    };

    match get_collection_service(&user, collection_id, repo.get_ref()) {
        Ok(collection) => HttpResponse::Ok().json(CollectionDto::from(collection)),
        Err(err) => service_error_response(err),
    }
}

#[put("/collections/{collection_id}")]
pub async fn update_collection(
    collection_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCollectionForm>,
) -> impl Responder {
    let update: CollectionUpdate = match form.try_into() {
        Ok(update) => update,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    let collection_id = match CollectionId::try_from(collection_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return service_error_response(e.into()),
    };

    match update_collection_service(&user, collection_id, update, repo.get_ref()) {
        Ok(collection) => HttpResponse::Ok().json(CollectionDto::from(collection)),
        Err(err) => service_error_response(err),
    }
}

#[delete("/collections/{collection_id}")]
pub async fn delete_collection(
    collection_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let collection_id = match CollectionId::try_from(collection_id.into_inner()) {
        Ok(id) => id,
        Err(e) => return service_error_response(e.into()),
    };

    match delete_collection_service(&user, collection_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}

/// Batch form. An invalid collection id in the path is handed to the service
/// as a missing one. Non-positive image ids are answered as missing images
/// without touching the collection.
#[post("/collections/{collection_id}/images")]
pub async fn add_images_to_collection(
    collection_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddImagesToCollectionForm>,
) -> impl Responder {
    let payload: AddImagesToCollectionFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    if !payload.invalid_ids.is_empty() {
        return service_error_response(ServiceError::NotFound {
            entity: "image",
            ids: payload.invalid_ids,
        });
    }

    let collection_id = CollectionId::new(collection_id.into_inner()).ok();

    match add_images_to_collection_service(
        &user,
        collection_id,
        &payload.image_ids,
        repo.get_ref(),
    ) {
        Ok(links) => HttpResponse::Created().json(
            links
                .into_iter()
                .map(CollectionImageDto::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => service_error_response(err),
    }
}

#[post("/collections/{collection_id}/images/{image_id}")]
pub async fn add_image_to_collection(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (collection_id, image_id) = path.into_inner();
    let collection_id = CollectionId::new(collection_id).ok();
    let image_id = match ImageId::try_from(image_id) {
        Ok(id) => id,
        Err(_) => {
            return service_error_response(ServiceError::NotFound {
                entity: "image",
                ids: vec![image_id],
            });
        }
    };

    match add_image_to_collection_service(&user, collection_id, image_id, repo.get_ref()) {
        Ok(link) => HttpResponse::Created().json(CollectionImageDto::from(link)),
        Err(err) => service_error_response(err),
    }
}

#[delete("/collections/{collection_id}/images/{image_id}")]
pub async fn remove_image_from_collection(
    path: web::Path<(i32, i32)>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (collection_id, image_id) = path.into_inner();
    let ids = CollectionId::try_from(collection_id)
        .and_then(|collection_id| Ok((collection_id, ImageId::try_from(image_id)?)));
    let (collection_id, image_id) = match ids {
        Ok(ids) => ids,
        Err(e) => return service_error_response(e.into()),
    };

    match remove_image_from_collection_service(&user, collection_id, image_id, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(err),
    }
}
