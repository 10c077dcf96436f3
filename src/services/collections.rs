use std::collections::HashSet;

use chrono::Utc;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::collection::{Collection, CollectionImage, CollectionUpdate, NewCollection};
use crate::domain::image::Image;
use crate::domain::types::{CollectionId, CollectionName, Description, ImageId};
use crate::repository::{
    CollectionListQuery, CollectionReader, CollectionWriter, ImageReader, RepositoryError,
    UserReader,
};

use super::{ConflictKind, ServiceError, ServiceResult, ensure_photographer, internal};

fn invalid_collection(collection_id: CollectionId) -> ServiceError {
    ServiceError::InvalidArgument {
        field: "collection_id",
        reason: format!("collection {collection_id} is not valid for this user"),
    }
}

/// Resolve a collection owned by the caller. Collections of other users are
/// indistinguishable from missing ones.
fn owned_collection<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    repo: &R,
) -> ServiceResult<Option<Collection>>
where
    R: CollectionReader,
{
    repo.get_collection_for_user(user.id, collection_id)
        .map_err(internal("get collection"))
}

/// Create a private collection for the caller.
///
/// New collections are never public, whatever the caller asked for.
pub fn create_collection<R>(
    user: &AuthenticatedUser,
    name: CollectionName,
    description: Option<Description>,
    repo: &R,
) -> ServiceResult<Collection>
where
    R: UserReader + CollectionWriter,
{
    ensure_photographer(user)?;

    let owner = repo
        .get_user_by_id(user.id)
        .map_err(internal("get user by id"))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let collection = NewCollection::private(owner.id, name, description, Utc::now().naive_utc());

    repo.create_collection(&collection)
        .map_err(internal("create collection"))
}

/// Return an owned collection together with its images.
pub fn get_collection<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    repo: &R,
) -> ServiceResult<(Collection, Vec<Image>)>
where
    R: CollectionReader + ImageReader,
{
    ensure_photographer(user)?;

    let collection = owned_collection(user, collection_id, repo)?.ok_or_else(|| {
        ServiceError::NotFound {
            entity: "collection",
            ids: vec![collection_id.get()],
        }
    })?;

    let images = repo
        .list_collection_images(collection.id)
        .map_err(internal("list collection images"))?;

    Ok((collection, images))
}

pub fn list_collections<R>(
    user: &AuthenticatedUser,
    page: usize,
    per_page: usize,
    repo: &R,
) -> ServiceResult<(usize, Vec<Collection>)>
where
    R: CollectionReader,
{
    ensure_photographer(user)?;

    repo.list_collections(CollectionListQuery::new(user.id).paginate(page, per_page))
        .map_err(internal("list collections"))
}

/// Rename, describe or publish an owned collection.
pub fn update_collection<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    update: CollectionUpdate,
    repo: &R,
) -> ServiceResult<Collection>
where
    R: CollectionReader + CollectionWriter,
{
    ensure_photographer(user)?;

    if owned_collection(user, collection_id, repo)?.is_none() {
        return Err(invalid_collection(collection_id));
    }

    repo.update_collection(user.id, collection_id, &update)
        .map_err(internal("update collection"))?;

    owned_collection(user, collection_id, repo)?.ok_or(ServiceError::Internal)
}

/// Delete an owned collection. Its image links go with it; the images stay.
pub fn delete_collection<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    repo: &R,
) -> ServiceResult<()>
where
    R: CollectionWriter,
{
    ensure_photographer(user)?;

    match repo.delete_collection(user.id, collection_id) {
        Ok(0) => Err(ServiceError::NotFound {
            entity: "collection",
            ids: vec![collection_id.get()],
        }),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete collection: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete every collection of the caller and return how many were removed.
pub fn delete_all_collections<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<usize>
where
    R: CollectionWriter,
{
    ensure_photographer(user)?;

    let removed = repo
        .delete_collections_for_user(user.id)
        .map_err(internal("delete collections"))?;

    log::info!("Deleted {removed} collections of user {}", user.id);
    Ok(removed)
}

/// Link images owned by the caller to one of the caller's collections.
///
/// The batch is all or nothing:
/// - a missing `collection_id` or a collection owned by someone else is an
///   [`ServiceError::InvalidArgument`];
/// - an empty request, or any requested image the caller does not own, is a
///   [`ServiceError::NotFound`] listing the unresolved ids, and nothing is
///   written;
/// - an image already in the collection is a [`ServiceError::Conflict`].
///
/// Duplicate ids are collapsed. On success one [`CollectionImage`] is
/// returned per distinct id, in request order.
pub fn add_images_to_collection<R>(
    user: &AuthenticatedUser,
    collection_id: Option<CollectionId>,
    image_ids: &[ImageId],
    repo: &R,
) -> ServiceResult<Vec<CollectionImage>>
where
    R: CollectionReader + CollectionWriter + ImageReader,
{
    ensure_photographer(user)?;

    let Some(collection_id) = collection_id else {
        return Err(ServiceError::InvalidArgument {
            field: "collection_id",
            reason: "collection id is required".to_string(),
        });
    };

    if image_ids.is_empty() {
        return Err(ServiceError::not_found("image"));
    }

    let mut seen = HashSet::with_capacity(image_ids.len());
    let requested: Vec<ImageId> = image_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let collection = owned_collection(user, collection_id, repo)?
        .ok_or_else(|| invalid_collection(collection_id))?;

    let owned: HashSet<ImageId> = repo
        .list_owned_image_ids(user.id, &requested)
        .map_err(internal("resolve owned images"))?
        .into_iter()
        .collect();

    let unresolved: Vec<i32> = requested
        .iter()
        .filter(|id| !owned.contains(id))
        .map(|id| id.get())
        .collect();
    if !unresolved.is_empty() {
        return Err(ServiceError::NotFound {
            entity: "image",
            ids: unresolved,
        });
    }

    let created = match repo.add_collection_images(collection.id, &requested) {
        Ok(created) => created,
        Err(RepositoryError::Conflict(detail)) => {
            return Err(ServiceError::Conflict {
                kind: ConflictKind::ImageAlreadyInCollection,
                detail,
            });
        }
        Err(RepositoryError::Inconsistent(detail)) => {
            log::error!(
                "Linking images to collection {} broke an invariant: {detail}",
                collection.id
            );
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to add images to collection: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if created.len() != requested.len() {
        log::error!(
            "Created {} links for {} requested images in collection {}; this should never happen",
            created.len(),
            requested.len(),
            collection.id
        );
        return Err(ServiceError::Internal);
    }

    Ok(created)
}

/// Single-image form of [`add_images_to_collection`].
pub fn add_image_to_collection<R>(
    user: &AuthenticatedUser,
    collection_id: Option<CollectionId>,
    image_id: ImageId,
    repo: &R,
) -> ServiceResult<CollectionImage>
where
    R: CollectionReader + CollectionWriter + ImageReader,
{
    add_images_to_collection(user, collection_id, &[image_id], repo)?
        .into_iter()
        .next()
        .ok_or(ServiceError::Internal)
}

/// Unlink an image from one of the caller's collections.
pub fn remove_image_from_collection<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    image_id: ImageId,
    repo: &R,
) -> ServiceResult<()>
where
    R: CollectionReader + CollectionWriter,
{
    ensure_photographer(user)?;

    let collection = owned_collection(user, collection_id, repo)?
        .ok_or_else(|| invalid_collection(collection_id))?;

    match repo.remove_collection_image(collection.id, image_id) {
        Ok(0) => Err(ServiceError::NotFound {
            entity: "collection image",
            ids: vec![image_id.get()],
        }),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to remove image from collection: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Images linked to one of the caller's collections.
pub fn list_collection_images<R>(
    user: &AuthenticatedUser,
    collection_id: CollectionId,
    repo: &R,
) -> ServiceResult<Vec<Image>>
where
    R: CollectionReader + ImageReader,
{
    get_collection(user, collection_id, repo).map(|(_, images)| images)
}
