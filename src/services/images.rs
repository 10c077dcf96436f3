use crate::domain::auth::AuthenticatedUser;
use crate::domain::image::{Image, ImageUpdate, NewImage, UserImage};
use crate::domain::types::ImageId;
use crate::repository::{ImageListQuery, ImageReader, ImageWriter, RepositoryError, UserReader};

use super::{ServiceError, ServiceResult, ensure_photographer, internal};

/// Register newly uploaded images as owned by the calling photographer.
///
/// Every image and its ownership link are stored in one transaction. The
/// result has one [`UserImage`] per input image, in input order.
pub fn create_photograph_images<R>(
    user: &AuthenticatedUser,
    images: Vec<NewImage>,
    repo: &R,
) -> ServiceResult<Vec<UserImage>>
where
    R: UserReader + ImageWriter,
{
    ensure_photographer(user)?;

    if images.is_empty() {
        return Err(ServiceError::InvalidArgument {
            field: "images",
            reason: "at least one image is required".to_string(),
        });
    }

    let owner = repo
        .get_user_by_id(user.id)
        .map_err(internal("get user by id"))?
        .ok_or_else(|| ServiceError::not_found("user"))?;

    let created = match repo.create_user_images(owner.id, &images) {
        Ok(created) => created,
        Err(RepositoryError::Inconsistent(detail)) => {
            log::error!("Image upload for user {} broke an invariant: {detail}", owner.id);
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to create images: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if created.len() != images.len() {
        log::error!(
            "Stored {} images for {} uploads of user {}; this should never happen",
            created.len(),
            images.len(),
            owner.id
        );
        return Err(ServiceError::Internal);
    }

    log::info!("User {} uploaded {} images", owner.id, created.len());
    Ok(created)
}

/// Single-image form of [`create_photograph_images`].
pub fn create_photograph_image<R>(
    user: &AuthenticatedUser,
    image: NewImage,
    repo: &R,
) -> ServiceResult<UserImage>
where
    R: UserReader + ImageWriter,
{
    create_photograph_images(user, vec![image], repo)?
        .into_iter()
        .next()
        .ok_or(ServiceError::Internal)
}

/// Page through the images owned by the caller.
pub fn list_user_images<R>(
    user: &AuthenticatedUser,
    page: usize,
    per_page: usize,
    repo: &R,
) -> ServiceResult<(usize, Vec<UserImage>)>
where
    R: ImageReader,
{
    ensure_photographer(user)?;

    repo.list_images_for_owner(ImageListQuery::new(user.id).paginate(page, per_page))
        .map_err(internal("list images"))
}

pub fn get_image<R>(user: &AuthenticatedUser, image_id: ImageId, repo: &R) -> ServiceResult<Image>
where
    R: ImageReader,
{
    ensure_photographer(user)?;

    repo.get_image_for_owner(user.id, image_id)
        .map_err(internal("get image"))?
        .ok_or_else(|| ServiceError::NotFound {
            entity: "image",
            ids: vec![image_id.get()],
        })
}

/// Apply an explicit metadata update to an image owned by the caller.
pub fn update_image<R>(
    user: &AuthenticatedUser,
    image_id: ImageId,
    update: ImageUpdate,
    repo: &R,
) -> ServiceResult<Image>
where
    R: ImageReader + ImageWriter,
{
    ensure_photographer(user)?;

    if update.is_empty() {
        return Err(ServiceError::InvalidArgument {
            field: "image",
            reason: "nothing to update".to_string(),
        });
    }

    get_image(user, image_id, repo)?;

    repo.update_image(image_id, &update)
        .map_err(internal("update image"))?;

    get_image(user, image_id, repo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{
        ImageName, ImagePrice, PersonName, StoragePath, UserEmail, UserId, UserRole,
    };
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_identity(id: i32, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(id).unwrap(),
            email: format!("user{id}@example.com"),
            role,
        }
    }

    fn sample_user(id: i32) -> User {
        User {
            id: UserId::new(id).unwrap(),
            email: UserEmail::new(format!("user{id}@example.com")).unwrap(),
            first_name: PersonName::new("Ansel").unwrap(),
            last_name: PersonName::new("Adams").unwrap(),
            password_hash: "hash".into(),
            role: UserRole::Photographer,
            enabled: true,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    fn new_image(name: &str) -> NewImage {
        NewImage {
            name: ImageName::new(name).unwrap(),
            description: None,
            price: ImagePrice::new(15.75).unwrap(),
            compression: None,
            x_dimension: None,
            y_dimension: None,
            x_resolution: None,
            y_resolution: None,
            resolution_unit: None,
            path: StoragePath::new(format!("uploads/{name}.jpg")).unwrap(),
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        }
    }

    #[test]
    fn creates_one_owned_image_per_input_in_order() {
        let repo = TestRepository::new().with_users(vec![sample_user(1)]);
        let user = sample_identity(1, UserRole::Photographer);

        let created =
            create_photograph_images(&user, vec![new_image("first"), new_image("second")], &repo)
                .unwrap();

        assert_eq!(created.len(), 2);
        assert!(created.iter().all(|ui| ui.owner_id == 1));
        assert_eq!(created[0].image.name.as_str(), "first");
        assert_eq!(created[1].image.name.as_str(), "second");
        assert_ne!(created[0].image.id, created[1].image.id);
    }

    #[test]
    fn single_image_wrapper_returns_the_only_result() {
        let repo = TestRepository::new().with_users(vec![sample_user(1)]);
        let user = sample_identity(1, UserRole::Photographer);

        let created = create_photograph_image(&user, new_image("solo"), &repo).unwrap();

        assert_eq!(created.image.name.as_str(), "solo");
        let (total, _) = list_user_images(&user, 1, 10, &repo).unwrap();
        assert_eq!(total, 1);
    }

    #[test]
    fn customers_cannot_upload() {
        let repo = TestRepository::new().with_users(vec![sample_user(1)]);
        let user = sample_identity(1, UserRole::Customer);

        let err = create_photograph_images(&user, vec![new_image("x")], &repo).unwrap_err();

        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn empty_upload_is_invalid() {
        let repo = TestRepository::new().with_users(vec![sample_user(1)]);
        let user = sample_identity(1, UserRole::Photographer);

        let err = create_photograph_images(&user, vec![], &repo).unwrap_err();

        assert!(matches!(err, ServiceError::InvalidArgument { field: "images", .. }));
    }

    #[test]
    fn update_is_limited_to_owned_images() {
        let repo = TestRepository::new().with_users(vec![sample_user(1), sample_user(2)]);
        let owner = sample_identity(1, UserRole::Photographer);
        let stranger = sample_identity(2, UserRole::Photographer);
        let created = create_photograph_image(&owner, new_image("mine"), &repo).unwrap();
        let update = ImageUpdate {
            price: Some(ImagePrice::new(20.0).unwrap()),
            ..Default::default()
        };

        let err = update_image(&stranger, created.image.id, update.clone(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "image", .. }));

        let updated = update_image(&owner, created.image.id, update, &repo).unwrap();
        assert_eq!(updated.price, 20.0);
    }
}
