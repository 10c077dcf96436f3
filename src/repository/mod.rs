use crate::db::{DbConnection, DbPool};
use crate::domain::collection::{Collection, CollectionImage, CollectionUpdate, NewCollection};
use crate::domain::image::{Image, ImageUpdate, NewImage, UserImage};
use crate::domain::types::{CollectionId, ImageId, UserEmail, UserId};
use crate::domain::user::{NewUser, User, UserProfile};
use crate::pagination::Pagination;

pub mod collection;
pub mod errors;
pub mod image;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters for listing images owned by a user.
#[derive(Debug, Clone)]
pub struct ImageListQuery {
    pub owner_id: UserId,
    pub pagination: Option<Pagination>,
}

impl ImageListQuery {
    pub fn new(owner_id: UserId) -> Self {
        Self {
            owner_id,
            pagination: None,
        }
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing collections owned by a user.
#[derive(Debug, Clone)]
pub struct CollectionListQuery {
    pub owner_id: UserId,
    pub pagination: Option<Pagination>,
}

impl CollectionListQuery {
    pub fn new(owner_id: UserId) -> Self {
        Self {
            owner_id,
            pagination: None,
        }
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for user entities.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &UserEmail) -> RepositoryResult<Option<User>>;
    /// Find the user holding an outstanding password reset token.
    fn get_user_by_reset_token(&self, token: &str) -> RepositoryResult<Option<User>>;
    fn get_user_profile(&self, user_id: UserId) -> RepositoryResult<Option<UserProfile>>;
}

/// Write operations for user entities.
pub trait UserWriter {
    /// Persist a new user and return it with its assigned identifier.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    /// Store a password reset token, replacing any earlier one.
    fn set_password_reset_token(&self, user_id: UserId, token: &str) -> RepositoryResult<usize>;
    /// Replace the password hash and invalidate the reset token.
    fn reset_password(&self, user_id: UserId, password_hash: &str) -> RepositoryResult<usize>;
    /// Insert or fully replace the profile of `profile.user_id`.
    fn save_user_profile(&self, profile: &UserProfile) -> RepositoryResult<UserProfile>;
}

/// Read-only operations for images and their ownership.
pub trait ImageReader {
    /// Retrieve an image only if it is owned by `owner_id`.
    fn get_image_for_owner(
        &self,
        owner_id: UserId,
        image_id: ImageId,
    ) -> RepositoryResult<Option<Image>>;
    /// Return the subset of `image_ids` owned by `owner_id`.
    fn list_owned_image_ids(
        &self,
        owner_id: UserId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<Vec<ImageId>>;
    /// List images owned by a user, ordered by image id.
    fn list_images_for_owner(
        &self,
        query: ImageListQuery,
    ) -> RepositoryResult<(usize, Vec<UserImage>)>;
    /// List the images linked to a collection, ordered by image id.
    fn list_collection_images(&self, collection_id: CollectionId) -> RepositoryResult<Vec<Image>>;
}

/// Write operations for images and their ownership.
pub trait ImageWriter {
    /// Persist every image together with its ownership link, atomically.
    ///
    /// The result preserves the order of `images`.
    fn create_user_images(
        &self,
        owner_id: UserId,
        images: &[NewImage],
    ) -> RepositoryResult<Vec<UserImage>>;
    /// Apply a metadata update to an image.
    fn update_image(&self, image_id: ImageId, update: &ImageUpdate) -> RepositoryResult<usize>;
}

/// Read-only operations for collection entities.
pub trait CollectionReader {
    /// Retrieve a collection only if it is owned by `owner_id`.
    fn get_collection_for_user(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
    ) -> RepositoryResult<Option<Collection>>;
    /// List collections using the supplied query options.
    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<(usize, Vec<Collection>)>;
}

/// Write operations for collections and their image links.
pub trait CollectionWriter {
    /// Persist a new collection and return it with its assigned identifier.
    fn create_collection(&self, collection: &NewCollection) -> RepositoryResult<Collection>;
    /// Update a collection owned by `owner_id`.
    fn update_collection(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
        update: &CollectionUpdate,
    ) -> RepositoryResult<usize>;
    /// Delete a collection owned by `owner_id` together with its image links.
    fn delete_collection(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
    ) -> RepositoryResult<usize>;
    /// Delete every collection owned by `owner_id`.
    fn delete_collections_for_user(&self, owner_id: UserId) -> RepositoryResult<usize>;
    /// Link every image to the collection in a single transaction.
    ///
    /// The result preserves the order of `image_ids`. An already existing
    /// link fails the whole batch with [`RepositoryError::Conflict`].
    fn add_collection_images(
        &self,
        collection_id: CollectionId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<Vec<CollectionImage>>;
    /// Remove a single image link from a collection.
    fn remove_collection_image(
        &self,
        collection_id: CollectionId,
        image_id: ImageId,
    ) -> RepositoryResult<usize>;
}
