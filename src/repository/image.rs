use chrono::Utc;
use diesel::prelude::*;

use crate::domain::image::{Image, ImageUpdate, NewImage, UserImage};
use crate::domain::types::{CollectionId, ImageId, UserId};
use crate::models::image::{
    Image as DbImage, ImageChangeset, NewImage as DbNewImage, NewUserImage as DbNewUserImage,
    UserImage as DbUserImage,
};
use crate::repository::{
    DieselRepository, ImageListQuery, ImageReader, ImageWriter, RepositoryError, RepositoryResult,
};

impl ImageReader for DieselRepository {
    fn get_image_for_owner(
        &self,
        owner_id: UserId,
        image_id: ImageId,
    ) -> RepositoryResult<Option<Image>> {
        use crate::schema::{images, user_images};

        let mut conn = self.conn()?;

        let image = images::table
            .inner_join(user_images::table)
            .filter(images::id.eq(image_id.get()))
            .filter(user_images::owner_id.eq(owner_id.get()))
            .select(images::all_columns)
            .first::<DbImage>(&mut conn)
            .optional()?;

        Ok(image.map(TryInto::try_into).transpose()?)
    }

    fn list_owned_image_ids(
        &self,
        owner_id: UserId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<Vec<ImageId>> {
        use crate::schema::user_images;

        if image_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = image_ids.iter().map(|id| id.get()).collect();

        let owned = user_images::table
            .filter(user_images::owner_id.eq(owner_id.get()))
            .filter(user_images::image_id.eq_any(raw_ids))
            .select(user_images::image_id)
            .order(user_images::image_id.asc())
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(ImageId::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(owned)
    }

    fn list_images_for_owner(
        &self,
        query: ImageListQuery,
    ) -> RepositoryResult<(usize, Vec<UserImage>)> {
        use crate::schema::{images, user_images};

        let mut conn = self.conn()?;

        let total = user_images::table
            .filter(user_images::owner_id.eq(query.owner_id.get()))
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = user_images::table
            .inner_join(images::table)
            .filter(user_images::owner_id.eq(query.owner_id.get()))
            .select((user_images::all_columns, images::all_columns))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let items = items
            .order(images::id.asc())
            .load::<(DbUserImage, DbImage)>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<UserImage>, _>>()?;

        Ok((total, items))
    }

    fn list_collection_images(&self, collection_id: CollectionId) -> RepositoryResult<Vec<Image>> {
        use crate::schema::{collection_images, images};

        let mut conn = self.conn()?;

        let items = collection_images::table
            .inner_join(images::table)
            .filter(collection_images::collection_id.eq(collection_id.get()))
            .select(images::all_columns)
            .order(images::id.asc())
            .load::<DbImage>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Image>, _>>()?;

        Ok(items)
    }
}

impl ImageWriter for DieselRepository {
    fn create_user_images(
        &self,
        owner_id: UserId,
        images: &[NewImage],
    ) -> RepositoryResult<Vec<UserImage>> {
        use crate::schema::{images as images_table, user_images};

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut created = Vec::with_capacity(images.len());

            for image in images {
                let db_image: DbNewImage = image.clone().into();
                let stored = diesel::insert_into(images_table::table)
                    .values(db_image)
                    .get_result::<DbImage>(conn)?;

                let link = diesel::insert_into(user_images::table)
                    .values(DbNewUserImage {
                        image_id: stored.id,
                        owner_id: owner_id.get(),
                        created_at: now,
                    })
                    .get_result::<DbUserImage>(conn)?;

                created.push(UserImage::try_from((link, stored))?);
            }

            if created.len() != images.len() {
                return Err(RepositoryError::Inconsistent(format!(
                    "stored {} of {} images",
                    created.len(),
                    images.len()
                )));
            }

            Ok(created)
        })
    }

    fn update_image(&self, image_id: ImageId, update: &ImageUpdate) -> RepositoryResult<usize> {
        use crate::schema::images;

        let mut conn = self.conn()?;
        let changeset: ImageChangeset = update.clone().into();

        let affected = diesel::update(images::table.filter(images::id.eq(image_id.get())))
            .set(changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
