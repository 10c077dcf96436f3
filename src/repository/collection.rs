use chrono::Utc;
use diesel::prelude::*;

use crate::domain::collection::{Collection, CollectionImage, CollectionUpdate, NewCollection};
use crate::domain::types::{CollectionId, ImageId, UserId};
use crate::models::collection::{
    Collection as DbCollection, CollectionChangeset, CollectionImage as DbCollectionImage,
    NewCollection as DbNewCollection, NewCollectionImage as DbNewCollectionImage,
};
use crate::repository::{
    CollectionListQuery, CollectionReader, CollectionWriter, DieselRepository, RepositoryError,
    RepositoryResult,
};

impl CollectionReader for DieselRepository {
    fn get_collection_for_user(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
    ) -> RepositoryResult<Option<Collection>> {
        use crate::schema::collections;

        let mut conn = self.conn()?;

        let collection = collections::table
            .filter(collections::id.eq(collection_id.get()))
            .filter(collections::owner_id.eq(owner_id.get()))
            .first::<DbCollection>(&mut conn)
            .optional()?;

        Ok(collection.map(TryInto::try_into).transpose()?)
    }

    fn list_collections(
        &self,
        query: CollectionListQuery,
    ) -> RepositoryResult<(usize, Vec<Collection>)> {
        use crate::schema::collections;

        let mut conn = self.conn()?;

        let query_builder = || {
            collections::table
                .filter(collections::owner_id.eq(query.owner_id.get()))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items
                .offset(pagination.offset())
                .limit(pagination.limit());
        }

        let items = items
            .order(collections::id.asc())
            .load::<DbCollection>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Collection>, _>>()?;

        Ok((total, items))
    }
}

impl CollectionWriter for DieselRepository {
    fn create_collection(&self, collection: &NewCollection) -> RepositoryResult<Collection> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let db_collection: DbNewCollection = collection.clone().into();

        let created = diesel::insert_into(collections::table)
            .values(db_collection)
            .get_result::<DbCollection>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_collection(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
        update: &CollectionUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::collections;

        let mut conn = self.conn()?;
        let changeset = CollectionChangeset::new(update.clone(), Utc::now().naive_utc());

        let affected = diesel::update(
            collections::table
                .filter(collections::id.eq(collection_id.get()))
                .filter(collections::owner_id.eq(owner_id.get())),
        )
        .set(changeset)
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_collection(
        &self,
        owner_id: UserId,
        collection_id: CollectionId,
    ) -> RepositoryResult<usize> {
        use crate::schema::collections;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            collections::table
                .filter(collections::id.eq(collection_id.get()))
                .filter(collections::owner_id.eq(owner_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_collections_for_user(&self, owner_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::collections;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(collections::table.filter(collections::owner_id.eq(owner_id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn add_collection_images(
        &self,
        collection_id: CollectionId,
        image_ids: &[ImageId],
    ) -> RepositoryResult<Vec<CollectionImage>> {
        use crate::schema::collection_images;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();

        let rows = image_ids
            .iter()
            .map(|image_id| DbNewCollectionImage {
                collection_id: collection_id.get(),
                image_id: image_id.get(),
                created_at: now,
            })
            .collect::<Vec<_>>();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let inserted = diesel::insert_into(collection_images::table)
                .values(&rows)
                .execute(conn)?;

            if inserted != rows.len() {
                return Err(RepositoryError::Inconsistent(format!(
                    "linked {inserted} of {} images to collection {collection_id}",
                    rows.len()
                )));
            }

            rows.into_iter()
                .map(|row| {
                    CollectionImage::try_from(DbCollectionImage {
                        collection_id: row.collection_id,
                        image_id: row.image_id,
                        created_at: row.created_at,
                    })
                    .map_err(RepositoryError::from)
                })
                .collect()
        })
    }

    fn remove_collection_image(
        &self,
        collection_id: CollectionId,
        image_id: ImageId,
    ) -> RepositoryResult<usize> {
        use crate::schema::collection_images;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            collection_images::table
                .filter(collection_images::collection_id.eq(collection_id.get()))
                .filter(collection_images::image_id.eq(image_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
