use chrono::Utc;
use diesel::prelude::*;
use photoplatform::domain::collection::{CollectionUpdate, NewCollection};
use photoplatform::domain::image::ImageUpdate;
use photoplatform::domain::types::{
    CollectionName, Company, Homepage, ImageId, ImagePrice, PersonName, UserEmail, UserId,
    UserRole,
};
use photoplatform::domain::user::{NewUser, User, UserProfile};
use photoplatform::repository::{
    CollectionListQuery, CollectionReader, CollectionWriter, ImageListQuery, ImageReader,
    ImageWriter, RepositoryError, UserReader, UserWriter,
};
use photoplatform::schema::{collection_images, images, user_images};

mod common;

use common::{TestDb, create_user, new_image};

fn new_collection(owner: &User, name: &str) -> NewCollection {
    NewCollection::private(
        owner.id,
        CollectionName::new(name).expect("valid collection name"),
        None,
        Utc::now().naive_utc(),
    )
}

#[test]
fn users_are_found_by_normalized_email() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let user = create_user(&repo, "Ansel@Example.com", UserRole::Photographer);

    let found = repo
        .get_user_by_email(&UserEmail::new("ansel@example.com").unwrap())
        .expect("lookup should succeed")
        .expect("user should exist");

    assert_eq!(found.id, user.id);
    assert_eq!(found.role, UserRole::Photographer);
    assert!(repo.get_user_by_id(user.id).unwrap().is_some());
}

#[test]
fn duplicate_email_is_a_conflict() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    create_user(&repo, "same@example.com", UserRole::Customer);

    let err = repo
        .create_user(&NewUser {
            email: UserEmail::new("SAME@example.com").unwrap(),
            first_name: PersonName::new("Second").unwrap(),
            last_name: PersonName::new("Account").unwrap(),
            password_hash: "x".into(),
            role: UserRole::Customer,
            enabled: true,
            created_at: Utc::now().naive_utc(),
        })
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[test]
fn reset_token_is_cleared_by_password_reset() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let user = create_user(&repo, "reset@example.com", UserRole::Customer);

    assert_eq!(repo.set_password_reset_token(user.id, "abc123").unwrap(), 1);
    let found = repo
        .get_user_by_reset_token("abc123")
        .unwrap()
        .expect("token should resolve");
    assert_eq!(found.id, user.id);

    assert_eq!(repo.reset_password(user.id, "new-hash").unwrap(), 1);

    assert!(repo.get_user_by_reset_token("abc123").unwrap().is_none());
    let reloaded = repo.get_user_by_id(user.id).unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "new-hash");
}

#[test]
fn saving_a_profile_replaces_the_previous_one() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let user = create_user(&repo, "profile@example.com", UserRole::Photographer);
    assert!(repo.get_user_profile(user.id).unwrap().is_none());

    let mut profile = UserProfile {
        user_id: user.id,
        address: None,
        phone: None,
        company: Some(Company::new("North Light").unwrap()),
        homepage: None,
        birthday: None,
        updated_at: Utc::now().naive_utc(),
    };
    repo.save_user_profile(&profile).unwrap();

    profile.company = None;
    profile.homepage = Some(Homepage::new("https://north-light.example").unwrap());
    repo.save_user_profile(&profile).unwrap();

    let stored = repo
        .get_user_profile(user.id)
        .unwrap()
        .expect("profile should exist");
    assert!(stored.company.is_none());
    assert_eq!(
        stored.homepage.as_ref().map(|h| h.as_str()),
        Some("https://north-light.example")
    );
}

#[test]
fn profile_of_unknown_user_is_a_missing_reference() {
    let test_db = TestDb::new();
    let repo = test_db.repo();

    let err = repo
        .save_user_profile(&UserProfile {
            user_id: UserId::new(404).unwrap(),
            address: None,
            phone: None,
            company: None,
            homepage: None,
            birthday: None,
            updated_at: Utc::now().naive_utc(),
        })
        .unwrap_err();

    assert!(matches!(err, RepositoryError::MissingReference(_)));
}

#[test]
fn created_images_are_owned_in_input_order() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);

    let created = repo
        .create_user_images(owner.id, &[new_image("a"), new_image("b"), new_image("c")])
        .expect("should create images");

    let names: Vec<&str> = created.iter().map(|ui| ui.image.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(created.iter().all(|ui| ui.owner_id == owner.id));

    let (total, listed) = repo
        .list_images_for_owner(ImageListQuery::new(owner.id).paginate(1, 2))
        .expect("should list images");
    assert_eq!(total, 3);
    assert_eq!(listed.len(), 2);

    let mut conn = test_db.pool().get().unwrap();
    let owned: i64 = user_images::table.count().get_result(&mut conn).unwrap();
    assert_eq!(owned, 3);
}

#[test]
fn ownership_filters_image_lookups() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let other = create_user(&repo, "other@example.com", UserRole::Photographer);
    let mine = repo.create_user_images(owner.id, &[new_image("mine")]).unwrap();
    let theirs = repo.create_user_images(other.id, &[new_image("theirs")]).unwrap();
    let mine_id = mine[0].image.id;
    let theirs_id = theirs[0].image.id;

    assert!(repo.get_image_for_owner(owner.id, mine_id).unwrap().is_some());
    assert!(repo.get_image_for_owner(owner.id, theirs_id).unwrap().is_none());

    let missing = ImageId::new(999).unwrap();
    let owned = repo
        .list_owned_image_ids(owner.id, &[theirs_id, mine_id, missing])
        .unwrap();
    assert_eq!(owned, vec![mine_id]);
}

#[test]
fn image_update_changes_only_given_fields() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let created = repo.create_user_images(owner.id, &[new_image("print")]).unwrap();
    let image_id = created[0].image.id;

    let updated = repo
        .update_image(
            image_id,
            &ImageUpdate {
                price: Some(ImagePrice::new(42.0).unwrap()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated, 1);

    let image = repo.get_image_for_owner(owner.id, image_id).unwrap().unwrap();
    assert_eq!(image.price, 42.0);
    assert_eq!(image.name.as_str(), "print");
}

#[test]
fn collections_are_scoped_to_their_owner() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let other = create_user(&repo, "other@example.com", UserRole::Photographer);

    let collection = repo
        .create_collection(&new_collection(&owner, "Street"))
        .expect("should create collection");
    repo.create_collection(&new_collection(&other, "Portraits"))
        .unwrap();

    assert!(!collection.is_public);
    assert!(
        repo.get_collection_for_user(other.id, collection.id)
            .unwrap()
            .is_none()
    );

    let (total, collections) = repo
        .list_collections(CollectionListQuery::new(owner.id))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(collections[0].name.as_str(), "Street");

    let update = CollectionUpdate {
        is_public: Some(true),
        ..Default::default()
    };
    assert_eq!(repo.update_collection(other.id, collection.id, &update).unwrap(), 0);
    assert_eq!(repo.update_collection(owner.id, collection.id, &update).unwrap(), 1);
    let published = repo
        .get_collection_for_user(owner.id, collection.id)
        .unwrap()
        .unwrap();
    assert!(published.is_public);
}

#[test]
fn linking_images_is_all_or_nothing() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let created = repo
        .create_user_images(owner.id, &[new_image("a"), new_image("b")])
        .unwrap();
    let (a, b) = (created[0].image.id, created[1].image.id);
    let collection = repo
        .create_collection(&new_collection(&owner, "Set"))
        .unwrap();

    let links = repo.add_collection_images(collection.id, &[b, a]).unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].image_id, b);
    assert_eq!(links[1].image_id, a);

    repo.remove_collection_image(collection.id, a).unwrap();

    let err = repo.add_collection_images(collection.id, &[a, b]).unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let linked = repo.list_collection_images(collection.id).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, b);
}

#[test]
fn linking_an_unknown_image_is_rejected_by_the_database() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let collection = repo
        .create_collection(&new_collection(&owner, "Set"))
        .unwrap();

    let err = repo
        .add_collection_images(collection.id, &[ImageId::new(404).unwrap()])
        .unwrap_err();

    assert!(matches!(err, RepositoryError::MissingReference(_)));
}

#[test]
fn deleting_collections_cascades_to_links_only() {
    let test_db = TestDb::new();
    let repo = test_db.repo();
    let owner = create_user(&repo, "owner@example.com", UserRole::Photographer);
    let other = create_user(&repo, "other@example.com", UserRole::Photographer);
    let created = repo.create_user_images(owner.id, &[new_image("a")]).unwrap();
    let first = repo
        .create_collection(&new_collection(&owner, "First"))
        .unwrap();
    let second = repo
        .create_collection(&new_collection(&owner, "Second"))
        .unwrap();
    repo.create_collection(&new_collection(&other, "Untouched"))
        .unwrap();
    repo.add_collection_images(first.id, &[created[0].image.id])
        .unwrap();

    assert_eq!(repo.delete_collection(other.id, first.id).unwrap(), 0);
    assert_eq!(repo.delete_collection(owner.id, first.id).unwrap(), 1);

    let mut conn = test_db.pool().get().unwrap();
    let links: i64 = collection_images::table
        .count()
        .get_result(&mut conn)
        .unwrap();
    let stored_images: i64 = images::table.count().get_result(&mut conn).unwrap();
    assert_eq!(links, 0);
    assert_eq!(stored_images, 1);

    assert_eq!(repo.delete_collections_for_user(owner.id).unwrap(), 1);
    assert!(
        repo.get_collection_for_user(owner.id, second.id)
            .unwrap()
            .is_none()
    );
    let (remaining, _) = repo
        .list_collections(CollectionListQuery::new(other.id))
        .unwrap();
    assert_eq!(remaining, 1);
}
