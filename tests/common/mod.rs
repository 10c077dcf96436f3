//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::Utc;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use photoplatform::db::{DbPool, establish_connection_pool};
use photoplatform::domain::auth::AuthenticatedUser;
use photoplatform::domain::image::NewImage;
use photoplatform::domain::types::{
    ImageName, ImagePrice, PersonName, StoragePath, UserEmail, UserRole,
};
use photoplatform::domain::user::{NewUser, User};
use photoplatform::repository::{DieselRepository, UserWriter};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

/// Insert an enabled user with the given role.
pub fn create_user(repo: &DieselRepository, email: &str, role: UserRole) -> User {
    repo.create_user(&NewUser {
        email: UserEmail::new(email).expect("valid email"),
        first_name: PersonName::new("Dorothea").expect("valid name"),
        last_name: PersonName::new("Lange").expect("valid name"),
        password_hash: "not-a-real-hash".to_string(),
        role,
        enabled: true,
        created_at: Utc::now().naive_utc(),
    })
    .expect("should create user")
}

pub fn identity(user: &User) -> AuthenticatedUser {
    AuthenticatedUser::from(user)
}

pub fn new_image(name: &str) -> NewImage {
    NewImage {
        name: ImageName::new(name).expect("valid image name"),
        description: None,
        price: ImagePrice::new(9.5).expect("valid price"),
        compression: None,
        x_dimension: None,
        y_dimension: None,
        x_resolution: None,
        y_resolution: None,
        resolution_unit: None,
        path: StoragePath::new(format!("uploads/{name}.jpg")).expect("valid path"),
        created_at: Utc::now().naive_utc(),
    }
}
