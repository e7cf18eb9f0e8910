mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::{Role, Status, User};

#[derive(Debug)]
pub enum StoreError {
    /// Another record already holds this email. Uniqueness is enforced
    /// here, under the store's own atomicity, so two racing creates
    /// cannot both commit.
    DuplicateEmail,
    NotFound,
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateEmail => write!(f, "email already in use"),
            StoreError::NotFound => write!(f, "record not found"),
            StoreError::Database(err) => write!(f, "database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

/// Backing storage for user records. Implementations must return records
/// from `list` ordered by creation time, newest first.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert a fully-formed record. Fails with `DuplicateEmail` if the
    /// email is already taken.
    async fn insert(&self, user: User) -> Result<User, StoreError>;

    /// Replace the record with the same id. Fails with `NotFound` if the
    /// id is absent, `DuplicateEmail` if the new email collides.
    async fn update(&self, user: User) -> Result<User, StoreError>;

    /// Remove a record. Returns false if the id was absent.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Seed the demo roster into an empty store. No-op if any records exist.
pub async fn seed_demo(store: &dyn UserStore) -> Result<(), StoreError> {
    if !store.list().await?.is_empty() {
        return Ok(());
    }

    let demo = [
        ("John Doe", "john.doe@example.com", Role::Admin, Status::Active),
        ("Jane Smith", "jane.smith@example.com", Role::Manager, Status::Active),
        ("Bob Johnson", "bob.johnson@example.com", Role::User, Status::Inactive),
    ];

    for (name, email, role, status) in demo {
        let now = Utc::now();
        store
            .insert(User {
                id: Uuid::now_v7(),
                name: name.to_string(),
                email: email.to_string(),
                role,
                status,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    tracing::info!("Seeded demo users");
    Ok(())
}
