use thiserror::Error;

use crate::models::{MatchRecord, UserRecord};

/// Errors that can occur when reading or writing the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Seed file error: {0}")]
    Seed(String),
}

/// Mutation applied to a stored user while the store holds its write lock
pub type UserUpdate = Box<dyn FnOnce(&mut UserRecord) + Send>;

/// Mutation applied to a stored match while the store holds its write lock
pub type MatchUpdate = Box<dyn FnOnce(&mut MatchRecord) + Send>;

/// Storage the matching service depends on
///
/// Implementations must apply each update as a single read-modify-write so
/// that concurrent requests against the same record cannot lose writes.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Look up one user by id
    async fn find_user_by_id(&self, id: &str) -> Result<UserRecord, StoreError>;

    /// Every stored user, in insertion order
    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;

    /// Apply `update` to the user and return the updated record
    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<UserRecord, StoreError>;

    /// Remove a user
    async fn delete_user(&self, id: &str) -> Result<(), StoreError>;

    /// The match between two users, in either order
    async fn find_match_between(&self, a: &str, b: &str) -> Result<Option<MatchRecord>, StoreError>;

    async fn find_match_by_id(&self, id: &str) -> Result<MatchRecord, StoreError>;

    /// Every match the user participates in
    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError>;

    /// Store a new match; fails with [`StoreError::Conflict`] if the pair
    /// already has one
    async fn insert_match(&self, record: MatchRecord) -> Result<MatchRecord, StoreError>;

    /// Apply `update` to the match and return the updated record
    async fn update_match(&self, id: &str, update: MatchUpdate) -> Result<MatchRecord, StoreError>;
}
