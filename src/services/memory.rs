use serde::Deserialize;
use std::path::Path;
use tokio::sync::RwLock;

use crate::models::{MatchRecord, UserRecord};
use crate::services::store::{MatchUpdate, StoreError, UserStore, UserUpdate};

/// Initial contents of an in-memory store
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Default)]
struct Collections {
    users: Vec<UserRecord>,
    matches: Vec<MatchRecord>,
}

/// In-process store backed by vectors behind a single lock
///
/// Users and matches share one `RwLock` so that check-then-insert on matches
/// and read-modify-write updates each run under one write acquisition.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: SeedData) -> Self {
        Self {
            inner: RwLock::new(Collections {
                users: seed.users,
                matches: seed.matches,
            }),
        }
    }

    /// Load a store from a JSON seed file
    pub async fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        let seed: SeedData = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Seed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            "Loaded seed data from {} ({} users, {} matches)",
            path.display(),
            seed.users.len(),
            seed.matches.len()
        );

        Ok(Self::with_seed(seed))
    }
}

fn user_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("user {}", id))
}

fn match_not_found(id: &str) -> StoreError {
    StoreError::NotFound(format!("match {}", id))
}

#[async_trait::async_trait]
impl UserStore for MemoryStore {
    async fn find_user_by_id(&self, id: &str) -> Result<UserRecord, StoreError> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| user_not_found(id))
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn update_user(&self, id: &str, update: UserUpdate) -> Result<UserRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| user_not_found(id))?;

        update(&mut *user);
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| user_not_found(id))?;

        inner.users.remove(index);
        Ok(())
    }

    async fn find_match_between(&self, a: &str, b: &str) -> Result<Option<MatchRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.matches.iter().find(|m| m.connects(a, b)).cloned())
    }

    async fn find_match_by_id(&self, id: &str) -> Result<MatchRecord, StoreError> {
        let inner = self.inner.read().await;
        inner
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| match_not_found(id))
    }

    async fn matches_for_user(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .matches
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect())
    }

    async fn insert_match(&self, record: MatchRecord) -> Result<MatchRecord, StoreError> {
        let mut inner = self.inner.write().await;
        if inner
            .matches
            .iter()
            .any(|m| m.connects(&record.user1_id, &record.user2_id))
        {
            return Err(StoreError::Conflict("Match already exists".to_string()));
        }

        inner.matches.push(record.clone());
        Ok(record)
    }

    async fn update_match(&self, id: &str, update: MatchUpdate) -> Result<MatchRecord, StoreError> {
        let mut inner = self.inner.write().await;
        let record = inner
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| match_not_found(id))?;

        update(&mut *record);
        Ok(record.clone())
    }
}
