// src/storage/mod.rs
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use std::fmt;

use crate::models::server::ServerRecord;

// Store failures carry the backend's own message; handlers decide how much of
// it to surface.
#[derive(Debug)]
pub struct StoreError(String);

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StoreError {}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self(err.to_string())
    }
}

// Record store seam. Lifecycle is create-then-immutable-read: no update or
// delete exists.
#[async_trait]
pub trait ServerStore: Send + Sync {
    // Persists the record, assigning its id, and returns the stored copy.
    async fn insert(&self, record: ServerRecord) -> Result<ServerRecord, StoreError>;

    // All records in the store's natural return order (insertion order).
    async fn list(&self) -> Result<Vec<ServerRecord>, StoreError>;

    // Case-insensitive substring match on `name`; an empty query matches
    // everything. Matching runs here over `list` so every implementation
    // shares the same substring semantics.
    async fn find_by_name(&self, query: &str) -> Result<Vec<ServerRecord>, StoreError> {
        let records = self.list().await?;
        Ok(records
            .into_iter()
            .filter(|record| name_matches(&record.name, query))
            .collect())
    }
}

pub fn name_matches(name: &str, query: &str) -> bool {
    name.to_lowercase().contains(&query.to_lowercase())
}
