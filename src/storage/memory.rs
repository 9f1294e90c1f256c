// src/storage/memory.rs
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;

use super::{ServerStore, StoreError};
use crate::models::server::ServerRecord;

// Insertion-ordered store for local runs without MongoDB and for tests.
// Same contract as the Mongo-backed store, nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<ServerRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServerStore for MemoryStore {
    async fn insert(&self, mut record: ServerRecord) -> Result<ServerRecord, StoreError> {
        if record.id.is_none() {
            record.id = Some(ObjectId::new());
        }
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ServerRecord>, StoreError> {
        Ok(self.records.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::server::CreateServerRequest;

    fn request(name: &str) -> CreateServerRequest {
        CreateServerRequest {
            name: name.to_string(),
            host: "127.0.0.1".to_string(),
            port: 25565,
            info: String::new(),
            bedrock_compatible: false,
            geyser: false,
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_echoes_record() {
        let store = MemoryStore::new();
        let stored = store
            .insert(request("Survival").into_record("u-1".to_string()))
            .await
            .unwrap();
        assert!(stored.id.is_some());
        assert_eq!(stored.name, "Survival");
        assert_eq!(stored.created_by, "u-1");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryStore::new();
        for name in ["Survival", "Creative", "Anarchy"] {
            store
                .insert(request(name).into_record("u-1".to_string()))
                .await
                .unwrap();
        }
        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Survival", "Creative", "Anarchy"]);
    }

    #[tokio::test]
    async fn find_by_name_matches_substrings_case_insensitively() {
        let store = MemoryStore::new();
        for name in ["Survival", "Creative"] {
            store
                .insert(request(name).into_record("u-1".to_string()))
                .await
                .unwrap();
        }

        let survival: Vec<String> = store
            .find_by_name("surv")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(survival, ["Survival"]);

        let both: Vec<String> = store
            .find_by_name("R")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(both, ["Survival", "Creative"]);

        assert_eq!(store.find_by_name("").await.unwrap().len(), 2);
        assert!(store.find_by_name("factions").await.unwrap().is_empty());
    }
}
