// src/storage/mongo.rs
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use log::info;
use mongodb::{bson::doc, Client, Collection};

use super::{ServerStore, StoreError};
use crate::models::server::ServerRecord;

pub struct MongoStore {
    servers: Collection<ServerRecord>,
}

impl MongoStore {
    // Connects and pings so a bad URI fails at startup, not on first request.
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        db.run_command(doc! { "ping": 1 }, None).await?;
        info!("Connected to MongoDB database `{}`", db_name);
        Ok(Self {
            servers: db.collection("servers"),
        })
    }
}

#[async_trait]
impl ServerStore for MongoStore {
    async fn insert(&self, mut record: ServerRecord) -> Result<ServerRecord, StoreError> {
        let result = self.servers.insert_one(&record, None).await?;
        record.id = result.inserted_id.as_object_id();
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<ServerRecord>, StoreError> {
        let cursor = self.servers.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }
}
