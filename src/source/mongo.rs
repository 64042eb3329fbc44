//! MongoDB-backed source
//!
//! Counts come from `count_documents` on each tracked collection; status
//! updates come from the `statusUpdates` collection ordered by `_id`.

use super::{CountSource, UpdateSource};
use crate::config::SourceConfig;
use crate::constants::store::STATUS_COLLECTION;
use crate::error::MonitorError;
use crate::types::{CollectionName, StatusUpdate, UpdateId};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Database};
use tracing::{debug, info};

/// Count and update source reading the clone detector's database
#[derive(Debug, Clone)]
pub struct MongoSource {
    db: Database,
}

impl MongoSource {
    /// Build a client for the configured store
    ///
    /// The driver connects lazily, so an unreachable store surfaces on the
    /// first poll rather than here.
    pub async fn connect(config: &SourceConfig) -> Result<Self, MonitorError> {
        let uri = config.uri();
        let mut options = ClientOptions::parse(&uri)
            .await
            .map_err(MonitorError::source_unavailable)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_selection_timeout = Some(config.timeout);

        let client = Client::with_options(options).map_err(MonitorError::source_unavailable)?;
        info!(
            "Using document store {} (database '{}')",
            uri, config.database
        );

        Ok(Self {
            db: client.database(&config.database),
        })
    }

    fn since_filter(since: Option<&UpdateId>) -> Document {
        match since {
            None => doc! {},
            Some(id) => match ObjectId::parse_str(id.as_str()) {
                Ok(oid) => doc! { "_id": { "$gt": oid } },
                Err(_) => doc! { "_id": { "$gt": id.as_str() } },
            },
        }
    }

    fn to_status_update(document: &Document) -> Option<StatusUpdate> {
        let id = match document.get("_id")? {
            Bson::ObjectId(oid) => oid.to_hex(),
            Bson::String(s) => s.clone(),
            other => other.to_string(),
        };
        let timestamp = match document.get("timestamp") {
            Some(Bson::DateTime(dt)) => dt
                .try_to_rfc3339_string()
                .unwrap_or_else(|_| dt.to_string()),
            Some(Bson::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let message = match document.get("message") {
            Some(Bson::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Some(StatusUpdate::new(UpdateId::new(id), timestamp, message))
    }
}

#[async_trait]
impl CountSource for MongoSource {
    async fn count(&self, collection: CollectionName) -> Result<u64, MonitorError> {
        self.db
            .collection::<Document>(collection.as_str())
            .count_documents(doc! {}, None)
            .await
            .map_err(MonitorError::source_unavailable)
    }
}

#[async_trait]
impl UpdateSource for MongoSource {
    async fn fetch_since(
        &self,
        since: Option<&UpdateId>,
    ) -> Result<Vec<StatusUpdate>, MonitorError> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let cursor = self
            .db
            .collection::<Document>(STATUS_COLLECTION)
            .find(Self::since_filter(since), options)
            .await
            .map_err(MonitorError::source_unavailable)?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(MonitorError::source_unavailable)?;
        debug!("Fetched {} new status documents", documents.len());

        Ok(documents
            .iter()
            .filter_map(Self::to_status_update)
            .collect())
    }
}
