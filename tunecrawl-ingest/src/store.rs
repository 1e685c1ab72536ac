//! In-memory collection store
//!
//! Created once per application instance and owned by the [`Harvester`].
//! Entries are replaced when a collection is harvested again and removed only
//! by an explicit [`CollectionStore::clear`].
//!
//! [`Harvester`]: crate::harvester::Harvester

use crate::models::{Collection, Track};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Shared handle over all collections built so far
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    collections: Arc<RwLock<HashMap<String, Arc<Collection>>>>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished collection, replacing any previous one with the same id
    pub async fn insert(&self, collection: Collection) -> Arc<Collection> {
        let collection = Arc::new(collection);
        self.collections
            .write()
            .await
            .insert(collection.id.clone(), Arc::clone(&collection));
        collection
    }

    pub async fn get(&self, collection_id: &str) -> Option<Arc<Collection>> {
        self.collections.read().await.get(collection_id).cloned()
    }

    /// Track `track_id` of collection `collection_id`, or `None` if either is unknown
    pub async fn lookup_track(&self, collection_id: &str, track_id: &str) -> Option<Track> {
        self.collections
            .read()
            .await
            .get(collection_id)
            .and_then(|c| c.track(track_id).cloned())
    }

    pub async fn len(&self) -> usize {
        self.collections.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.collections.read().await.is_empty()
    }

    /// Explicit reset: drop every stored collection
    pub async fn clear(&self) {
        let mut collections = self.collections.write().await;
        info!(count = collections.len(), "Clearing collection store");
        collections.clear();
    }
}
