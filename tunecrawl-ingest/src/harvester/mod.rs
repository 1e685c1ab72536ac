//! Pipeline orchestrator
//!
//! Runs the four stages for one collection id, in fixed order, against a
//! single [`CollectionBuilder`]:
//!
//! SUMMARY → DETAIL → COMMENTS → URL
//!
//! Each stage is handled by a dedicated `phase_*` method:
//! - **SUMMARY**: one request, fatal on transport failure or missing id/name
//! - **DETAIL**: one batch request, fatal on transport failure
//! - **COMMENTS**: one request per track, bounded concurrency, per-track
//!   failures isolated
//! - **URL**: one batch request, fatal on transport failure
//!
//! The finished collection is stored in the [`CollectionStore`] and returned.
//! A failed run stores nothing.

use crate::aggregate::CollectionBuilder;
use crate::config::PipelineConfig;
use crate::error::{IngestError, IngestResult};
use crate::extract::comment_texts;
use crate::fetcher::{HttpFetcher, JsonFetcher};
use crate::models::{Collection, Track};
use crate::sink::SnippetSink;
use crate::store::CollectionStore;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{info, warn};

mod phase_comments;
mod phase_detail;
mod phase_summary;
mod phase_urls;
mod statistics;

pub use statistics::{CommentStats, DetailStats, RunStatistics, SummaryStats, UrlStats};

/// Collection harvester
pub struct Harvester {
    fetcher: Arc<dyn JsonFetcher>,
    store: CollectionStore,
    config: PipelineConfig,
    last_run: RwLock<Option<RunStatistics>>,
}

impl Harvester {
    /// Create a harvester with its own empty store
    pub fn new(fetcher: Arc<dyn JsonFetcher>, config: PipelineConfig) -> Self {
        Self::with_store(fetcher, config, CollectionStore::new())
    }

    /// Create a harvester sharing an existing store
    pub fn with_store(
        fetcher: Arc<dyn JsonFetcher>,
        config: PipelineConfig,
        store: CollectionStore,
    ) -> Self {
        Self {
            fetcher,
            store,
            config,
            last_run: RwLock::new(None),
        }
    }

    /// Create a harvester talking HTTP to `config.base_url`
    pub fn from_config(config: PipelineConfig) -> IngestResult<Self> {
        let fetcher = HttpFetcher::new(config.clone()).map_err(|e| {
            tunecrawl_common::Error::Config(format!("HTTP client setup failed: {e}"))
        })?;
        Ok(Self::new(Arc::new(fetcher), config))
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Harvest one collection
    ///
    /// Fails if the id is empty, if the summary cannot be fetched or lacks the
    /// collection id/name, or if the detail or URL batch cannot be fetched.
    /// Per-track comment failures are logged and do not fail the run.
    pub async fn run(&self, collection_id: &str) -> IngestResult<Arc<Collection>> {
        let collection_id = collection_id.trim();
        if collection_id.is_empty() {
            return Err(IngestError::InvalidInput(
                "collection id must not be empty".to_string(),
            ));
        }

        let start_time = Instant::now();
        info!(collection_id = %collection_id, "Harvest started");

        let mut builder = CollectionBuilder::new();
        let mut stats = RunStatistics::new(collection_id);

        stats.summary = self.phase_summary(collection_id, &mut builder).await?;
        stats.detail = self.phase_detail(collection_id, &mut builder).await?;
        stats.comments = self.phase_comments(collection_id, &mut builder).await?;
        stats.urls = self.phase_urls(collection_id, &mut builder).await?;

        let collection = self.store.insert(builder.finish()?).await;

        info!(
            collection_id = %collection.id,
            tracks = collection.tracks().len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            stats = %stats.display_string(),
            "Harvest complete"
        );
        *self.last_run.write().await = Some(stats);

        Ok(collection)
    }

    /// Harvest one collection and hand its comment texts to `sink`
    pub async fn run_and_publish(
        &self,
        collection_id: &str,
        sink: &dyn SnippetSink,
    ) -> IngestResult<Arc<Collection>> {
        let collection = self.run(collection_id).await?;
        let texts = comment_texts(&collection);
        sink.publish(&collection.id, &texts).await?;
        Ok(collection)
    }

    /// Previously harvested collection
    pub async fn collection(&self, collection_id: &str) -> Option<Arc<Collection>> {
        self.store.get(collection_id).await
    }

    /// Track of a previously harvested collection; `None` means "nothing at this id"
    pub async fn lookup_track(&self, collection_id: &str, track_id: &str) -> Option<Track> {
        self.store.lookup_track(collection_id, track_id).await
    }

    /// Statistics of the most recent successful run
    pub async fn last_run_stats(&self) -> Option<RunStatistics> {
        self.last_run.read().await.clone()
    }
}

/// Comma-joined identifier batch
fn join_ids(ids: &[String]) -> String {
    ids.join(",")
}

fn log_mismatched_id(requested: &str, collection: &Collection) {
    if collection.id != requested {
        warn!(
            requested = %requested,
            returned = %collection.id,
            "Summary returned a different collection id; storing under the returned id"
        );
    }
}
