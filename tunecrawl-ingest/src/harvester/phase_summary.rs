//! SUMMARY phase: collection core fields and track stubs

use super::{log_mismatched_id, Harvester, SummaryStats};
use crate::aggregate::CollectionBuilder;
use crate::error::{IngestError, IngestResult};
use crate::fetcher::Endpoint;
use crate::normalize::normalize_summary;
use tracing::info;

impl Harvester {
    /// Fatal on any failure: without a summary there is no collection
    pub(super) async fn phase_summary(
        &self,
        collection_id: &str,
        builder: &mut CollectionBuilder,
    ) -> IngestResult<SummaryStats> {
        let raw = self
            .fetcher
            .fetch(Endpoint::Summary, collection_id)
            .await
            .map_err(|source| IngestError::Fetch {
                endpoint: Endpoint::Summary,
                collection_id: collection_id.to_string(),
                source,
            })?;

        let fragment = normalize_summary(raw).map_err(|source| IngestError::Malformed {
            endpoint: Endpoint::Summary,
            collection_id: collection_id.to_string(),
            source,
        })?;
        log_mismatched_id(collection_id, &fragment.collection);

        let skipped = fragment.skipped;
        let tracks = builder.apply_summary(fragment)?;

        let stats = SummaryStats { tracks, skipped };
        info!(
            collection_id = %collection_id,
            "Phase SUMMARY: {}",
            stats.display_string()
        );
        Ok(stats)
    }
}
