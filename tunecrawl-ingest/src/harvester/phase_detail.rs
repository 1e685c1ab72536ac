//! DETAIL phase: performers and album for every track

use super::{join_ids, DetailStats, Harvester};
use crate::aggregate::CollectionBuilder;
use crate::error::{IngestError, IngestResult};
use crate::fetcher::Endpoint;
use crate::normalize::{normalize_details, DetailFragment};
use tracing::info;

impl Harvester {
    /// One batch request for all track ids; tracks missing from the response keep stub fields
    pub(super) async fn phase_detail(
        &self,
        collection_id: &str,
        builder: &mut CollectionBuilder,
    ) -> IngestResult<DetailStats> {
        let track_ids = builder.track_ids();

        let fragment = if track_ids.is_empty() {
            DetailFragment::default()
        } else {
            let raw = self
                .fetcher
                .fetch(Endpoint::Detail, &join_ids(&track_ids))
                .await
                .map_err(|source| IngestError::Fetch {
                    endpoint: Endpoint::Detail,
                    collection_id: collection_id.to_string(),
                    source,
                })?;
            normalize_details(raw).map_err(|source| IngestError::Malformed {
                endpoint: Endpoint::Detail,
                collection_id: collection_id.to_string(),
                source,
            })?
        };

        let detailed = builder.apply_details(&fragment)?;

        let stats = DetailStats {
            detailed,
            total: track_ids.len(),
            skipped: fragment.skipped,
        };
        info!(
            collection_id = %collection_id,
            skipped = stats.skipped,
            "Phase DETAIL: {}",
            stats.display_string()
        );
        Ok(stats)
    }
}
