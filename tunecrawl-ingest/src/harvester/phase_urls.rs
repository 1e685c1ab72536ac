//! URL phase: playback URL for every track that has one

use super::{join_ids, Harvester, UrlStats};
use crate::aggregate::CollectionBuilder;
use crate::error::{IngestError, IngestResult};
use crate::fetcher::Endpoint;
use crate::normalize::{normalize_urls, UrlFragment};
use tracing::info;

impl Harvester {
    /// One batch request for all track ids; missing URLs are expected
    pub(super) async fn phase_urls(
        &self,
        collection_id: &str,
        builder: &mut CollectionBuilder,
    ) -> IngestResult<UrlStats> {
        let track_ids = builder.track_ids();

        let fragment = if track_ids.is_empty() {
            UrlFragment::default()
        } else {
            let raw = self
                .fetcher
                .fetch(Endpoint::Url, &join_ids(&track_ids))
                .await
                .map_err(|source| IngestError::Fetch {
                    endpoint: Endpoint::Url,
                    collection_id: collection_id.to_string(),
                    source,
                })?;
            normalize_urls(raw).map_err(|source| IngestError::Malformed {
                endpoint: Endpoint::Url,
                collection_id: collection_id.to_string(),
                source,
            })?
        };

        let resolved = builder.apply_urls(&fragment)?;

        let stats = UrlStats {
            resolved,
            total: track_ids.len(),
            skipped: fragment.skipped,
        };
        info!(
            collection_id = %collection_id,
            "Phase URL: {}",
            stats.display_string()
        );
        Ok(stats)
    }
}
