//! COMMENTS phase: hot and general comments, one request per track
//!
//! Requests run through an order-preserving stream with at most
//! `comment_concurrency` in flight. Joins happen only on this task, one
//! fragment at a time, in track order.

use super::{CommentStats, Harvester};
use crate::aggregate::CollectionBuilder;
use crate::error::IngestResult;
use crate::fetcher::Endpoint;
use crate::normalize::normalize_comments;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

impl Harvester {
    /// Per-track failures are logged and counted; they never fail the run
    pub(super) async fn phase_comments(
        &self,
        collection_id: &str,
        builder: &mut CollectionBuilder,
    ) -> IngestResult<CommentStats> {
        let track_ids = builder.track_ids();
        let mut stats = CommentStats {
            total: track_ids.len(),
            ..CommentStats::default()
        };

        let fetcher = Arc::clone(&self.fetcher);
        let mut responses = stream::iter(track_ids.into_iter().map(move |track_id| {
            let fetcher = Arc::clone(&fetcher);
            async move {
                let result = fetcher.fetch(Endpoint::Comments, &track_id).await;
                (track_id, result)
            }
        }))
        .buffered(self.config.comment_concurrency.max(1));

        while let Some((track_id, result)) = responses.next().await {
            let raw = match result {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        collection_id = %collection_id,
                        track_id = %track_id,
                        url = %e.url(),
                        error = %e,
                        "Comment fetch failed, track keeps no comments"
                    );
                    stats.failed += 1;
                    continue;
                }
            };

            let fragment = match normalize_comments(&track_id, raw) {
                Ok(fragment) => fragment,
                Err(e) => {
                    warn!(
                        collection_id = %collection_id,
                        track_id = %track_id,
                        error = %e,
                        "Comment response malformed, track keeps no comments"
                    );
                    stats.failed += 1;
                    continue;
                }
            };

            stats.skipped += fragment.skipped;
            if builder.apply_comments(&track_id, &fragment)? {
                stats.commented += 1;
            }
        }

        builder.finish_comments()?;

        if stats.failed > 0 {
            warn!(
                collection_id = %collection_id,
                failed = stats.failed,
                "Phase COMMENTS: {}",
                stats.display_string()
            );
        } else {
            info!(
                collection_id = %collection_id,
                skipped = stats.skipped,
                "Phase COMMENTS: {}",
                stats.display_string()
            );
        }
        Ok(stats)
    }
}
