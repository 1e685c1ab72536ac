//! Aggregate builder / join engine
//!
//! Owns the [`Collection`] for one pipeline run and applies normalized
//! fragments onto its tracks by exact track-id match.
//!
//! # Stages
//! ```text
//! Empty --summary--> Stubbed --details--> Detailed --comments--> Commented --urls--> Ready
//! ```
//! Re-applying a fragment in the stage it produced is allowed and idempotent.
//! Fragment entries for ids not in the collection are ignored; tracks missing
//! from a fragment keep whatever they already had.

use crate::error::{IngestError, IngestResult};
use crate::models::Collection;
use crate::normalize::{CommentFragment, DetailFragment, SummaryFragment, UrlFragment};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Build progress of the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum BuildStage {
    Empty,
    Stubbed,
    Detailed,
    Commented,
    Ready,
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStage::Empty => "empty",
            BuildStage::Stubbed => "stubbed",
            BuildStage::Detailed => "detailed",
            BuildStage::Commented => "commented",
            BuildStage::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Join engine for a single collection
#[derive(Debug)]
pub struct CollectionBuilder {
    stage: BuildStage,
    collection: Option<Collection>,
}

impl Default for CollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CollectionBuilder {
    pub fn new() -> Self {
        Self {
            stage: BuildStage::Empty,
            collection: None,
        }
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    /// Collection under construction (`None` while Empty)
    pub fn collection(&self) -> Option<&Collection> {
        self.collection.as_ref()
    }

    /// Track ids in collection order (empty while Empty)
    pub fn track_ids(&self) -> Vec<String> {
        self.collection
            .as_ref()
            .map(Collection::track_ids)
            .unwrap_or_default()
    }

    /// Empty → Stubbed: create the collection and attach track stubs
    ///
    /// Returns the number of stubs attached. Re-applying a summary keeps the
    /// existing tracks and only attaches stubs with new ids.
    pub fn apply_summary(&mut self, summary: SummaryFragment) -> IngestResult<usize> {
        self.advance(BuildStage::Empty, BuildStage::Stubbed)?;

        let SummaryFragment {
            collection: incoming,
            stubs,
            ..
        } = summary;
        let collection = self.collection.get_or_insert(incoming);

        let mut attached = 0;
        for stub in stubs {
            if collection.attach_track(stub) {
                attached += 1;
            }
        }
        Ok(attached)
    }

    /// Stubbed → Detailed: attach performers and album where present
    ///
    /// Returns the number of tracks that received a detail entry.
    pub fn apply_details(&mut self, fragment: &DetailFragment) -> IngestResult<usize> {
        self.advance(BuildStage::Stubbed, BuildStage::Detailed)?;
        let collection = self.collection_mut()?;

        let mut joined = 0;
        for track in collection.tracks_mut() {
            match fragment.details.get(&track.id) {
                Some(detail) => {
                    track.apply_detail(&detail.performers, detail.album.as_ref());
                    joined += 1;
                }
                None => debug!(track_id = %track.id, "No detail entry, keeping stub fields"),
            }
        }
        Ok(joined)
    }

    /// Attach one track's comments (allowed while Detailed or Commented)
    ///
    /// Returns `false` when the track id is not part of the collection.
    pub fn apply_comments(
        &mut self,
        track_id: &str,
        fragment: &CommentFragment,
    ) -> IngestResult<bool> {
        if !matches!(self.stage, BuildStage::Detailed | BuildStage::Commented) {
            return Err(IngestError::InvalidTransition {
                from: self.stage,
                to: BuildStage::Commented,
            });
        }
        let collection = self.collection_mut()?;

        match collection.track_mut(track_id) {
            Some(track) => {
                track.apply_comments(&fragment.hot, &fragment.general);
                Ok(true)
            }
            None => {
                debug!(track_id = %track_id, "Comments for unknown track ignored");
                Ok(false)
            }
        }
    }

    /// Detailed → Commented: close the comment stage
    pub fn finish_comments(&mut self) -> IngestResult<()> {
        self.advance(BuildStage::Detailed, BuildStage::Commented)
    }

    /// Commented → Ready: attach playback URLs where present
    ///
    /// Returns the number of tracks that received a URL.
    pub fn apply_urls(&mut self, fragment: &UrlFragment) -> IngestResult<usize> {
        self.advance(BuildStage::Commented, BuildStage::Ready)?;
        let collection = self.collection_mut()?;

        let mut joined = 0;
        for track in collection.tracks_mut() {
            if let Some(Some(url)) = fragment.urls.get(&track.id) {
                track.apply_url(Some(url));
                joined += 1;
            }
        }
        Ok(joined)
    }

    /// Hand out the finished collection (only once Ready)
    pub fn finish(self) -> IngestResult<Collection> {
        match (self.stage, self.collection) {
            (BuildStage::Ready, Some(collection)) => Ok(collection),
            (stage, _) => Err(IngestError::InvalidTransition {
                from: stage,
                to: BuildStage::Ready,
            }),
        }
    }

    /// Move from `from` to `to`; staying in `to` is allowed (re-application)
    fn advance(&mut self, from: BuildStage, to: BuildStage) -> IngestResult<()> {
        if self.stage == from || self.stage == to {
            self.stage = to;
            Ok(())
        } else {
            Err(IngestError::InvalidTransition {
                from: self.stage,
                to,
            })
        }
    }

    fn collection_mut(&mut self) -> IngestResult<&mut Collection> {
        let stage = self.stage;
        self.collection
            .as_mut()
            .ok_or(IngestError::InvalidTransition {
                from: BuildStage::Empty,
                to: stage,
            })
    }
}
