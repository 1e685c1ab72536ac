//! Per-run statistics
//!
//! Filled in by each phase and logged at the end of the run.

use serde::{Deserialize, Serialize};

/// **SUMMARY** phase: "N tracks stubbed (M skipped)"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub tracks: usize,
    pub skipped: usize,
}

impl SummaryStats {
    pub fn display_string(&self) -> String {
        format!("{} tracks stubbed ({} skipped)", self.tracks, self.skipped)
    }
}

/// **DETAIL** phase: "N of M tracks detailed"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailStats {
    pub detailed: usize,
    pub total: usize,
    /// Sub-records dropped by the normalizer
    pub skipped: usize,
}

impl DetailStats {
    pub fn display_string(&self) -> String {
        format!("{} of {} tracks detailed", self.detailed, self.total)
    }
}

/// **COMMENTS** phase: "N of M tracks commented, F failed"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentStats {
    pub commented: usize,
    pub total: usize,
    /// Tracks whose request or response failed
    pub failed: usize,
    /// Comments dropped by the normalizer
    pub skipped: usize,
}

impl CommentStats {
    pub fn display_string(&self) -> String {
        format!(
            "{} of {} tracks commented, {} failed",
            self.commented, self.total, self.failed
        )
    }
}

/// **URL** phase: "N of M tracks with playback URL"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlStats {
    pub resolved: usize,
    pub total: usize,
    pub skipped: usize,
}

impl UrlStats {
    pub fn display_string(&self) -> String {
        format!("{} of {} tracks with playback URL", self.resolved, self.total)
    }
}

/// Statistics of one completed run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    pub collection_id: String,
    pub summary: SummaryStats,
    pub detail: DetailStats,
    pub comments: CommentStats,
    pub urls: UrlStats,
}

impl RunStatistics {
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            ..Self::default()
        }
    }

    pub fn display_string(&self) -> String {
        format!(
            "{}; {}; {}; {}",
            self.summary.display_string(),
            self.detail.display_string(),
            self.comments.display_string(),
            self.urls.display_string()
        )
    }
}
