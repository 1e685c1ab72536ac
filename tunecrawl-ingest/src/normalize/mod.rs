//! Response normalizers
//!
//! One pure function per endpoint, turning a raw JSON response into a typed
//! fragment ready to be joined into the aggregate:
//! 1. **summary** - collection core fields + ordered track stubs (fatal if the
//!    collection id or name is missing)
//! 2. **detail** - performers and album keyed by track id
//! 3. **comments** - hot and general comments of one track
//! 4. **urls** - optional playback URL keyed by track id
//!
//! Sub-records missing a mandatory field are skipped with a warning and counted
//! in the fragment's `skipped` field; the rest of the batch still applies.

mod comments;
mod detail;
mod summary;
mod urls;

pub use comments::normalize_comments;
pub use detail::normalize_details;
pub use summary::normalize_summary;
pub use urls::normalize_urls;

use crate::error::NormalizeError;
use crate::models::{Album, Collection, Comment, Performer, Track};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;

/// Output of the summary normalizer
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryFragment {
    /// Collection core fields (no tracks attached yet)
    pub collection: Collection,
    /// Track stubs in source order, duplicates already collapsed
    pub stubs: Vec<Track>,
    pub skipped: usize,
}

/// Performers and album of one track
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackDetail {
    pub performers: Vec<Performer>,
    pub album: Option<Album>,
}

/// Output of the detail normalizer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailFragment {
    pub details: HashMap<String, TrackDetail>,
    pub skipped: usize,
}

/// Output of the comment normalizer (one track)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentFragment {
    pub hot: Vec<Comment>,
    pub general: Vec<Comment>,
    pub skipped: usize,
}

/// Output of the URL normalizer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UrlFragment {
    /// `None` when the source entry has no URL (expected, not an error)
    pub urls: HashMap<String, Option<String>>,
    pub skipped: usize,
}

/// Decode the top-level response object of an endpoint
fn decode_response<T: DeserializeOwned>(raw: Value) -> Result<T, NormalizeError> {
    if !raw.is_object() {
        return Err(NormalizeError::Shape(format!(
            "expected a JSON object, got {}",
            json_kind(&raw)
        )));
    }
    serde_json::from_value(raw).map_err(|e| NormalizeError::Shape(e.to_string()))
}

/// Trimmed, non-empty text or `None`
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
