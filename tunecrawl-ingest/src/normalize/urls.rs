//! Batch playback URL normalizer

use super::{decode_response, present, UrlFragment};
use crate::error::NormalizeError;
use crate::wire::{decode_record, UrlRecord, UrlResponse};
use serde_json::Value;
use std::collections::hash_map::Entry;
use tracing::warn;

/// Translate a raw URL batch (`data`) into an optional URL per track id
///
/// Entries without a URL map to `None`; not every track has a resolvable file.
/// When an id repeats, a resolved URL is kept over a later empty one.
pub fn normalize_urls(raw: Value) -> Result<UrlFragment, NormalizeError> {
    let response: UrlResponse = decode_response(raw)?;
    let data = response.data.ok_or(NormalizeError::MissingField("data"))?;

    let mut fragment = UrlFragment::default();

    for record in data {
        let Some(entry) = decode_record::<UrlRecord>(record, "track url") else {
            fragment.skipped += 1;
            continue;
        };
        let Some(track_id) = entry.id.map(|id| id.to_text()) else {
            warn!("Skipping url entry without id");
            fragment.skipped += 1;
            continue;
        };
        let url = present(entry.url);
        match fragment.urls.entry(track_id) {
            Entry::Occupied(mut slot) => {
                if url.is_some() {
                    slot.insert(url);
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(url);
            }
        }
    }

    Ok(fragment)
}
