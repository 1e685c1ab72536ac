//! Collection summary normalizer

use super::{decode_response, present, SummaryFragment};
use crate::error::NormalizeError;
use crate::models::{Collection, Track};
use crate::wire::{decode_record, SongStubRecord, SummaryResponse};
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Translate a raw summary response into collection core fields and track stubs
///
/// Fails when the collection identifier or name is missing; optional fields
/// (cover, avatar, aliases, description) default to absent. Stubs without an
/// id or name are skipped; a repeated stub id keeps its first occurrence.
pub fn normalize_summary(raw: Value) -> Result<SummaryFragment, NormalizeError> {
    let response: SummaryResponse = decode_response(raw)?;

    if let Some(code) = response.code.filter(|c| *c != 200) {
        return Err(NormalizeError::Rejected {
            code,
            message: response.msg.unwrap_or_default(),
        });
    }

    let artist = response
        .artist
        .ok_or(NormalizeError::MissingField("artist"))?;
    let id = artist
        .id
        .map(|id| id.to_text())
        .and_then(|id| present(Some(id)))
        .ok_or(NormalizeError::MissingField("artist.id"))?;
    let name = present(artist.name).ok_or(NormalizeError::MissingField("artist.name"))?;

    let mut collection = Collection::new(id, name);
    collection.aliases = artist
        .alias
        .unwrap_or_default()
        .into_iter()
        .filter_map(|alias| match alias {
            Value::String(alias) => Some(alias),
            _ => None,
        })
        .collect();
    collection.cover_url = present(artist.pic_url);
    collection.avatar_url = present(artist.img1v1_url);
    collection.description = present(artist.brief_desc);

    let mut stubs = Vec::new();
    let mut seen = HashSet::new();
    let mut skipped = 0;

    for record in response.hot_songs.unwrap_or_default() {
        let Some(song) = decode_record::<SongStubRecord>(record, "track stub") else {
            skipped += 1;
            continue;
        };
        let (Some(track_id), Some(track_name)) =
            (song.id.map(|id| id.to_text()), present(song.name))
        else {
            warn!(collection_id = %collection.id, "Skipping track stub without id or name");
            skipped += 1;
            continue;
        };
        if !seen.insert(track_id.clone()) {
            warn!(
                collection_id = %collection.id,
                track_id = %track_id,
                "Ignoring duplicate track stub"
            );
            continue;
        }
        stubs.push(Track::stub(track_id, track_name));
    }

    Ok(SummaryFragment {
        collection,
        stubs,
        skipped,
    })
}
