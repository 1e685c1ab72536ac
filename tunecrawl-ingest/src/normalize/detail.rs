//! Batch track detail normalizer

use super::{decode_response, present, DetailFragment, TrackDetail};
use crate::error::NormalizeError;
use crate::models::{Album, Performer};
use crate::wire::{decode_record, AlbumRecord, DetailResponse, PerformerRecord, SongDetailRecord};
use serde_json::Value;
use tracing::warn;

/// Translate a raw detail batch (`songs`) into performers and album per track id
///
/// A missing `songs` array is a malformed response. Inside the batch, songs
/// without an id, performers without id or name, and albums without id or
/// name are skipped with a warning.
pub fn normalize_details(raw: Value) -> Result<DetailFragment, NormalizeError> {
    let response: DetailResponse = decode_response(raw)?;
    let songs = response.songs.ok_or(NormalizeError::MissingField("songs"))?;

    let mut fragment = DetailFragment::default();

    for record in songs {
        let Some(song) = decode_record::<SongDetailRecord>(record, "track detail") else {
            fragment.skipped += 1;
            continue;
        };
        let Some(track_id) = song.id.map(|id| id.to_text()) else {
            warn!("Skipping track detail without id");
            fragment.skipped += 1;
            continue;
        };

        let mut performers = Vec::new();
        for record in song.artists.unwrap_or_default() {
            let performer = decode_record::<PerformerRecord>(record, "performer").and_then(|p| {
                Some(Performer {
                    id: p.id?.to_text(),
                    name: present(p.name)?,
                })
            });
            match performer {
                Some(performer) => performers.push(performer),
                None => {
                    warn!(track_id = %track_id, "Skipping performer without id or name");
                    fragment.skipped += 1;
                }
            }
        }

        let album = match song.album {
            None => None,
            Some(record) => {
                let album = decode_record::<AlbumRecord>(record, "album").and_then(|a| {
                    Some(Album {
                        id: a.id?.to_text(),
                        name: present(a.name)?,
                        cover_url: present(a.pic_url),
                    })
                });
                if album.is_none() {
                    warn!(track_id = %track_id, "Skipping album without id or name");
                    fragment.skipped += 1;
                }
                album
            }
        };

        fragment
            .details
            .insert(track_id, TrackDetail { performers, album });
    }

    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_keyed_by_track_id() {
        let raw = json!({
            "songs": [{
                "id": 536096151,
                "name": "左手指月",
                "ar": [{"id": 9270, "name": "萨顶顶"}, {"id": 2, "name": "guest"}],
                "al": {
                    "id": 7,
                    "name": "香蜜沉沉烬如霜 电视原声音乐专辑",
                    "picUrl": "http://img/al.jpg"
                }
            }],
            "privileges": []
        });

        let fragment = normalize_details(raw).unwrap();
        let detail = &fragment.details["536096151"];

        assert_eq!(detail.performers.len(), 2);
        assert_eq!(detail.performers[0].name, "萨顶顶");
        let album = detail.album.as_ref().unwrap();
        assert_eq!(album.id, "7");
        assert_eq!(album.cover_url.as_deref(), Some("http://img/al.jpg"));
        assert_eq!(fragment.skipped, 0);
    }

    #[test]
    fn test_album_cover_is_optional() {
        let raw = json!({
            "songs": [{"id": 1, "ar": [], "al": {"id": 7, "name": "a", "picUrl": null}}]
        });

        let fragment = normalize_details(raw).unwrap();

        let album = fragment.details["1"].album.as_ref().unwrap();
        assert!(album.cover_url.is_none());
    }

    #[test]
    fn test_wrongly_typed_cover_keeps_album() {
        let raw = json!({
            "songs": [{
                "id": 1,
                "ar": [{"id": 9270, "name": "萨顶顶"}],
                "al": {"id": 7, "name": "album", "picUrl": 123}
            }]
        });

        let fragment = normalize_details(raw).unwrap();

        let album = fragment.details["1"].album.as_ref().unwrap();
        assert_eq!(album.name, "album");
        assert!(album.cover_url.is_none());
        assert_eq!(fragment.skipped, 0);
    }

    #[test]
    fn test_incomplete_sub_records_are_skipped() {
        let raw = json!({
            "songs": [
                {"id": 1, "ar": [{"id": 5}, {"id": 6, "name": "ok"}], "al": {"name": "no id"}},
                {"name": "no id at all"},
                {"id": 2, "ar": [{"id": 8, "name": "fine"}], "al": null}
            ]
        });

        let fragment = normalize_details(raw).unwrap();

        assert_eq!(fragment.details.len(), 2);
        assert_eq!(fragment.details["1"].performers.len(), 1);
        assert!(fragment.details["1"].album.is_none());
        assert!(fragment.details["2"].album.is_none());
        // one performer, one album, one song
        assert_eq!(fragment.skipped, 3);
    }

    #[test]
    fn test_missing_songs_array_is_malformed() {
        let err = normalize_details(json!({"code": 200})).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField("songs")));
    }
}
