//! Collection aggregate and its value types
//!
//! A [`Collection`] owns its [`Track`]s. Tracks start as stubs (id + name) and
//! are enriched in place; enrichment only adds data, it never clears a field
//! that an earlier stage filled.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level grouping of tracks
///
/// Serialize-only: every instance is built through [`Collection::new`] and
/// [`Collection::attach_track`], which keep track ids unique.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection {
    /// Collection identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Alternate names, in source order
    pub aliases: Vec<String>,
    /// Cover image
    pub cover_url: Option<String>,
    /// Square avatar image
    pub avatar_url: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    tracks: Vec<Track>,
}

impl Collection {
    /// Create a collection with no tracks
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            aliases: Vec::new(),
            cover_url: None,
            avatar_url: None,
            description: None,
            tracks: Vec::new(),
        }
    }

    /// Tracks in collection order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Look up a track by exact identifier
    pub fn track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    pub(crate) fn track_mut(&mut self, track_id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == track_id)
    }

    pub(crate) fn tracks_mut(&mut self) -> &mut [Track] {
        &mut self.tracks
    }

    /// Append a track unless one with the same id is already present
    ///
    /// Returns `false` when the id was already taken; the existing entry is kept.
    pub fn attach_track(&mut self, track: Track) -> bool {
        if self.track(&track.id).is_some() {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Identifiers of all tracks, in collection order
    pub fn track_ids(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.id.clone()).collect()
    }
}

/// One playable item of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub performers: Vec<Performer>,
    pub album: Option<Album>,
    /// Playback URL, absent when the track has no resolvable file
    pub url: Option<String>,
    pub hot_comments: Vec<Comment>,
    pub comments: Vec<Comment>,
}

impl Track {
    /// Create a stub track (identifier and name only)
    pub fn stub(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            performers: Vec::new(),
            album: None,
            url: None,
            hot_comments: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// True while no stage has enriched the track
    pub fn is_stub(&self) -> bool {
        self.performers.is_empty()
            && self.album.is_none()
            && self.url.is_none()
            && self.hot_comments.is_empty()
            && self.comments.is_empty()
    }

    /// Attach performers and album
    ///
    /// An empty performer list leaves existing performers in place.
    /// The album is last-write-wins.
    pub fn apply_detail(&mut self, performers: &[Performer], album: Option<&Album>) {
        if !performers.is_empty() {
            self.performers = performers.to_vec();
        }
        if let Some(album) = album {
            self.album = Some(album.clone());
        }
    }

    /// Attach hot and general comments; empty sequences leave existing ones in place
    pub fn apply_comments(&mut self, hot: &[Comment], general: &[Comment]) {
        if !hot.is_empty() {
            self.hot_comments = hot.to_vec();
        }
        if !general.is_empty() {
            self.comments = general.to_vec();
        }
    }

    /// Attach a playback URL; `None` leaves the current value in place
    pub fn apply_url(&mut self, url: Option<&str>) {
        if let Some(url) = url {
            self.url = Some(url.to_string());
        }
    }

    /// Total number of comments (hot + general)
    pub fn comment_count(&self) -> usize {
        self.hot_comments.len() + self.comments.len()
    }
}

/// Performer credited on a track (value type, duplicated per track)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub id: String,
    pub name: String,
}

/// Album a track belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub cover_url: Option<String>,
}

/// Comment left on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub content: String,
    pub liked_count: u64,
    pub time: DateTime<Utc>,
    pub user: User,
}

/// Author of a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub nickname: String,
    pub avatar_url: Option<String>,
}
