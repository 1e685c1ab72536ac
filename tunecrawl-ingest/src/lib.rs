//! tunecrawl-ingest: multi-source collection aggregation
//!
//! Fetches a collection summary, batch track details, per-track comments and
//! batch playback URLs from independent endpoints, and reconciles them into a
//! single [`Collection`] keyed by track identifier.
//!
//! # Pipeline
//! - **Summary**: collection core fields + track stubs (fatal on failure)
//! - **Detail**: performers and album per track
//! - **Comments**: hot and general comments, one request per track
//! - **Url**: playback URL per track
//!
//! The finished collection is kept in a [`CollectionStore`] and its comment
//! bodies can be handed to a [`SnippetSink`].

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod harvester;
pub mod models;
pub mod normalize;
pub mod sink;
pub mod store;
pub mod wire;

pub use crate::aggregate::{BuildStage, CollectionBuilder};
pub use crate::config::PipelineConfig;
pub use crate::error::{FetchError, IngestError, IngestResult, NormalizeError};
pub use crate::extract::comment_texts;
pub use crate::fetcher::{Endpoint, HttpFetcher, JsonFetcher};
pub use crate::harvester::{Harvester, RunStatistics};
pub use crate::models::{Album, Collection, Comment, Performer, Track, User};
pub use crate::sink::{SnippetFileSink, SnippetSink};
pub use crate::store::CollectionStore;
