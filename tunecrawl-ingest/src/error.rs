//! Error types for tunecrawl-ingest
//!
//! - [`FetchError`]: transport-level failure of a single request
//! - [`NormalizeError`]: a response lacks a mandatory field or has the wrong shape
//! - [`IngestError`]: pipeline failure, naming the stage and the collection

use crate::aggregate::BuildStage;
use crate::fetcher::Endpoint;
use thiserror::Error;

/// Remote fetch errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            FetchError::Network { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Decode { url, .. } => url,
        }
    }
}

/// Response normalisation errors
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("missing mandatory field '{0}'")]
    MissingField(&'static str),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("remote rejected the request with code {code}: {message}")]
    Rejected { code: i64, message: String },
}

/// Pipeline errors
#[derive(Debug, Error)]
pub enum IngestError {
    /// Invalid caller input (e.g. empty collection identifier)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Fatal transport failure of a stage
    #[error("{endpoint} stage failed for collection {collection_id}: {source}")]
    Fetch {
        endpoint: Endpoint,
        collection_id: String,
        #[source]
        source: FetchError,
    },

    /// Stage-level response missing a mandatory field
    #[error("{endpoint} response for collection {collection_id} is malformed: {source}")]
    Malformed {
        endpoint: Endpoint,
        collection_id: String,
        #[source]
        source: NormalizeError,
    },

    /// Join engine driven out of order
    #[error("Cannot move collection from {from} to {to}")]
    InvalidTransition { from: BuildStage, to: BuildStage },

    /// IO error (snippet hand-off)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// tunecrawl-common error
    #[error("Common error: {0}")]
    Common(#[from] tunecrawl_common::Error),
}

impl IngestError {
    /// Stage that failed, if the error belongs to one
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            IngestError::Fetch { endpoint, .. } | IngestError::Malformed { endpoint, .. } => {
                Some(*endpoint)
            }
            _ => None,
        }
    }
}

/// Result type for pipeline operations
pub type IngestResult<T> = Result<T, IngestError>;
