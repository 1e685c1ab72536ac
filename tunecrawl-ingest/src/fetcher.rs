//! Remote fetcher
//!
//! One GET per (endpoint, identifier set), decoded into generic JSON. No
//! retries and no timeout beyond the transport default. Every request is logged
//! with its URL and the response size (or the failure); callers never branch
//! on the log output.

use crate::config::PipelineConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("tunecrawl/", env!("CARGO_PKG_VERSION"));

/// The four remote endpoints, in pipeline order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Collection summary (single collection id)
    Summary,
    /// Batch track detail (comma-joined track ids)
    Detail,
    /// Paginated comments (single track id)
    Comments,
    /// Batch playback URL resolution (comma-joined track ids)
    Url,
}

impl Endpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Summary => "summary",
            Endpoint::Detail => "detail",
            Endpoint::Comments => "comments",
            Endpoint::Url => "url",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fetch decoded JSON for an endpoint
///
/// `ids` is a single identifier or a comma-joined identifier batch.
///
/// # Example
/// ```rust,ignore
/// let fetcher = HttpFetcher::new(PipelineConfig::default())?;
/// let raw = fetcher.fetch(Endpoint::Summary, "9270").await?;
/// ```
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch(&self, endpoint: Endpoint, ids: &str) -> Result<Value, FetchError>;
}

/// HTTP fetcher backed by `reqwest`
pub struct HttpFetcher {
    http_client: reqwest::Client,
    config: PipelineConfig,
}

impl HttpFetcher {
    pub fn new(config: PipelineConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Network {
                url: config.base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch(&self, endpoint: Endpoint, ids: &str) -> Result<Value, FetchError> {
        let url = self.config.url_for(endpoint, ids);

        let response = match self.http_client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %endpoint, url = %url, error = %e, "Request failed");
                return Err(FetchError::Network {
                    url,
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, url = %url, status = status.as_u16(), "Request rejected");
            return Err(FetchError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(endpoint = %endpoint, url = %url, error = %e, "Reading response body failed");
                return Err(FetchError::Network {
                    url,
                    message: e.to_string(),
                });
            }
        };

        debug!(endpoint = %endpoint, url = %url, size = body.len(), "Response received");

        serde_json::from_str(&body).map_err(|e| {
            warn!(endpoint = %endpoint, url = %url, error = %e, "Response is not JSON");
            FetchError::Decode {
                url,
                message: e.to_string(),
            }
        })
    }
}
