//! Pipeline configuration
//!
//! Derived from the shared [`TomlConfig`] (file → env → defaults, see
//! `tunecrawl_common::config`) and validated before a [`Harvester`] is built.
//!
//! [`Harvester`]: crate::harvester::Harvester

use crate::error::IngestResult;
use crate::fetcher::Endpoint;
use std::path::Path;
use tracing::info;
use tunecrawl_common::config::{load_config, ApiConfig, TomlConfig};
use tunecrawl_common::Error;

/// Endpoint templates relative to the base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTemplates {
    pub summary: String,
    pub detail: String,
    pub comments: String,
    pub url: String,
}

/// Validated pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub base_url: String,
    pub endpoints: EndpointTemplates,
    /// Comments requested per track
    pub comment_limit: u32,
    /// Comment requests in flight at once (1 = strictly sequential)
    pub comment_concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        // Compiled defaults always validate
        Self::from_parts(&ApiConfig::default())
    }
}

impl PipelineConfig {
    /// Build from the `[api]` table, validating it
    pub fn from_api_config(api: &ApiConfig) -> IngestResult<Self> {
        if api.base_url.trim().is_empty() {
            return Err(Error::Config("api.base_url must not be empty".to_string()).into());
        }
        if api.comment_concurrency == 0 {
            return Err(
                Error::Config("api.comment_concurrency must be at least 1".to_string()).into(),
            );
        }
        for (key, template) in [
            ("api.collection_endpoint", &api.collection_endpoint),
            ("api.detail_endpoint", &api.detail_endpoint),
            ("api.comment_endpoint", &api.comment_endpoint),
            ("api.url_endpoint", &api.url_endpoint),
        ] {
            if !template.contains("{ids}") {
                return Err(Error::Config(format!("{key} must contain '{{ids}}'")).into());
            }
        }

        Ok(Self::from_parts(api))
    }

    /// Load the shared config file and derive the pipeline configuration
    pub fn load(path: Option<&Path>) -> IngestResult<(Self, TomlConfig)> {
        let toml_config = load_config(path)?;
        let config = Self::from_api_config(&toml_config.api)?;
        info!(
            base_url = %config.base_url,
            comment_limit = config.comment_limit,
            comment_concurrency = config.comment_concurrency,
            "Pipeline configuration resolved"
        );
        Ok((config, toml_config))
    }

    /// Point every endpoint at a different host, keeping the templates
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_comment_concurrency(mut self, concurrency: usize) -> Self {
        self.comment_concurrency = concurrency.max(1);
        self
    }

    /// Full request URL for an endpoint and an identifier (or comma-joined batch)
    pub fn url_for(&self, endpoint: Endpoint, ids: &str) -> String {
        let template = match endpoint {
            Endpoint::Summary => &self.endpoints.summary,
            Endpoint::Detail => &self.endpoints.detail,
            Endpoint::Comments => &self.endpoints.comments,
            Endpoint::Url => &self.endpoints.url,
        };
        let path = template
            .trim_start_matches('/')
            .replace("{limit}", &self.comment_limit.to_string())
            .replace("{ids}", ids);
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn from_parts(api: &ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            endpoints: EndpointTemplates {
                summary: api.collection_endpoint.clone(),
                detail: api.detail_endpoint.clone(),
                comments: api.comment_endpoint.clone(),
                url: api.url_endpoint.clone(),
            },
            comment_limit: api.comment_limit,
            comment_concurrency: api.comment_concurrency,
        }
    }
}
