//! In-memory JsonFetcher serving canned responses
//!
//! Records every call and tracks how many requests were in flight at once.

use super::fixtures;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tunecrawl_ingest::{Endpoint, FetchError, JsonFetcher};

/// Canned outcome of one request
#[derive(Debug, Clone)]
pub enum Fixture {
    Json(Value),
    Status(u16),
    Network,
}

#[derive(Default)]
pub struct FixtureFetcher {
    routes: HashMap<(Endpoint, String), Fixture>,
    defaults: HashMap<Endpoint, Fixture>,
    delay: Option<Duration>,
    calls: Mutex<Vec<(Endpoint, String)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full happy-path scenario for collection 9270
    pub fn scenario() -> Self {
        let detail = fixtures::detail_json(&fixtures::TRACK_IDS);
        let urls = fixtures::urls_json(&fixtures::TRACK_IDS);
        let mut fetcher = Self::new()
            .with(
                Endpoint::Summary,
                fixtures::ARTIST_ID,
                Fixture::Json(fixtures::summary_json()),
            )
            .with_default(Endpoint::Detail, Fixture::Json(detail))
            .with_default(Endpoint::Url, Fixture::Json(urls));
        for id in fixtures::TRACK_IDS {
            fetcher = fetcher.with(
                Endpoint::Comments,
                id,
                Fixture::Json(fixtures::comments_json(id)),
            );
        }
        fetcher
    }

    /// Respond to an exact (endpoint, ids) pair
    pub fn with(mut self, endpoint: Endpoint, ids: &str, fixture: Fixture) -> Self {
        self.routes.insert((endpoint, ids.to_string()), fixture);
        self
    }

    /// Respond to any ids of `endpoint` without an exact route
    pub fn with_default(mut self, endpoint: Endpoint, fixture: Fixture) -> Self {
        self.defaults.insert(endpoint, fixture);
        self
    }

    /// Delay every response (lets concurrent requests overlap)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<(Endpoint, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, endpoint: Endpoint) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(e, _)| *e == endpoint)
            .map(|(_, ids)| ids)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn url(endpoint: Endpoint, ids: &str) -> String {
        format!("fixture://{endpoint}/{ids}")
    }
}

#[async_trait]
impl JsonFetcher for FixtureFetcher {
    async fn fetch(&self, endpoint: Endpoint, ids: &str) -> Result<Value, FetchError> {
        self.calls.lock().unwrap().push((endpoint, ids.to_string()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let fixture = self
            .routes
            .get(&(endpoint, ids.to_string()))
            .or_else(|| self.defaults.get(&endpoint))
            .cloned()
            .unwrap_or(Fixture::Status(404));

        let url = Self::url(endpoint, ids);
        match fixture {
            Fixture::Json(value) => Ok(value),
            Fixture::Status(status) => Err(FetchError::Status { url, status }),
            Fixture::Network => Err(FetchError::Network {
                url,
                message: "connection reset by peer".to_string(),
            }),
        }
    }
}
