//! Test Helper Utilities
//!
//! Shared utilities for testing tunecrawl-ingest

#![allow(dead_code)]

pub mod fixture_fetcher;
pub mod fixtures;
pub mod log_capture;

pub use fixture_fetcher::{Fixture, FixtureFetcher};
pub use log_capture::{capture_logs, LogCapture};
