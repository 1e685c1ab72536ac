//! # tunecrawl common library
//!
//! Shared code for the tunecrawl crates:
//! - Common error type
//! - TOML configuration loading with environment overrides
//! - Tracing initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
