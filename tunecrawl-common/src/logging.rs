//! Tracing initialisation

use crate::config::LoggingConfig;
use crate::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `config.level`. Returns `Ok(false)` when a
/// global subscriber was already installed (e.g. by an earlier test).
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            Error::Config(format!("Invalid log level '{}': {}", config.level, e))
        })?,
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .is_ok();

    Ok(installed)
}
