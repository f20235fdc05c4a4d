//! # Configuration
//!
//! Settings for the instance caches and the channel transport, layered from an
//! optional file and `WLSDK__`-prefixed environment variables
//! (`WLSDK__CACHE__MAX_CAPACITY=500` maps to `cache.max_capacity`).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Top-level SDK configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    pub cache: CacheConfig,
    pub transport: TransportConfig,
}

/// Eviction policy of every [`InstanceCache`](crate::InstanceCache).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached instances per model.
    pub max_capacity: u64,
    /// Evict instances not touched for this many seconds. `None` keeps them until
    /// capacity pressure or explicit eviction.
    pub time_to_idle_secs: Option<u64>,
}

impl CacheConfig {
    pub fn time_to_idle(&self) -> Option<Duration> {
        self.time_to_idle_secs.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_000,
            time_to_idle_secs: Some(600),
        }
    }
}

/// Settings of the channel-backed transport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Requests that can queue before senders wait.
    pub buffer_size: usize,
    /// How long shutdown waits for a server task before aborting it.
    pub shutdown_timeout_ms: u64,
}

impl TransportConfig {
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            shutdown_timeout_ms: 5_000,
        }
    }
}

/// Loads [`BindingConfig`] from `path` (if given) with environment overrides on top.
///
/// Missing keys fall back to their defaults. A given `path` must exist.
pub fn load_config(path: Option<impl AsRef<Path>>) -> Result<BindingConfig, ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        let path = path.as_ref();
        info!("Loading config from {}", path.display());
        builder = builder.add_source(config::File::from(path).required(true));
    }
    builder = builder.add_source(
        config::Environment::with_prefix("WLSDK")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    Ok(builder.build()?.try_deserialize::<BindingConfig>()?)
}
