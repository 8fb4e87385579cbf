//! Configuration management for the pattern graph engine.

mod sub_configs;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};

pub use sub_configs::{LayoutConfig, LoggingConfig, TraceConfig};

/// Environment variable selecting the environment-specific config file.
pub const ENV_SELECTOR: &str = "PATTERN_GRAPH_ENV";

/// Prefix for environment variable overrides, e.g. `PATTERN_GRAPH__TRACE__TIMEOUT_MS`.
pub const ENV_PREFIX: &str = "PATTERN_GRAPH";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GraphConfig {
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GraphConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in order:
    /// 1. config/default.toml (base settings)
    /// 2. config/{PATTERN_GRAPH_ENV}.toml (environment-specific)
    /// 3. Environment variables with PATTERN_GRAPH prefix
    pub fn load() -> GraphResult<Self> {
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".to_string());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let config: GraphConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults for tests and embedding callers.
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Load configuration from a single TOML file.
    pub fn from_file(path: &Path) -> GraphResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GraphError::InvalidConfig(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: GraphConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section. Fails on the first violation.
    pub fn validate(&self) -> GraphResult<()> {
        self.trace.validate()?;
        self.layout.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    pub fn trace_timeout(&self) -> Duration {
        Duration::from_millis(self.trace.timeout_ms)
    }
}
