//! Configuration for the Agora engine.
//!
//! Every field has a compiled default (see [`defaults`]), so partial TOML
//! documents are accepted. Environment variables (`AGORA_*`) override file
//! values when [`AgoraConfig::apply_env_overrides`] is called.

pub mod analytics_config;
pub mod defaults;
pub mod graph_config;
pub mod observability_config;
pub mod storage_config;

pub use analytics_config::{AnalyticsConfig, ContributorTieBreak, WordWeights};
pub use graph_config::{ClosureStrategy, GraphConfig};
pub use observability_config::ObservabilityConfig;
pub use storage_config::{StorageConfig, MEMORY_DB_PATH};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{AgoraError, AgoraResult};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Top-level configuration aggregating all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgoraConfig {
    pub storage: StorageConfig,
    pub graph: GraphConfig,
    pub analytics: AnalyticsConfig,
    pub observability: ObservabilityConfig,
}

impl AgoraConfig {
    /// Parse a (possibly partial) TOML document and validate it.
    pub fn from_toml(toml_str: &str) -> AgoraResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| AgoraError::ConfigError(format!("<string>: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, then apply `AGORA_*` environment overrides.
    pub fn load(path: &Path) -> AgoraResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AgoraError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|e| {
            AgoraError::ConfigError(format!("{}: {e}", path.display()))
        })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `AGORA_*` environment variables. Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("AGORA_DB_PATH") {
            self.storage.db_path = val;
        }
        if let Ok(val) = std::env::var("AGORA_READ_POOL_SIZE") {
            if let Ok(v) = val.parse::<usize>() {
                self.storage.read_pool_size = v;
            }
        }
        if let Ok(val) = std::env::var("AGORA_CLOSURE_STRATEGY") {
            if let Some(strategy) = ClosureStrategy::from_str_name(&val) {
                self.graph.closure_strategy = strategy;
            }
        }
        if let Ok(val) = std::env::var("AGORA_LOG_LEVEL") {
            self.observability.log_level = val;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> AgoraResult<()> {
        if self.storage.read_pool_size == 0 {
            return Err(AgoraError::ConfigError(
                "storage.read_pool_size: must be greater than 0".to_string(),
            ));
        }
        let w = &self.analytics.word_weights;
        for (field, value) in [
            ("short_title", w.short_title),
            ("long_title", w.long_title),
            ("definition", w.definition),
            ("post_subject", w.post_subject),
            ("post_body", w.post_body),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AgoraError::ConfigError(format!(
                    "analytics.word_weights.{field}: must be a non-negative number"
                )));
            }
        }
        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(AgoraError::ConfigError(format!(
                "observability.log_level: unknown level '{}'",
                self.observability.log_level
            )));
        }
        Ok(())
    }
}
