//! Explicit configuration structs for every pipeline knob.
//!
//! Each subsystem has its own struct with serde defaults; unknown keys are
//! rejected. `PipelineConfig` aggregates them and validates the whole
//! surface in one call.

mod cache_config;
pub mod defaults;
mod expansion_config;
mod fusion_config;
mod rerank_config;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use cache_config::CacheConfig;
pub use expansion_config::{ExpansionConfig, ExpansionStrategy};
pub use fusion_config::{FusionConfig, FusionMethod};
pub use rerank_config::{RerankConfig, RerankMethod};

/// Which retrieval signals a search request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    VectorOnly,
    KeywordOnly,
    #[default]
    Hybrid,
}

impl SearchMode {
    /// Whether the vector-similarity branch runs under this mode.
    pub fn uses_vector(&self) -> bool {
        matches!(self, SearchMode::VectorOnly | SearchMode::Hybrid)
    }

    /// Whether the keyword branch runs under this mode.
    pub fn uses_keyword(&self) -> bool {
        matches!(self, SearchMode::KeywordOnly | SearchMode::Hybrid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::VectorOnly => "vector_only",
            SearchMode::KeywordOnly => "keyword_only",
            SearchMode::Hybrid => "hybrid",
        }
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub fusion: FusionConfig,
    pub rerank: RerankConfig,
    pub expansion: ExpansionConfig,
    pub cache: CacheConfig,
    /// Independent timeout for each retrieval branch (milliseconds).
    pub per_branch_timeout_ms: u64,
}

impl PipelineConfig {
    /// Parse from TOML, rejecting unknown keys.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every subsystem's settings. Configuration errors are the
    /// only error class that aborts a request outright.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fusion.validate()?;
        self.rerank.validate()?;
        self.expansion.validate()?;
        self.cache.validate()?;
        if self.per_branch_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "per_branch_timeout_ms",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fusion: FusionConfig::default(),
            rerank: RerankConfig::default(),
            expansion: ExpansionConfig::default(),
            cache: CacheConfig::default(),
            per_branch_timeout_ms: defaults::DEFAULT_PER_BRANCH_TIMEOUT_MS,
        }
    }
}
