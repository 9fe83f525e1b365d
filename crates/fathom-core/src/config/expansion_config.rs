use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Query expansion strategy applied before retrieval.
///
/// Strictly optional: `None` must be a correctness no-op downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionStrategy {
    /// No expansion; retrieval runs on the original query alone.
    #[default]
    None,
    /// Hypothetical Document Embedding: generate a plausible answer and
    /// retrieve with it as an additional variant.
    Hyde,
    /// Paraphrase the query n ways.
    MultiQuery,
    /// Append related terms to the query text.
    Semantic,
}

/// Expansion stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExpansionConfig {
    pub strategy: ExpansionStrategy,
    /// Paraphrase count for `MultiQuery`.
    pub multi_query_variants: usize,
    /// Budget for each generation-provider call.
    pub generation_timeout_ms: u64,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            strategy: ExpansionStrategy::default(),
            multi_query_variants: defaults::DEFAULT_MULTI_QUERY_VARIANTS,
            generation_timeout_ms: defaults::DEFAULT_GENERATION_TIMEOUT_MS,
        }
    }
}

impl ExpansionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.strategy == ExpansionStrategy::MultiQuery && self.multi_query_variants == 0 {
            return Err(ConfigError::InvalidValue {
                field: "multi_query_variants",
                reason: "must be >= 1 when multi_query expansion is enabled".to_string(),
            });
        }
        Ok(())
    }
}
