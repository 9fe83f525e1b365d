use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Reranking strategy for the fused candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RerankMethod {
    /// Cross-encoder-style relevance scoring of every (query, text) pair.
    PairwiseScore,
    /// Maximal Marginal Relevance diversity selection.
    Diversity,
    /// Pairwise scoring over 2·top_k candidates, then MMR over that set.
    #[default]
    Hybrid,
    /// Keep the fused ordering. Universal fallback.
    Identity,
}

/// Reranking stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RerankConfig {
    pub method: RerankMethod,
    /// MMR relevance/diversity trade-off. 1.0 is pure relevance.
    pub mmr_lambda: f64,
    /// Budget for the batched pairwise-scoring call.
    pub scorer_timeout_ms: u64,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            method: RerankMethod::default(),
            mmr_lambda: defaults::DEFAULT_MMR_LAMBDA,
            scorer_timeout_ms: defaults::DEFAULT_SCORER_TIMEOUT_MS,
        }
    }
}

impl RerankConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mmr_lambda) {
            return Err(ConfigError::InvalidValue {
                field: "mmr_lambda",
                reason: format!("{} outside [0.0, 1.0]", self.mmr_lambda),
            });
        }
        Ok(())
    }
}
