use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// How two ranked candidate lists are merged into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FusionMethod {
    /// Reciprocal Rank Fusion: rank-only, robust to incomparable score
    /// scales between sources.
    #[default]
    Rrf,
    /// Max-normalized weighted score sum: use when absolute scores should
    /// influence the result beyond pure ordering.
    WeightedScore,
}

/// Fusion stage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FusionConfig {
    pub method: FusionMethod,
    /// RRF smoothing constant. Higher k reduces the influence of
    /// high-ranking items from any single list.
    pub rrf_constant_k: u32,
    /// Relative weight of the vector-similarity source.
    pub vector_weight: f64,
    /// Relative weight of the keyword source.
    pub keyword_weight: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            method: FusionMethod::default(),
            rrf_constant_k: defaults::DEFAULT_RRF_CONSTANT_K,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
        }
    }
}

impl FusionConfig {
    /// Weights must sum to a positive value; they are normalized to 1.0
    /// at fusion time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.vector_weight + self.keyword_weight;
        if !(sum > 0.0) || self.vector_weight < 0.0 || self.keyword_weight < 0.0 {
            return Err(ConfigError::InvalidWeights {
                vector: self.vector_weight,
                keyword: self.keyword_weight,
            });
        }
        if self.rrf_constant_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "rrf_constant_k",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    /// Source weights normalized to sum to 1.0.
    pub fn normalized_weights(&self) -> (f64, f64) {
        let sum = self.vector_weight + self.keyword_weight;
        (self.vector_weight / sum, self.keyword_weight / sum)
    }
}
