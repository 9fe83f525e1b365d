use async_trait::async_trait;

use crate::errors::FathomResult;

/// Cross-encoder-style pairwise relevance scorer.
#[async_trait]
pub trait IPairwiseScorer: Send + Sync {
    /// Score each (query, text) pair. Results must be returned in input
    /// order, one score per pair.
    async fn score_batch(&self, pairs: &[(String, String)]) -> FathomResult<Vec<f64>>;

    /// Human-readable scorer name.
    fn name(&self) -> &str;
}
