/// Reranking subsystem errors. Always recovered locally by falling back
/// to identity ordering.
#[derive(Debug, thiserror::Error)]
pub enum RerankError {
    #[error("pairwise scorer unavailable: {reason}")]
    ScorerUnavailable { reason: String },

    #[error("pairwise scorer timed out after {timeout_ms}ms")]
    ScorerTimeout { timeout_ms: u64 },

    #[error("scorer returned {got} scores for {expected} pairs")]
    ScoreCountMismatch { expected: usize, got: usize },
}
