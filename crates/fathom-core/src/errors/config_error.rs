/// Configuration and caller-contract violations. Fatal at call time.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid source weights: vector {vector}, keyword {keyword} (must be non-negative and sum > 0)")]
    InvalidWeights { vector: f64, keyword: f64 },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("top_k must be >= 1, got {got}")]
    InvalidTopK { got: usize },

    #[error("failed to parse configuration: {reason}")]
    Parse { reason: String },
}
