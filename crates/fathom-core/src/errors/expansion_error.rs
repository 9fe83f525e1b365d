/// Query expansion errors. Always recovered locally: expansion collapses
/// to the original query.
#[derive(Debug, thiserror::Error)]
pub enum ExpansionError {
    #[error("generation provider unavailable: {reason}")]
    GenerationUnavailable { reason: String },

    #[error("generation provider timed out after {timeout_ms}ms")]
    GenerationTimeout { timeout_ms: u64 },

    #[error("could not parse variants from generation output")]
    UnparseableResponse,
}
