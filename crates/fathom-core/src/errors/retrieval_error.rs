/// Retrieval subsystem errors.
///
/// Backend failures are recovered locally by degrading to the surviving
/// source; `NoResultsAvailable` is the only variant surfaced to callers,
/// and only when every retrieval signal failed.
///
/// `Display` and `Error` are implemented by hand because the `source`
/// field is a backend label, not an underlying error, and
/// `derive(thiserror::Error)` would otherwise treat it as the error
/// source.
#[derive(Debug)]
pub enum RetrievalError {
    NoResultsAvailable,

    BackendFailed { source: &'static str, reason: String },

    BackendTimeout { source: &'static str, timeout_ms: u64 },
}

impl std::fmt::Display for RetrievalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetrievalError::NoResultsAvailable => {
                write!(f, "no retrieval signal produced any candidate")
            }
            RetrievalError::BackendFailed { source, reason } => {
                write!(f, "{source} backend failed: {reason}")
            }
            RetrievalError::BackendTimeout { source, timeout_ms } => {
                write!(f, "{source} backend timed out after {timeout_ms}ms")
            }
        }
    }
}

impl std::error::Error for RetrievalError {}
