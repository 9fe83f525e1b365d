/// Cache subsystem errors. Recovered locally: the pipeline runs as if the
/// cache were empty, and writes are attempted best-effort.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("distributed store unreachable: {reason}")]
    BackendUnreachable { reason: String },

    #[error("failed to serialize cached value: {reason}")]
    Serialization { reason: String },
}
