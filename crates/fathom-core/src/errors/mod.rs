//! Error taxonomy for the retrieval layer.
//!
//! Only `Config` and `Retrieval::NoResultsAvailable` ever reach a caller;
//! every other variant is caught at the component boundary that produced
//! it and converted into a degraded-but-successful result.

mod cache_error;
mod config_error;
mod expansion_error;
mod rerank_error;
mod retrieval_error;

use thiserror::Error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use expansion_error::ExpansionError;
pub use rerank_error::RerankError;
pub use retrieval_error::RetrievalError;

/// Aggregate error for the fathom workspace.
#[derive(Debug, Error)]
pub enum FathomError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Rerank(#[from] RerankError),

    #[error(transparent)]
    Expansion(#[from] ExpansionError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub type FathomResult<T> = Result<T, FathomError>;
