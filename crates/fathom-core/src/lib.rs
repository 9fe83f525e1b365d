//! # fathom-core
//!
//! Foundation crate for the fathom retrieval layer.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{
    CacheConfig, ExpansionConfig, ExpansionStrategy, FusionConfig, FusionMethod, PipelineConfig,
    RerankConfig, RerankMethod, SearchMode,
};
pub use errors::{FathomError, FathomResult};
pub use models::{
    DegradationEvent, Filters, QueryFingerprint, RankedList, SearchResult, SourceSignal,
};
