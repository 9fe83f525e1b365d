//! # fathom-cache
//!
//! Hierarchical result cache sitting in front of the retrieval pipeline.
//!
//! Two tiers for ranked results: L1 is fast and TTL-bound, L2 is durable
//! and capacity-bound with lowest-frequency-first eviction. Promotion from
//! L1 to L2 is driven by a per-fingerprint access counter. Embeddings live
//! in a separate permanent namespace keyed by text hash, untouched by the
//! tier policy. An optional distributed store can mirror the L2 tier;
//! store failures are swallowed and the cache degrades to in-process only.

mod embedding;
mod entry;
mod frequency;
mod hierarchical;
mod l1;
mod l2;
mod stats;
mod store;

pub use embedding::EmbeddingCache;
pub use entry::CacheEntry;
pub use frequency::FrequencyTracker;
pub use hierarchical::{CacheLookup, HierarchicalCache};
pub use l1::L1ResultCache;
pub use l2::L2ResultCache;
pub use stats::CacheStats;
pub use store::InMemoryStore;
