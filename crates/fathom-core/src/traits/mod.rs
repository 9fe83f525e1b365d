//! Capability traits consumed by the pipeline.
//!
//! Every concrete backend (encoder, indexes, cross-encoder, LLM, store)
//! sits behind one of these object-safe traits and may be substituted.
//! The pipeline must tolerate any of them failing or stalling.

mod embedding;
mod generation;
mod index;
mod scorer;
mod store;

pub use embedding::IEmbeddingProvider;
pub use generation::IGenerationProvider;
pub use index::{IKeywordIndex, IVectorIndex};
pub use scorer::IPairwiseScorer;
pub use store::IDistributedStore;
