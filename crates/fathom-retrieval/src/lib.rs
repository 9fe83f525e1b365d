//! # fathom-retrieval
//!
//! The retrieval pipeline: query expansion → concurrent vector/keyword
//! branches → rank fusion → reranking, fronted by the hierarchical cache.
//!
//! Every external capability failure is recovered at the component that
//! called it; a request only fails on invalid input or when no retrieval
//! signal produced any candidate.

pub mod engine;
pub mod expansion;
pub mod fusion;
pub mod rerank;

pub use engine::{SearchPipeline, SearchRequest, SearchResponse};
pub use expansion::QueryExpander;
pub use fusion::FusionEngine;
pub use rerank::RerankingEngine;
