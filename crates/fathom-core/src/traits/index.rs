use async_trait::async_trait;

use crate::errors::FathomResult;
use crate::models::{Filters, SearchResult};

/// Approximate-nearest-neighbor index over passage embeddings.
///
/// Scores are similarities (higher is better) and are not comparable in
/// scale to keyword scores.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    /// Return up to `top_k` results for the query vector, sorted
    /// descending by similarity, with `SourceSignal::Vector`.
    async fn search(
        &self,
        query_vector: &[f32],
        top_k: usize,
        filters: &Filters,
    ) -> FathomResult<Vec<SearchResult>>;
}

/// Lexical (BM25-style) index over passage texts.
#[async_trait]
pub trait IKeywordIndex: Send + Sync {
    /// Return up to `top_k` results for the query text, sorted descending
    /// by lexical relevance, with `SourceSignal::Keyword`.
    async fn search(&self, query_text: &str, top_k: usize) -> FathomResult<Vec<SearchResult>>;
}
