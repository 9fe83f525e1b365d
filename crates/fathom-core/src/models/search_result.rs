use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Which stage of the pipeline produced a result's current score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSignal {
    /// Approximate-nearest-neighbor similarity hit.
    Vector,
    /// Lexical (BM25-style) hit.
    Keyword,
    /// Score assigned by rank fusion.
    Fused,
    /// Score assigned by the reranking stage.
    Reranked,
}

/// A single retrieved passage.
///
/// Identity is `id`, stable across signals for the same underlying chunk.
/// Immutable within a pipeline run: stages produce new results rather than
/// mutating inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub text: String,
    pub score: f64,
    pub signal: SourceSignal,
    /// Dense embedding of `text`, when the backend supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchResult {
    /// Build a result carrying only id and score, as retrieval backends
    /// commonly return for pure rank data.
    pub fn scored(id: impl Into<String>, score: f64, signal: SourceSignal) -> Self {
        Self {
            id: id.into(),
            text: String::new(),
            score,
            signal,
            embedding: None,
            metadata: HashMap::new(),
        }
    }

    /// Copy of this result with a new score and signal.
    pub fn rescored(&self, score: f64, signal: SourceSignal) -> Self {
        Self {
            score,
            signal,
            ..self.clone()
        }
    }
}

/// An ordered sequence of results, descending by score, length ≤ requested
/// top-k. Ties are broken deterministically by the producing stage.
pub type RankedList = Vec<SearchResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rescored_preserves_identity() {
        let r = SearchResult::scored("doc-1", 0.4, SourceSignal::Vector);
        let re = r.rescored(0.9, SourceSignal::Reranked);
        assert_eq!(re.id, "doc-1");
        assert_eq!(re.score, 0.9);
        assert_eq!(re.signal, SourceSignal::Reranked);
        // Original untouched.
        assert_eq!(r.score, 0.4);
    }
}
