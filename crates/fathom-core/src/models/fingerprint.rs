//! Cache addressing: a stable fingerprint over a normalized query and its
//! search parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SearchMode;

/// Metadata filters applied to a search. `BTreeMap` keeps key order
/// canonical for fingerprinting.
pub type Filters = BTreeMap<String, serde_json::Value>;

/// Stable hash of `{normalized query, top_k, filters, mode}`.
///
/// Two fingerprints are equal iff all four inputs are equal after
/// normalization (query text trimmed and lowercased, filter keys sorted).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryFingerprint(String);

impl QueryFingerprint {
    /// Compute the fingerprint for a search request.
    pub fn compute(query: &str, top_k: usize, filters: &Filters, mode: SearchMode) -> Self {
        let normalized = query.trim().to_lowercase();

        let mut hasher = blake3::Hasher::new();
        hasher.update(normalized.as_bytes());
        hasher.update(&top_k.to_le_bytes());
        // BTreeMap iterates in sorted key order, so the byte stream is
        // canonical regardless of insertion order.
        for (key, value) in filters {
            hasher.update(key.as_bytes());
            hasher.update(&[0]);
            hasher.update(value.to_string().as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(mode.as_str().as_bytes());

        Self(hasher.finalize().to_hex().to_string())
    }

    /// Fingerprint for a raw text, used by the embedding sub-cache.
    pub fn for_text(text: &str) -> Self {
        Self(blake3::hash(text.as_bytes()).to_hex().to_string())
    }

    /// Rehydrate a fingerprint from its rendered form, e.g. a ranked-set
    /// member read back from a distributed store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(pairs: &[(&str, &str)]) -> Filters {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn casing_and_whitespace_normalize() {
        let a = QueryFingerprint::compute("Machine Learning", 10, &Filters::new(), SearchMode::Hybrid);
        let b = QueryFingerprint::compute(" machine learning ", 10, &Filters::new(), SearchMode::Hybrid);
        assert_eq!(a, b);
    }

    #[test]
    fn filter_order_is_canonical() {
        let a = QueryFingerprint::compute(
            "q",
            5,
            &filters(&[("lang", "en"), ("source", "wiki")]),
            SearchMode::Hybrid,
        );
        let b = QueryFingerprint::compute(
            "q",
            5,
            &filters(&[("source", "wiki"), ("lang", "en")]),
            SearchMode::Hybrid,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn any_input_change_changes_fingerprint() {
        let base = QueryFingerprint::compute("q", 5, &Filters::new(), SearchMode::Hybrid);
        assert_ne!(
            base,
            QueryFingerprint::compute("q2", 5, &Filters::new(), SearchMode::Hybrid)
        );
        assert_ne!(
            base,
            QueryFingerprint::compute("q", 6, &Filters::new(), SearchMode::Hybrid)
        );
        assert_ne!(
            base,
            QueryFingerprint::compute("q", 5, &filters(&[("a", "b")]), SearchMode::Hybrid)
        );
        assert_ne!(
            base,
            QueryFingerprint::compute("q", 5, &Filters::new(), SearchMode::VectorOnly)
        );
    }

    #[test]
    fn rendered_fingerprint_rehydrates() {
        let original = QueryFingerprint::compute("q", 5, &Filters::new(), SearchMode::Hybrid);
        let rehydrated = QueryFingerprint::from_raw(original.as_str());
        assert_eq!(original, rehydrated);
    }

    #[test]
    fn text_fingerprint_is_deterministic() {
        assert_eq!(
            QueryFingerprint::for_text("hello"),
            QueryFingerprint::for_text("hello")
        );
        assert_ne!(
            QueryFingerprint::for_text("hello"),
            QueryFingerprint::for_text("hello "),
        );
    }
}
