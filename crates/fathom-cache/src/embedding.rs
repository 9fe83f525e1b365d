//! Permanent embedding sub-cache.
//!
//! Embeddings never change for identical text, so entries carry no TTL and
//! are never touched by the L1/L2 result policy. Keys are blake3 hashes of
//! the raw text.

use fathom_core::models::QueryFingerprint;
use moka::sync::Cache;

/// Embedding cache keyed by text content hash.
pub struct EmbeddingCache {
    cache: Cache<String, Vec<f32>>,
}

impl EmbeddingCache {
    /// Create a cache with the given max entry count. Capacity is the only
    /// bound; there is no expiry.
    pub fn new(max_entries: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(max_entries).build(),
        }
    }

    /// Look up the embedding for a text.
    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.cache.get(QueryFingerprint::for_text(text).as_str())
    }

    /// Store the embedding for a text.
    pub fn insert(&self, text: &str, embedding: Vec<f32>) {
        self.cache
            .insert(QueryFingerprint::for_text(text).to_string(), embedding);
    }

    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
