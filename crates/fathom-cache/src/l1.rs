//! L1: fast in-memory tier with per-entry TTL.

use std::time::Duration;

use dashmap::DashMap;
use fathom_core::models::{QueryFingerprint, RankedList};

use crate::entry::CacheEntry;

/// TTL-bound result tier. Expired entries are dropped lazily on read.
#[derive(Debug, Default)]
pub struct L1ResultCache {
    entries: DashMap<QueryFingerprint, CacheEntry>,
}

impl L1ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a ranked list. An expired entry is removed and reported as
    /// a miss; a live entry has its hit bookkeeping updated.
    pub fn get(&self, fingerprint: &QueryFingerprint) -> Option<RankedList> {
        let mut entry = self.entries.get_mut(fingerprint)?;
        if entry.is_expired() {
            drop(entry);
            self.entries.remove(fingerprint);
            return None;
        }
        Some(entry.touch())
    }

    /// Store a ranked list under the fingerprint, replacing any previous
    /// entry and restarting its TTL.
    pub fn insert(&self, fingerprint: QueryFingerprint, value: RankedList, ttl: Duration) {
        self.entries
            .insert(fingerprint, CacheEntry::new(value, Some(ttl)));
    }

    pub fn remove(&self, fingerprint: &QueryFingerprint) {
        self.entries.remove(fingerprint);
    }

    /// Remove every entry whose result list contains `document_id`.
    pub fn remove_containing(&self, document_id: &str) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.value().iter().any(|r| r.id == document_id));
        before - self.entries.len()
    }

    /// Drop all expired entries.
    pub fn purge_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_core::config::SearchMode;
    use fathom_core::models::{Filters, SearchResult, SourceSignal};

    fn fp(q: &str) -> QueryFingerprint {
        QueryFingerprint::compute(q, 10, &Filters::new(), SearchMode::Hybrid)
    }

    fn list(id: &str) -> RankedList {
        vec![SearchResult::scored(id, 1.0, SourceSignal::Fused)]
    }

    #[test]
    fn insert_and_get() {
        let cache = L1ResultCache::new();
        let f = fp("q");
        cache.insert(f.clone(), list("doc"), Duration::from_secs(300));
        let got = cache.get(&f).unwrap();
        assert_eq!(got[0].id, "doc");
    }

    #[test]
    fn expired_entry_is_a_miss_and_removed() {
        let cache = L1ResultCache::new();
        let f = fp("q");
        cache.insert(f.clone(), list("doc"), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(&f).is_none());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn remove_containing_document() {
        let cache = L1ResultCache::new();
        cache.insert(fp("a"), list("doc-1"), Duration::from_secs(300));
        cache.insert(fp("b"), list("doc-2"), Duration::from_secs(300));
        let removed = cache.remove_containing("doc-1");
        assert_eq!(removed, 1);
        assert!(cache.get(&fp("a")).is_none());
        assert!(cache.get(&fp("b")).is_some());
    }

    #[test]
    fn reinsert_restarts_ttl() {
        let cache = L1ResultCache::new();
        let f = fp("q");
        cache.insert(f.clone(), list("old"), Duration::ZERO);
        cache.insert(f.clone(), list("new"), Duration::from_secs(300));
        assert_eq!(cache.get(&f).unwrap()[0].id, "new");
    }
}
