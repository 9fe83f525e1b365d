//! L2: durable tier, capacity-bound, frequency-biased eviction.

use dashmap::DashMap;
use fathom_core::models::{QueryFingerprint, RankedList};
use tracing::debug;

use crate::entry::CacheEntry;
use crate::frequency::FrequencyTracker;

/// Promoted result tier. Entries carry the usual bookkeeping but no TTL;
/// they persist until evicted or invalidated. When the capacity bound is
/// exceeded, the lowest-frequency entries go first — popularity protects
/// an entry from a single burst of unrelated traffic, unlike plain LRU.
#[derive(Debug, Default)]
pub struct L2ResultCache {
    entries: DashMap<QueryFingerprint, CacheEntry>,
    max_entries: usize,
}

impl L2ResultCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries,
        }
    }

    /// Values are cloned out, so eviction can never pull an entry out from
    /// under a reader. Reads update the entry's hit bookkeeping.
    pub fn get(&self, fingerprint: &QueryFingerprint) -> Option<RankedList> {
        let mut entry = self.entries.get_mut(fingerprint)?;
        Some(entry.touch())
    }

    pub fn contains(&self, fingerprint: &QueryFingerprint) -> bool {
        self.entries.contains_key(fingerprint)
    }

    /// Insert a promoted entry, evicting the lowest-frequency entries if
    /// the capacity bound is exceeded.
    pub fn insert(
        &self,
        fingerprint: QueryFingerprint,
        value: RankedList,
        frequency: &FrequencyTracker,
    ) {
        self.entries.insert(fingerprint, CacheEntry::new(value, None));

        while self.entries.len() > self.max_entries {
            let coldest = self
                .entries
                .iter()
                .map(|kv| (kv.key().clone(), frequency.count(kv.key())))
                .min_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
            match coldest {
                Some((fp, count)) => {
                    debug!(fingerprint = %fp, frequency = count, "evicting coldest L2 entry");
                    self.entries.remove(&fp);
                }
                None => break,
            }
        }
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
