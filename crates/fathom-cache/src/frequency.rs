//! Per-fingerprint access counters driving L2 promotion and eviction.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use fathom_core::models::QueryFingerprint;

/// Monotonic access counter per query fingerprint.
///
/// Incremented at most once per cache access (hit, or miss followed by a
/// store), never decremented except by explicit reset. Increments are
/// atomic with respect to concurrent accesses of the same fingerprint.
#[derive(Debug, Default)]
pub struct FrequencyTracker {
    counts: DashMap<QueryFingerprint, AtomicU64>,
}

impl FrequencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one access and return the new count.
    pub fn record(&self, fingerprint: &QueryFingerprint) -> u64 {
        self.counts
            .entry(fingerprint.clone())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::SeqCst)
            + 1
    }

    /// Current count without recording an access.
    pub fn count(&self, fingerprint: &QueryFingerprint) -> u64 {
        self.counts
            .get(fingerprint)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Explicit reset, used on invalidation.
    pub fn reset(&self, fingerprint: &QueryFingerprint) {
        self.counts.remove(fingerprint);
    }

    /// The `n` most frequently accessed fingerprints, highest first.
    /// Ties are broken by fingerprint for a stable report.
    pub fn top_n(&self, n: usize) -> Vec<(QueryFingerprint, u64)> {
        let mut all: Vec<(QueryFingerprint, u64)> = self
            .counts
            .iter()
            .map(|kv| (kv.key().clone(), kv.value().load(Ordering::SeqCst)))
            .collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        all.truncate(n);
        all
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fathom_core::config::SearchMode;
    use fathom_core::models::Filters;

    fn fp(q: &str) -> QueryFingerprint {
        QueryFingerprint::compute(q, 10, &Filters::new(), SearchMode::Hybrid)
    }

    #[test]
    fn record_is_monotone() {
        let tracker = FrequencyTracker::new();
        let f = fp("q");
        assert_eq!(tracker.record(&f), 1);
        assert_eq!(tracker.record(&f), 2);
        assert_eq!(tracker.count(&f), 2);
    }

    #[test]
    fn reset_clears_count() {
        let tracker = FrequencyTracker::new();
        let f = fp("q");
        tracker.record(&f);
        tracker.reset(&f);
        assert_eq!(tracker.count(&f), 0);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        use std::sync::Arc;

        let tracker = Arc::new(FrequencyTracker::new());
        let f = fp("hot");
        let mut handles = Vec::new();
        for _ in 0..8 {
            let tracker = Arc::clone(&tracker);
            let f = f.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    tracker.record(&f);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(tracker.count(&f), 800);
    }

    #[test]
    fn top_n_orders_by_frequency() {
        let tracker = FrequencyTracker::new();
        let hot = fp("hot");
        let warm = fp("warm");
        let cold = fp("cold");
        for _ in 0..5 {
            tracker.record(&hot);
        }
        for _ in 0..3 {
            tracker.record(&warm);
        }
        tracker.record(&cold);

        let top = tracker.top_n(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0], (hot, 5));
        assert_eq!(top[1], (warm, 3));
    }
}
