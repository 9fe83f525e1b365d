//! Read-only cache observability.

use std::sync::atomic::{AtomicU64, Ordering};

/// Hit/miss counters shared across the tiers.
#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatsCounters {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

/// Point-in-time cache statistics. Side-effect free to produce.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate_percent: f64,
    pub l1_entries: usize,
    pub l2_entries: usize,
    pub embedding_entries: u64,
}

impl CacheStats {
    pub(crate) fn new(
        hits: u64,
        misses: u64,
        l1_entries: usize,
        l2_entries: usize,
        embedding_entries: u64,
    ) -> Self {
        let total = hits + misses;
        let hit_rate_percent = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64 * 100.0
        };
        Self {
            hits,
            misses,
            hit_rate_percent,
            l1_entries,
            l2_entries,
            embedding_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_with_no_traffic_is_zero() {
        let stats = CacheStats::new(0, 0, 0, 0, 0);
        assert_eq!(stats.hit_rate_percent, 0.0);
    }

    #[test]
    fn hit_rate_percent() {
        let stats = CacheStats::new(3, 1, 2, 1, 0);
        assert_eq!(stats.hit_rate_percent, 75.0);
    }
}
