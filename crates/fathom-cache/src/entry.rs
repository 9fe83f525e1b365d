use std::time::{Duration, Instant};

use fathom_core::models::RankedList;

/// A cached ranked result list with its bookkeeping.
///
/// Created on a cache-miss write, mutated (hit count, last access) on every
/// read, destroyed on TTL expiry, explicit invalidation, or eviction.
/// `hit_count` never decreases.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: RankedList,
    created_at: Instant,
    /// `None` means the entry never expires (L2 discipline).
    ttl: Option<Duration>,
    hit_count: u64,
    last_accessed: Instant,
}

impl CacheEntry {
    pub fn new(value: RankedList, ttl: Option<Duration>) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            ttl,
            hit_count: 0,
            last_accessed: now,
        }
    }

    /// `true` iff the entry's TTL has elapsed.
    pub fn is_expired(&self) -> bool {
        match self.ttl {
            Some(ttl) => self.created_at.elapsed() > ttl,
            None => false,
        }
    }

    /// Record a read and return a deep copy of the value. The copy keeps
    /// callers from mutating cached state.
    pub fn touch(&mut self) -> RankedList {
        self.hit_count += 1;
        self.last_accessed = Instant::now();
        self.value.clone()
    }

    pub fn value(&self) -> &RankedList {
        &self.value
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }
}
