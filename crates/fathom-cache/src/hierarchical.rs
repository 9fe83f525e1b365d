//! Two-tier orchestration: L1 → L2 → optional distributed mirror.
//!
//! Per-fingerprint lifecycle: `Absent → L1Only → L1AndL2`. The access that
//! pushes a fingerprint's frequency to the promotion threshold copies the
//! entry into L2 (no TTL). L1 entries still expire individually; an L2 hit
//! re-populates L1, so the pair degrades back to "L2 authoritative, L1
//! empty until the next read."

use std::sync::Arc;
use std::time::Duration;

use fathom_core::config::CacheConfig;
use fathom_core::models::{DegradationEvent, QueryFingerprint, RankedList};
use fathom_core::traits::IDistributedStore;
use tracing::{debug, warn};

use crate::embedding::EmbeddingCache;
use crate::frequency::FrequencyTracker;
use crate::l1::L1ResultCache;
use crate::l2::L2ResultCache;
use crate::stats::{CacheStats, StatsCounters};

/// Ranked-set name used for popular-query reporting on the mirror.
const POPULAR_QUERIES_SET: &str = "fathom:popular";

/// Outcome of a cache lookup or store: the value (if any) plus any
/// degradation the mirror produced while serving it.
#[derive(Debug, Default)]
pub struct CacheLookup {
    pub value: Option<RankedList>,
    pub degraded: Option<DegradationEvent>,
}

/// The hierarchical result cache. The only cross-request shared resource
/// in the pipeline; all tiers are safe under concurrent access.
pub struct HierarchicalCache {
    l1: L1ResultCache,
    l2: L2ResultCache,
    frequency: FrequencyTracker,
    embeddings: EmbeddingCache,
    stats: StatsCounters,
    config: CacheConfig,
    /// Optional external mirror for the L2 tier. Best-effort only.
    store: Option<Arc<dyn IDistributedStore>>,
}

impl HierarchicalCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            l1: L1ResultCache::new(),
            l2: L2ResultCache::new(config.l2_max_entries),
            frequency: FrequencyTracker::new(),
            embeddings: EmbeddingCache::new(config.embedding_cache_entries),
            stats: StatsCounters::default(),
            config,
            store: None,
        }
    }

    /// Attach a distributed store mirroring the L2 tier.
    pub fn with_store(mut self, store: Arc<dyn IDistributedStore>) -> Self {
        self.store = Some(store);
        self
    }

    fn l1_ttl(&self) -> Duration {
        Duration::from_secs(self.config.l1_ttl_seconds)
    }

    fn result_key(fingerprint: &QueryFingerprint) -> String {
        format!("fathom:result:{fingerprint}")
    }

    fn frequency_key(fingerprint: &QueryFingerprint) -> String {
        format!("fathom:freq:{fingerprint}")
    }

    /// Read path: L1, then L2, then the mirror. Hits count one frequency
    /// access and may trigger promotion; an L2 or mirror hit re-populates
    /// L1 opportunistically.
    pub async fn get(&self, fingerprint: &QueryFingerprint) -> CacheLookup {
        if let Some(value) = self.l1.get(fingerprint) {
            self.stats.record_hit();
            let count = self.frequency.record(fingerprint);
            if count >= self.config.l2_promotion_threshold && !self.l2.contains(fingerprint) {
                debug!(fingerprint = %fingerprint, count, "promoting to L2 on hit");
                self.l2
                    .insert(fingerprint.clone(), value.clone(), &self.frequency);
            }
            let degraded = self.mirror_access(fingerprint, &value, count).await;
            return CacheLookup {
                value: Some(value),
                degraded,
            };
        }

        if let Some(value) = self.l2.get(fingerprint) {
            self.stats.record_hit();
            let count = self.frequency.record(fingerprint);
            // Write-through back into the fast tier; no eviction accounting.
            self.l1
                .insert(fingerprint.clone(), value.clone(), self.l1_ttl());
            let degraded = self.mirror_access(fingerprint, &value, count).await;
            return CacheLookup {
                value: Some(value),
                degraded,
            };
        }

        if let Some(store) = &self.store {
            match store.get(&Self::result_key(fingerprint)).await {
                Ok(Some(json)) => match serde_json::from_str::<RankedList>(&json) {
                    Ok(value) => {
                        self.stats.record_hit();
                        let count = self.frequency.record(fingerprint);
                        self.l1
                            .insert(fingerprint.clone(), value.clone(), self.l1_ttl());
                        self.l2
                            .insert(fingerprint.clone(), value.clone(), &self.frequency);
                        let degraded = self.mirror_access(fingerprint, &value, count).await;
                        return CacheLookup {
                            value: Some(value),
                            degraded,
                        };
                    }
                    Err(e) => {
                        warn!(error = %e, "mirror returned undecodable entry, treating as miss");
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(error = %e, "distributed store unreachable on read, bypassing");
                    self.stats.record_miss();
                    return CacheLookup {
                        value: None,
                        degraded: Some(DegradationEvent::new(
                            "cache",
                            format!("store read failed: {e}"),
                            "in-process tiers only",
                        )),
                    };
                }
            }
        }

        self.stats.record_miss();
        CacheLookup::default()
    }

    /// Write path, called after a pipeline run completes on a miss. Counts
    /// the miss-then-store as the fingerprint's single access.
    pub async fn put(&self, fingerprint: &QueryFingerprint, value: &RankedList) -> CacheLookup {
        let count = self.frequency.record(fingerprint);
        // Deep copy on write: callers keep their list, the cache owns its own.
        self.l1
            .insert(fingerprint.clone(), value.clone(), self.l1_ttl());

        let mut degraded = None;
        if count >= self.config.l2_promotion_threshold {
            debug!(fingerprint = %fingerprint, count, "promoting to L2 on store");
            self.l2
                .insert(fingerprint.clone(), value.clone(), &self.frequency);
            degraded = self.mirror_write(fingerprint, value).await;
        }
        if degraded.is_none() {
            degraded = self.mirror_frequency(fingerprint).await;
        }
        CacheLookup { value: None, degraded }
    }

    /// Remove a fingerprint from both tiers and the mirror, and reset its
    /// frequency record.
    pub async fn invalidate(&self, fingerprint: &QueryFingerprint) {
        self.l1.remove(fingerprint);
        self.l2.remove(fingerprint);
        self.frequency.reset(fingerprint);
        if let Some(store) = &self.store {
            if let Err(e) = store.delete(&Self::result_key(fingerprint)).await {
                warn!(error = %e, "mirror delete failed, entry may linger remotely");
            }
            if let Err(e) = store.delete(&Self::frequency_key(fingerprint)).await {
                warn!(error = %e, "mirror frequency reset failed");
            }
        }
    }

    /// Maintenance hook: drop expired L1 entries eagerly instead of
    /// waiting for lazy expiry on read. Intended for a periodic task in
    /// the embedding host.
    pub fn purge_expired(&self) {
        self.l1.purge_expired();
    }

    /// Remove every cached result list containing the document, from both
    /// tiers. Used by ingestion collaborators when a document changes.
    pub fn invalidate_document(&self, document_id: &str) -> usize {
        let removed = self.l1.remove_containing(document_id) + self.l2.remove_containing(document_id);
        if removed > 0 {
            debug!(document_id, removed, "invalidated cached results for document");
        }
        removed
    }

    /// Embedding sub-cache read. Separate namespace; never evicted by the
    /// result-tier policy.
    pub fn embedding_get(&self, text: &str) -> Option<Vec<f32>> {
        self.embeddings.get(text)
    }

    /// Embedding sub-cache write.
    pub fn embedding_put(&self, text: &str, embedding: Vec<f32>) {
        self.embeddings.insert(text, embedding);
    }

    /// Point-in-time statistics. Read-only, side-effect free.
    pub fn stats(&self) -> CacheStats {
        CacheStats::new(
            self.stats.hits(),
            self.stats.misses(),
            self.l1.len(),
            self.l2.len(),
            self.embeddings.len(),
        )
    }

    /// The `n` most frequently accessed fingerprints. Prefers the mirror's
    /// ranked set, which aggregates accesses across processes; falls back
    /// to the local counters when no store is attached or the read fails.
    pub async fn popular_queries(&self, n: usize) -> Vec<(QueryFingerprint, u64)> {
        if let Some(store) = &self.store {
            match store.rank_top(POPULAR_QUERIES_SET, n).await {
                Ok(top) if !top.is_empty() => {
                    return top
                        .into_iter()
                        .map(|(member, score)| (QueryFingerprint::from_raw(member), score as u64))
                        .collect();
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "ranked-set read failed, using local counters");
                }
            }
        }
        self.frequency.top_n(n)
    }

    /// Mirror one access: bump the popular-queries ranked set, and refresh
    /// the mirrored entry when the fingerprint is L2-resident.
    async fn mirror_access(
        &self,
        fingerprint: &QueryFingerprint,
        value: &RankedList,
        count: u64,
    ) -> Option<DegradationEvent> {
        if count >= self.config.l2_promotion_threshold {
            if let Some(event) = self.mirror_write(fingerprint, value).await {
                return Some(event);
            }
        }
        self.mirror_frequency(fingerprint).await
    }

    async fn mirror_write(
        &self,
        fingerprint: &QueryFingerprint,
        value: &RankedList,
    ) -> Option<DegradationEvent> {
        let store = self.store.as_ref()?;
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize result list for mirror");
                return None;
            }
        };
        if let Err(e) = store.set(&Self::result_key(fingerprint), &json, None).await {
            warn!(error = %e, "distributed store unreachable on write, continuing");
            return Some(DegradationEvent::new(
                "cache",
                format!("store write failed: {e}"),
                "in-process tiers only",
            ));
        }
        None
    }

    /// Mirror one frequency tick: the shared per-fingerprint counter and
    /// the popular-queries ranked set. Best-effort on both.
    async fn mirror_frequency(&self, fingerprint: &QueryFingerprint) -> Option<DegradationEvent> {
        let store = self.store.as_ref()?;
        if let Err(e) = store.incr(&Self::frequency_key(fingerprint)).await {
            warn!(error = %e, "shared frequency increment failed, continuing");
        }
        if let Err(e) = store
            .rank_incr(POPULAR_QUERIES_SET, fingerprint.as_str())
            .await
        {
            warn!(error = %e, "popular-query increment failed, continuing");
        }
        None
    }
}
