//! Tier-transition and degradation tests for the hierarchical cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use fathom_cache::{HierarchicalCache, InMemoryStore};
use fathom_core::config::{CacheConfig, SearchMode};
use fathom_core::errors::{CacheError, FathomResult};
use fathom_core::models::{Filters, QueryFingerprint, RankedList, SearchResult, SourceSignal};
use fathom_core::traits::IDistributedStore;

fn fp(query: &str) -> QueryFingerprint {
    QueryFingerprint::compute(query, 10, &Filters::new(), SearchMode::Hybrid)
}

fn list(id: &str) -> RankedList {
    vec![SearchResult::scored(id, 1.0, SourceSignal::Reranked)]
}

fn config() -> CacheConfig {
    CacheConfig {
        l2_promotion_threshold: 3,
        ..CacheConfig::default()
    }
}

/// A store that fails every operation, for bypass behavior.
struct UnreachableStore;

#[async_trait]
impl IDistributedStore for UnreachableStore {
    async fn get(&self, _key: &str) -> FathomResult<Option<String>> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> FathomResult<()> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
    async fn delete(&self, _key: &str) -> FathomResult<()> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
    async fn incr(&self, _key: &str) -> FathomResult<u64> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
    async fn rank_incr(&self, _set: &str, _member: &str) -> FathomResult<f64> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
    async fn rank_top(&self, _set: &str, _n: usize) -> FathomResult<Vec<(String, f64)>> {
        Err(CacheError::BackendUnreachable {
            reason: "connection refused".to_string(),
        }
        .into())
    }
}

#[tokio::test]
async fn get_after_put_returns_equal_value() {
    let cache = HierarchicalCache::new(config());
    let f = fp("idempotence");
    let value = list("doc-1");

    cache.put(&f, &value).await;
    let got = cache.get(&f).await.value.expect("hit within ttl");
    assert_eq!(got, value);
}

#[tokio::test]
async fn promotion_happens_at_exactly_the_threshold() {
    let cache = HierarchicalCache::new(config());
    let f = fp("promotion");
    let value = list("doc-1");

    // Access 1: miss then store.
    assert!(cache.get(&f).await.value.is_none());
    cache.put(&f, &value).await;
    assert_eq!(cache.stats().l2_entries, 0, "below threshold: L1 only");

    // Access 2: hit.
    assert!(cache.get(&f).await.value.is_some());
    assert_eq!(cache.stats().l2_entries, 0, "still below threshold");

    // Access 3: hit, reaches the threshold.
    assert!(cache.get(&f).await.value.is_some());
    assert_eq!(cache.stats().l2_entries, 1, "promoted at threshold");
}

#[tokio::test]
async fn l2_serves_after_l1_expiry_and_repopulates_l1() {
    let mut cfg = config();
    // Zero TTL forces every L1 entry to expire immediately, leaving L2
    // authoritative.
    cfg.l1_ttl_seconds = 0;
    cfg.l2_promotion_threshold = 1;
    let cache = HierarchicalCache::new(cfg);
    let f = fp("l2-fallback");
    let value = list("doc-1");

    cache.put(&f, &value).await;
    assert_eq!(cache.stats().l2_entries, 1);
    tokio::time::sleep(Duration::from_millis(5)).await;

    let got = cache.get(&f).await.value.expect("L2 hit");
    assert_eq!(got, value);
}

#[tokio::test]
async fn invalidate_removes_from_both_tiers() {
    let mut cfg = config();
    cfg.l2_promotion_threshold = 1;
    let cache = HierarchicalCache::new(cfg);
    let f = fp("invalidate");

    cache.put(&f, &list("doc-1")).await;
    assert_eq!(cache.stats().l2_entries, 1);

    cache.invalidate(&f).await;
    assert!(cache.get(&f).await.value.is_none());
    let stats = cache.stats();
    assert_eq!(stats.l1_entries, 0);
    assert_eq!(stats.l2_entries, 0);
}

#[tokio::test]
async fn invalidate_document_scans_result_lists() {
    let mut cfg = config();
    cfg.l2_promotion_threshold = 1;
    let cache = HierarchicalCache::new(cfg);

    cache.put(&fp("q1"), &list("doc-shared")).await;
    cache.put(&fp("q2"), &list("doc-other")).await;

    let removed = cache.invalidate_document("doc-shared");
    assert!(removed >= 1);
    assert!(cache.get(&fp("q1")).await.value.is_none());
    assert!(cache.get(&fp("q2")).await.value.is_some());
}

#[tokio::test]
async fn normalized_queries_share_one_entry() {
    let cache = HierarchicalCache::new(config());
    let a = QueryFingerprint::compute("Machine Learning", 10, &Filters::new(), SearchMode::Hybrid);
    let b = QueryFingerprint::compute(" machine learning ", 10, &Filters::new(), SearchMode::Hybrid);

    cache.put(&a, &list("doc-ml")).await;
    let got = cache.get(&b).await.value.expect("same fingerprint");
    assert_eq!(got[0].id, "doc-ml");
}

#[tokio::test]
async fn stats_track_hits_and_misses() {
    let cache = HierarchicalCache::new(config());
    let f = fp("stats");

    assert!(cache.get(&f).await.value.is_none());
    cache.put(&f, &list("doc-1")).await;
    cache.get(&f).await;

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hit_rate_percent, 50.0);
}

#[tokio::test]
async fn mirror_serves_a_fresh_process() {
    let store = Arc::new(InMemoryStore::new());
    let mut cfg = config();
    cfg.l2_promotion_threshold = 1;

    let first = HierarchicalCache::new(cfg.clone()).with_store(store.clone());
    let f = fp("mirrored");
    first.put(&f, &list("doc-1")).await;

    // A second cache instance with empty tiers reads through the mirror.
    let second = HierarchicalCache::new(cfg).with_store(store);
    let got = second.get(&f).await.value.expect("mirror hit");
    assert_eq!(got[0].id, "doc-1");
    assert_eq!(second.stats().l2_entries, 1, "mirror hit re-populates tiers");
}

#[tokio::test]
async fn unreachable_store_degrades_to_in_process() {
    let mut cfg = config();
    cfg.l2_promotion_threshold = 1;
    let cache = HierarchicalCache::new(cfg).with_store(Arc::new(UnreachableStore));
    let f = fp("degraded");

    let lookup = cache.get(&f).await;
    assert!(lookup.value.is_none());
    assert!(lookup.degraded.is_some(), "store failure reported");

    // Writes are best-effort: the in-process tiers still work.
    let stored = cache.put(&f, &list("doc-1")).await;
    assert!(stored.degraded.is_some());
    assert!(cache.get(&f).await.value.is_some());
}

#[tokio::test]
async fn popular_queries_ranked_by_access_count() {
    let cache = HierarchicalCache::new(config());
    let hot = fp("hot");
    let cold = fp("cold");

    cache.put(&hot, &list("h")).await;
    cache.get(&hot).await;
    cache.get(&hot).await;
    cache.put(&cold, &list("c")).await;

    let top = cache.popular_queries(1).await;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].0, hot);
    assert_eq!(top[0].1, 3);
}

#[tokio::test]
async fn popular_queries_aggregate_across_processes_through_the_mirror() {
    let store = Arc::new(InMemoryStore::new());
    let first = HierarchicalCache::new(config()).with_store(store.clone());
    let second = HierarchicalCache::new(config()).with_store(store);
    let f = fp("shared-hot");

    first.put(&f, &list("doc-1")).await;
    first.get(&f).await;
    second.put(&f, &list("doc-1")).await;

    // Each process only saw part of the traffic; the ranked set saw it all.
    let top = first.popular_queries(1).await;
    assert_eq!(top[0].0, f);
    assert_eq!(top[0].1, 3);
}

#[tokio::test]
async fn purge_expired_drops_dead_entries_eagerly() {
    let mut cfg = config();
    cfg.l1_ttl_seconds = 0;
    let cache = HierarchicalCache::new(cfg);

    cache.put(&fp("q1"), &list("doc-1")).await;
    cache.put(&fp("q2"), &list("doc-2")).await;
    assert_eq!(cache.stats().l1_entries, 2);
    tokio::time::sleep(Duration::from_millis(5)).await;

    cache.purge_expired();
    assert_eq!(cache.stats().l1_entries, 0);
}
