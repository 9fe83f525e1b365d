//! Bundled in-process implementation of the distributed store trait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use fathom_core::errors::FathomResult;
use fathom_core::traits::IDistributedStore;

/// In-memory `IDistributedStore`: the default L2 mirror when no external
/// store is deployed, and the workhorse for tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    values: DashMap<String, (String, Option<Instant>)>,
    counters: DashMap<String, AtomicU64>,
    ranked: DashMap<String, DashMap<String, f64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IDistributedStore for InMemoryStore {
    async fn get(&self, key: &str) -> FathomResult<Option<String>> {
        match self.values.get(key) {
            Some(entry) => {
                let (value, expires) = entry.value();
                if expires.is_some_and(|at| Instant::now() > at) {
                    drop(entry);
                    self.values.remove(key);
                    Ok(None)
                } else {
                    Ok(Some(value.clone()))
                }
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> FathomResult<()> {
        let expires = ttl.map(|t| Instant::now() + t);
        self.values.insert(key.to_string(), (value.to_string(), expires));
        Ok(())
    }

    async fn delete(&self, key: &str) -> FathomResult<()> {
        self.values.remove(key);
        Ok(())
    }

    async fn incr(&self, key: &str) -> FathomResult<u64> {
        let new = self
            .counters
            .entry(key.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::SeqCst)
            + 1;
        Ok(new)
    }

    async fn rank_incr(&self, set: &str, member: &str) -> FathomResult<f64> {
        let members = self.ranked.entry(set.to_string()).or_default();
        let mut score = members.entry(member.to_string()).or_insert(0.0);
        *score += 1.0;
        Ok(*score)
    }

    async fn rank_top(&self, set: &str, n: usize) -> FathomResult<Vec<(String, f64)>> {
        let mut members: Vec<(String, f64)> = match self.ranked.get(set) {
            Some(set) => set.iter().map(|kv| (kv.key().clone(), *kv.value())).collect(),
            None => Vec::new(),
        };
        members.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        members.truncate(n);
        Ok(members)
    }
}
