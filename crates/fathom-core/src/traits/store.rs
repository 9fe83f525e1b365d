use std::time::Duration;

use async_trait::async_trait;

use crate::errors::FathomResult;

/// Optional key/value backing store for the cache tiers.
///
/// Any store offering get/set-with-TTL, atomic increment, and a ranked
/// structure ("increment member score", "range by score") can back the
/// L2 tier and the frequency tracker. Store failures are never fatal:
/// callers swallow them and run as if the cache were empty.
#[async_trait]
pub trait IDistributedStore: Send + Sync {
    /// Fetch a value by key.
    async fn get(&self, key: &str) -> FathomResult<Option<String>>;

    /// Store a value, with an optional expiry.
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> FathomResult<()>;

    /// Remove a key. Missing keys are not an error.
    async fn delete(&self, key: &str) -> FathomResult<()>;

    /// Atomically increment a counter, returning the new value.
    async fn incr(&self, key: &str) -> FathomResult<u64>;

    /// Increment a member's score within a ranked set.
    async fn rank_incr(&self, set: &str, member: &str) -> FathomResult<f64>;

    /// Top `n` members of a ranked set, highest score first.
    async fn rank_top(&self, set: &str, n: usize) -> FathomResult<Vec<(String, f64)>>;
}
