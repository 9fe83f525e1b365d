use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::{MAX_RESULT_TTL_SECS, MIN_RESULT_TTL_SECS};
use crate::errors::ConfigError;

/// Hierarchical cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Whether the cache sits in front of the pipeline at all.
    pub enabled: bool,
    /// TTL applied to L1 result entries (seconds).
    pub l1_ttl_seconds: u64,
    /// Access count at which a fingerprint is promoted into L2.
    pub l2_promotion_threshold: u64,
    /// Capacity bound of the L2 tier.
    pub l2_max_entries: usize,
    /// Capacity of the permanent embedding sub-cache.
    pub embedding_cache_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            l1_ttl_seconds: defaults::DEFAULT_L1_TTL_SECS,
            l2_promotion_threshold: defaults::DEFAULT_L2_PROMOTION_THRESHOLD,
            l2_max_entries: defaults::DEFAULT_L2_MAX_ENTRIES,
            embedding_cache_entries: defaults::DEFAULT_EMBEDDING_CACHE_ENTRIES,
        }
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_RESULT_TTL_SECS..=MAX_RESULT_TTL_SECS).contains(&self.l1_ttl_seconds) {
            return Err(ConfigError::InvalidValue {
                field: "l1_ttl_seconds",
                reason: format!(
                    "{} outside [{MIN_RESULT_TTL_SECS}, {MAX_RESULT_TTL_SECS}]",
                    self.l1_ttl_seconds
                ),
            });
        }
        if self.l2_promotion_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "l2_promotion_threshold",
                reason: "must be >= 1".to_string(),
            });
        }
        if self.l2_max_entries == 0 {
            return Err(ConfigError::InvalidValue {
                field: "l2_max_entries",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
