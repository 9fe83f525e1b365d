//! Named defaults for every configuration knob.

pub const DEFAULT_RRF_CONSTANT_K: u32 = 60;
pub const DEFAULT_VECTOR_WEIGHT: f64 = 0.7;
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.3;

pub const DEFAULT_MMR_LAMBDA: f64 = 0.7;
pub const DEFAULT_SCORER_TIMEOUT_MS: u64 = 400;

pub const DEFAULT_MULTI_QUERY_VARIANTS: usize = 3;
pub const DEFAULT_GENERATION_TIMEOUT_MS: u64 = 800;

pub const DEFAULT_L1_TTL_SECS: u64 = 300;
pub const DEFAULT_L2_PROMOTION_THRESHOLD: u64 = 3;
pub const DEFAULT_L2_MAX_ENTRIES: usize = 10_000;
pub const DEFAULT_EMBEDDING_CACHE_ENTRIES: u64 = 100_000;

pub const DEFAULT_PER_BRANCH_TIMEOUT_MS: u64 = 600;
