/// Fathom system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lower bound for result-entry TTLs (seconds).
pub const MIN_RESULT_TTL_SECS: u64 = 300;

/// Upper bound for result-entry TTLs (seconds).
pub const MAX_RESULT_TTL_SECS: u64 = 3600;

/// Maximum number of query variants expansion may produce (original included).
pub const MAX_EXPANSION_VARIANTS: usize = 6;

/// Shortest paraphrase variant accepted from the generation provider.
pub const MIN_VARIANT_CHARS: usize = 3;

/// Synonyms appended to the query by semantic expansion.
pub const SEMANTIC_EXPANSION_TERMS: usize = 3;
