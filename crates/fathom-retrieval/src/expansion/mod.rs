//! Query expansion: generate variants before retrieval to improve recall.
//!
//! Strictly optional. Every generation-capability failure collapses the
//! expansion to `[query]` — a no-op, never an error.

mod hyde;
pub mod language;
mod multi_query;
mod semantic;

use std::sync::Arc;
use std::time::Duration;

use fathom_core::config::{ExpansionConfig, ExpansionStrategy};
use fathom_core::constants::MAX_EXPANSION_VARIANTS;
use fathom_core::models::DegradationEvent;
use fathom_core::traits::IGenerationProvider;
use tokio::time::timeout;
use tracing::{debug, warn};

/// The expanded query set: the original first, variants after.
#[derive(Debug)]
pub struct Expansion {
    pub variants: Vec<String>,
    pub degraded: Option<DegradationEvent>,
}

impl Expansion {
    fn unexpanded(query: &str, degraded: Option<DegradationEvent>) -> Self {
        Self {
            variants: vec![query.to_string()],
            degraded,
        }
    }
}

/// Rewrites a query into multiple variants before retrieval.
pub struct QueryExpander {
    config: ExpansionConfig,
    generation: Option<Arc<dyn IGenerationProvider>>,
}

impl QueryExpander {
    pub fn new(config: ExpansionConfig, generation: Option<Arc<dyn IGenerationProvider>>) -> Self {
        Self { config, generation }
    }

    /// Produce 1..N variants for the query. The original query is always
    /// the first element.
    pub async fn expand(&self, query: &str) -> Expansion {
        if self.config.strategy == ExpansionStrategy::None {
            return Expansion::unexpanded(query, None);
        }

        let Some(generation) = self.generation.as_ref() else {
            return Expansion::unexpanded(
                query,
                Some(DegradationEvent::new(
                    "expansion",
                    "no generation provider configured",
                    "original query only",
                )),
            );
        };

        let script = language::detect(query);
        let n = self.config.multi_query_variants;
        let prompt = match self.config.strategy {
            ExpansionStrategy::Hyde => hyde::prompt(query, script),
            ExpansionStrategy::MultiQuery => multi_query::prompt(query, n, script),
            ExpansionStrategy::Semantic => semantic::prompt(query, script),
            ExpansionStrategy::None => unreachable!("handled above"),
        };

        let response = match timeout(
            Duration::from_millis(self.config.generation_timeout_ms),
            generation.generate(&prompt),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                warn!(error = %e, "generation provider failed, skipping expansion");
                return Expansion::unexpanded(
                    query,
                    Some(DegradationEvent::new(
                        "expansion",
                        e.to_string(),
                        "original query only",
                    )),
                );
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.config.generation_timeout_ms,
                    "generation provider timed out, skipping expansion"
                );
                return Expansion::unexpanded(
                    query,
                    Some(DegradationEvent::new(
                        "expansion",
                        "generation timed out",
                        "original query only",
                    )),
                );
            }
        };

        let mut variants = match self.config.strategy {
            ExpansionStrategy::Hyde => hyde::parse(query, &response),
            ExpansionStrategy::MultiQuery => multi_query::parse(query, &response, n),
            ExpansionStrategy::Semantic => semantic::parse(query, &response),
            ExpansionStrategy::None => unreachable!("handled above"),
        };
        variants.truncate(MAX_EXPANSION_VARIANTS);

        debug!(strategy = ?self.config.strategy, variants = variants.len(), "query expanded");
        Expansion {
            variants,
            degraded: None,
        }
    }
}
