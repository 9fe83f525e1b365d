//! Reranking: precision via pairwise scoring, diversity via MMR.
//!
//! Any scorer failure degrades to identity ordering; the caller sees a
//! degradation event, never an error.

mod mmr;
mod pairwise;

use std::sync::Arc;

use fathom_core::config::{RerankConfig, RerankMethod};
use fathom_core::models::{DegradationEvent, RankedList};
use fathom_core::traits::IPairwiseScorer;
use tracing::{debug, warn};

/// Result of the reranking stage: the final cut plus any degradation that
/// occurred while producing it.
#[derive(Debug)]
pub struct RerankOutcome {
    pub results: RankedList,
    pub degraded: Option<DegradationEvent>,
}

/// Re-scores and re-orders the fused candidate set.
pub struct RerankingEngine {
    config: RerankConfig,
    scorer: Option<Arc<dyn IPairwiseScorer>>,
}

impl RerankingEngine {
    pub fn new(config: RerankConfig, scorer: Option<Arc<dyn IPairwiseScorer>>) -> Self {
        Self { config, scorer }
    }

    /// Rerank `results` (fused, descending) down to `top_k`.
    pub async fn rerank(&self, query: &str, results: RankedList, top_k: usize) -> RerankOutcome {
        match self.config.method {
            RerankMethod::Identity => RerankOutcome {
                results: identity(results, top_k),
                degraded: None,
            },
            RerankMethod::PairwiseScore => match self.score_pairwise(query, &results, usize::MAX).await {
                Ok(scored) => RerankOutcome {
                    results: identity(scored, top_k),
                    degraded: None,
                },
                Err(event) => RerankOutcome {
                    results: identity(results, top_k),
                    degraded: Some(event),
                },
            },
            RerankMethod::Diversity => RerankOutcome {
                results: mmr::select(results, top_k, self.config.mmr_lambda),
                degraded: None,
            },
            RerankMethod::Hybrid => {
                // Pairwise over at most 2·top_k bounds the expensive call,
                // MMR then diversifies the final cut.
                match self.score_pairwise(query, &results, top_k.saturating_mul(2)).await {
                    Ok(scored) => RerankOutcome {
                        results: mmr::select(scored, top_k, self.config.mmr_lambda),
                        degraded: None,
                    },
                    Err(event) => RerankOutcome {
                        results: identity(results, top_k),
                        degraded: Some(event),
                    },
                }
            }
        }
    }

    /// Batch-score up to `limit` candidates, re-sorted descending.
    /// Converts every scorer problem into a degradation event.
    async fn score_pairwise(
        &self,
        query: &str,
        results: &RankedList,
        limit: usize,
    ) -> Result<RankedList, DegradationEvent> {
        let scorer = self.scorer.as_ref().ok_or_else(|| {
            DegradationEvent::new("rerank", "no pairwise scorer configured", "identity ordering")
        })?;

        let head: RankedList = results.iter().take(limit).cloned().collect();
        match pairwise::score(query, head, scorer.as_ref(), self.config.scorer_timeout_ms).await {
            Ok(scored) => {
                debug!(scored = scored.len(), "pairwise scoring complete");
                Ok(scored)
            }
            Err(e) => {
                warn!(error = %e, "pairwise scorer failed, falling back to identity");
                Err(DegradationEvent::new(
                    "rerank",
                    e.to_string(),
                    "identity ordering",
                ))
            }
        }
    }
}

/// Identity ordering: keep the existing scores, sort descending (stable),
/// truncate. The universal fallback.
fn identity(mut results: RankedList, top_k: usize) -> RankedList {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    results.truncate(top_k);
    results
}
