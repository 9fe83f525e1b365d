//! Cross-encoder-style pairwise scoring through the external scorer.
//!
//! All (query, text) pairs go out in a single batched call to bound
//! latency; the call carries its own timeout.

use std::time::Duration;

use fathom_core::errors::RerankError;
use fathom_core::models::{RankedList, SourceSignal};
use fathom_core::traits::IPairwiseScorer;
use tokio::time::timeout;

/// Score every candidate against the query and re-sort descending.
///
/// The scorer contract requires scores in input order; a count mismatch is
/// treated as a scorer failure.
pub(crate) async fn score(
    query: &str,
    candidates: RankedList,
    scorer: &dyn IPairwiseScorer,
    timeout_ms: u64,
) -> Result<RankedList, RerankError> {
    if candidates.is_empty() {
        return Ok(candidates);
    }

    let pairs: Vec<(String, String)> = candidates
        .iter()
        .map(|r| (query.to_string(), r.text.clone()))
        .collect();

    let scores = match timeout(Duration::from_millis(timeout_ms), scorer.score_batch(&pairs)).await
    {
        Ok(Ok(scores)) => scores,
        Ok(Err(e)) => {
            return Err(RerankError::ScorerUnavailable {
                reason: e.to_string(),
            })
        }
        Err(_) => return Err(RerankError::ScorerTimeout { timeout_ms }),
    };

    if scores.len() != pairs.len() {
        return Err(RerankError::ScoreCountMismatch {
            expected: pairs.len(),
            got: scores.len(),
        });
    }

    let mut rescored: RankedList = candidates
        .iter()
        .zip(scores)
        .map(|(candidate, score)| candidate.rescored(score, SourceSignal::Reranked))
        .collect();
    rescored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    Ok(rescored)
}
