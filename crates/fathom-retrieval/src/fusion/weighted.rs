//! Weighted score fusion: max-normalize each source's scores, then take
//! the weighted sum. Prefer over RRF when absolute score magnitudes
//! should influence the result beyond pure ordering.

use fathom_core::models::{RankedList, SearchResult};

use super::ScoreMerge;

pub(crate) fn fuse(
    vector_ranks: &[SearchResult],
    keyword_ranks: &[SearchResult],
    top_k: usize,
    weights: (f64, f64),
) -> RankedList {
    let mut merge = ScoreMerge::new();
    let (vector_weight, keyword_weight) = weights;

    for (source, weight) in [(vector_ranks, vector_weight), (keyword_ranks, keyword_weight)] {
        let max = source.iter().map(|r| r.score).fold(f64::MIN, f64::max);
        // Guard against a zero (or degenerate) max: contributions collapse
        // to zero instead of dividing by it.
        let denominator = if max > 0.0 { max } else { f64::INFINITY };
        for candidate in source {
            merge.add(candidate, weight * (candidate.score / denominator));
        }
    }

    merge.into_ranked(top_k)
}
