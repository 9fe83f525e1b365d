//! Reciprocal Rank Fusion: score = Σ weight_i / (k + rank_i)
//!
//! Rank-only: robust to incomparable score scales between the vector and
//! keyword sources.

use fathom_core::models::{RankedList, SearchResult};

use super::ScoreMerge;

/// Fuse two ranked lists by reciprocal rank.
///
/// `k` is the smoothing constant (default 60); higher k reduces the
/// influence of high-ranking items from any single list. Ranks are
/// 1-based. `weights` are the normalized (vector, keyword) source weights.
pub(crate) fn fuse(
    vector_ranks: &[SearchResult],
    keyword_ranks: &[SearchResult],
    top_k: usize,
    k: u32,
    weights: (f64, f64),
) -> RankedList {
    let mut merge = ScoreMerge::new();
    let (vector_weight, keyword_weight) = weights;

    for (source, weight) in [(vector_ranks, vector_weight), (keyword_ranks, keyword_weight)] {
        for (position, candidate) in source.iter().enumerate() {
            let rank = position + 1;
            merge.add(candidate, weight / (k as f64 + rank as f64));
        }
    }

    merge.into_ranked(top_k)
}
