//! Maximal Marginal Relevance: greedy selection balancing relevance
//! against redundancy with already-selected results.
//!
//! Similarity is cosine over embeddings when both candidates carry one,
//! else a token-overlap ratio over the result texts.

use fathom_core::models::{RankedList, SearchResult, SourceSignal};

/// Greedily select up to `top_k` results maximizing
/// `λ·relevance − (1−λ)·max_similarity_to_selected`.
///
/// `relevance` is the candidate's current score. Selection stops when
/// `top_k` results are chosen or candidates are exhausted. Ties go to the
/// earliest remaining candidate, keeping the output deterministic.
pub(crate) fn select(candidates: RankedList, top_k: usize, lambda: f64) -> RankedList {
    let mut remaining = candidates;
    let mut selected: RankedList = Vec::new();

    while selected.len() < top_k && !remaining.is_empty() {
        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;

        for (i, candidate) in remaining.iter().enumerate() {
            let max_similarity = selected
                .iter()
                .map(|s| similarity(candidate, s))
                .fold(0.0, f64::max);
            let mmr = lambda * candidate.score - (1.0 - lambda) * max_similarity;
            if mmr > best_score {
                best_score = mmr;
                best_index = i;
            }
        }

        let chosen = remaining.remove(best_index);
        selected.push(chosen.rescored(chosen.score, SourceSignal::Reranked));
    }

    selected
}

/// Pairwise similarity in [0, 1].
fn similarity(a: &SearchResult, b: &SearchResult) -> f64 {
    match (&a.embedding, &b.embedding) {
        (Some(ea), Some(eb)) => cosine(ea, eb),
        _ => token_overlap(&a.text, &b.text),
    }
}

/// Cosine similarity, clamped to [0, 1]. Zero for mismatched dimensions
/// or zero-norm vectors.
fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        dot += *x as f64 * *y as f64;
        norm_a += (*x as f64).powi(2);
        norm_b += (*y as f64).powi(2);
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

/// Jaccard overlap of lowercase whitespace tokens.
fn token_overlap(a: &str, b: &str) -> f64 {
    use std::collections::HashSet;

    let ta: HashSet<String> = a.split_whitespace().map(|t| t.to_lowercase()).collect();
    let tb: HashSet<String> = b.split_whitespace().map(|t| t.to_lowercase()).collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }
    let intersection = ta.intersection(&tb).count() as f64;
    let union = ta.union(&tb).count() as f64;
    intersection / union
}
