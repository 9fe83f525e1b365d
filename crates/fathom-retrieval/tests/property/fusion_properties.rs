//! Property tests for rank fusion: laws that must hold for arbitrary
//! source rankings, not just hand-picked examples.

use std::collections::HashSet;

use fathom_core::config::{defaults, FusionConfig, FusionMethod};
use fathom_core::models::{SearchResult, SourceSignal};
use fathom_retrieval::FusionEngine;
use proptest::prelude::*;

fn ranked_list(signal: SourceSignal) -> impl Strategy<Value = Vec<SearchResult>> {
    // Ids drawn from a small alphabet so the two lists overlap often.
    let entry = ("[a-h]", 0.0f64..100.0);
    prop::collection::vec(entry, 0..12).prop_map(move |raw| {
        let mut seen = HashSet::new();
        let mut list: Vec<SearchResult> = raw
            .into_iter()
            .filter(|(id, _)| seen.insert(id.clone()))
            .map(|(id, score)| SearchResult::scored(id, score, signal))
            .collect();
        // Sources hand fusion a descending ranking.
        list.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        list
    })
}

fn engine(method: FusionMethod) -> FusionEngine {
    FusionEngine::new(FusionConfig {
        method,
        rrf_constant_k: defaults::DEFAULT_RRF_CONSTANT_K,
        vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
        keyword_weight: defaults::DEFAULT_KEYWORD_WEIGHT,
    })
}

fn union_size(vector: &[SearchResult], keyword: &[SearchResult]) -> usize {
    vector
        .iter()
        .chain(keyword)
        .map(|r| r.id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

proptest! {
    #[test]
    fn truncation_law_holds_for_both_methods(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
        top_k in 0usize..20,
    ) {
        for method in [FusionMethod::Rrf, FusionMethod::WeightedScore] {
            let fused = engine(method).fuse(&vector, &keyword, top_k);
            prop_assert_eq!(fused.len(), top_k.min(union_size(&vector, &keyword)));
        }
    }

    #[test]
    fn fusion_is_deterministic(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
    ) {
        let engine = engine(FusionMethod::Rrf);
        let first = engine.fuse(&vector, &keyword, 10);
        let second = engine.fuse(&vector, &keyword, 10);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn output_is_sorted_descending(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
    ) {
        for method in [FusionMethod::Rrf, FusionMethod::WeightedScore] {
            let fused = engine(method).fuse(&vector, &keyword, 20);
            for pair in fused.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }
    }

    #[test]
    fn no_candidate_is_invented_or_duplicated(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
    ) {
        let fused = engine(FusionMethod::Rrf).fuse(&vector, &keyword, 20);
        let known: HashSet<&str> = vector
            .iter()
            .chain(&keyword)
            .map(|r| r.id.as_str())
            .collect();
        let mut seen = HashSet::new();
        for r in &fused {
            prop_assert!(known.contains(r.id.as_str()));
            prop_assert!(seen.insert(r.id.as_str()), "duplicate id {}", r.id);
            prop_assert_eq!(r.signal, SourceSignal::Fused);
        }
    }

    #[test]
    fn second_source_never_lowers_a_candidate(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
    ) {
        // Appearing in the keyword list on top of the vector list can only
        // add to an RRF score, never subtract.
        let engine = engine(FusionMethod::Rrf);
        let alone = engine.fuse(&vector, &[], usize::MAX);
        let combined = engine.fuse(&vector, &keyword, usize::MAX);
        for r in &alone {
            let with_both = combined
                .iter()
                .find(|c| c.id == r.id)
                .map(|c| c.score)
                .unwrap_or(0.0);
            prop_assert!(with_both >= r.score - 1e-12);
        }
    }

    #[test]
    fn rrf_scores_are_positive_and_bounded(
        vector in ranked_list(SourceSignal::Vector),
        keyword in ranked_list(SourceSignal::Keyword),
    ) {
        let fused = engine(FusionMethod::Rrf).fuse(&vector, &keyword, 20);
        let k = defaults::DEFAULT_RRF_CONSTANT_K as f64;
        for r in &fused {
            prop_assert!(r.score > 0.0);
            // Upper bound: rank 1 in both sources with all the weight.
            prop_assert!(r.score <= 1.0 / (k + 1.0));
        }
    }
}
