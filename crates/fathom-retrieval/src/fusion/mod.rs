//! Rank fusion: merge the vector and keyword rankings into one list
//! without pretending their score scales are comparable.

mod rrf;
mod weighted;

use std::collections::HashMap;

use fathom_core::config::{FusionConfig, FusionMethod};
use fathom_core::models::{RankedList, SearchResult, SourceSignal};
use tracing::debug;

/// Merges two independently ranked candidate lists for one query.
///
/// Inputs must already be sorted descending by their own score. An id
/// missing from a source contributes nothing from that source; a source
/// that failed upstream simply arrives as an empty list, so fusion
/// degrades gracefully to the surviving ranks.
pub struct FusionEngine {
    config: FusionConfig,
}

impl FusionEngine {
    pub fn new(config: FusionConfig) -> Self {
        Self { config }
    }

    /// Fuse the two source rankings and truncate to `top_k`.
    pub fn fuse(
        &self,
        vector_ranks: &[SearchResult],
        keyword_ranks: &[SearchResult],
        top_k: usize,
    ) -> RankedList {
        let weights = self.config.normalized_weights();
        let fused = match self.config.method {
            FusionMethod::Rrf => rrf::fuse(
                vector_ranks,
                keyword_ranks,
                top_k,
                self.config.rrf_constant_k,
                weights,
            ),
            FusionMethod::WeightedScore => {
                weighted::fuse(vector_ranks, keyword_ranks, top_k, weights)
            }
        };
        debug!(
            method = ?self.config.method,
            vector = vector_ranks.len(),
            keyword = keyword_ranks.len(),
            fused = fused.len(),
            "fusion complete"
        );
        fused
    }
}

/// Score accumulator shared by both fusion formulas.
///
/// Candidates keep their first-seen payload (text, embedding, metadata)
/// and insertion order, which a stable descending sort then uses as the
/// deterministic tie-break.
pub(crate) struct ScoreMerge {
    index: HashMap<String, usize>,
    items: Vec<(SearchResult, f64)>,
}

impl ScoreMerge {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            items: Vec::new(),
        }
    }

    /// Add a contribution for a candidate, inserting it on first sight.
    pub(crate) fn add(&mut self, candidate: &SearchResult, contribution: f64) {
        match self.index.get(&candidate.id) {
            Some(&i) => self.items[i].1 += contribution,
            None => {
                self.index.insert(candidate.id.clone(), self.items.len());
                self.items.push((candidate.clone(), contribution));
            }
        }
    }

    /// Descending stable sort, truncate, tag as fused.
    pub(crate) fn into_ranked(mut self, top_k: usize) -> RankedList {
        self.items.sort_by(|a, b| {
            b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal)
        });
        self.items.truncate(top_k);
        self.items
            .into_iter()
            .map(|(candidate, score)| candidate.rescored(score, SourceSignal::Fused))
            .collect()
    }
}
