//! SearchPipeline: cache front, expansion, concurrent retrieval branches,
//! fusion, reranking, cache store — a strict left-to-right pipeline per
//! request.
//!
//! The two retrieval branches are the only fan-out: each carries an
//! independent timeout and a timed-out branch contributes an empty list,
//! never a request-level failure. The request fails only on invalid input
//! or when every retrieval signal failed.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use fathom_cache::HierarchicalCache;
use fathom_core::config::{PipelineConfig, SearchMode};
use fathom_core::errors::{ConfigError, FathomError, FathomResult, RetrievalError};
use fathom_core::models::{
    DegradationEvent, Filters, QueryFingerprint, RankedList, SearchResult,
};
use fathom_core::traits::{
    IEmbeddingProvider, IGenerationProvider, IKeywordIndex, IPairwiseScorer, IVectorIndex,
};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::expansion::QueryExpander;
use crate::fusion::FusionEngine;
use crate::rerank::RerankingEngine;

/// A search request. `top_k >= 1` is a caller contract.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: usize,
    pub filters: Filters,
    pub mode: SearchMode,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, top_k: usize) -> Self {
        Self {
            query: query.into(),
            top_k,
            filters: Filters::new(),
            mode: SearchMode::Hybrid,
        }
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_filters(mut self, filters: Filters) -> Self {
        self.filters = filters;
        self
    }
}

/// A completed search: the ranked list plus how it was produced.
#[derive(Debug)]
pub struct SearchResponse {
    pub results: RankedList,
    pub from_cache: bool,
    /// Local recoveries that occurred while serving this request.
    pub degradations: Vec<DegradationEvent>,
}

/// How one retrieval branch ended.
#[derive(Debug)]
enum BranchOutcome {
    Hits(Vec<SearchResult>),
    TimedOut,
    Failed(String),
    Skipped,
}

impl BranchOutcome {
    fn is_failure(&self) -> bool {
        matches!(self, BranchOutcome::TimedOut | BranchOutcome::Failed(_))
    }
}

/// The retrieval pipeline. One instance serves many concurrent requests;
/// the cache is the only shared mutable state.
pub struct SearchPipeline {
    config: PipelineConfig,
    embedding: Arc<dyn IEmbeddingProvider>,
    vector_index: Arc<dyn IVectorIndex>,
    keyword_index: Arc<dyn IKeywordIndex>,
    expander: QueryExpander,
    fusion: FusionEngine,
    rerank: RerankingEngine,
    cache: Arc<HierarchicalCache>,
}

impl SearchPipeline {
    /// Build a pipeline, validating the configuration up front.
    pub fn new(
        config: PipelineConfig,
        embedding: Arc<dyn IEmbeddingProvider>,
        vector_index: Arc<dyn IVectorIndex>,
        keyword_index: Arc<dyn IKeywordIndex>,
    ) -> FathomResult<Self> {
        config.validate()?;
        let cache = Arc::new(HierarchicalCache::new(config.cache.clone()));
        Ok(Self {
            fusion: FusionEngine::new(config.fusion.clone()),
            rerank: RerankingEngine::new(config.rerank.clone(), None),
            expander: QueryExpander::new(config.expansion.clone(), None),
            config,
            embedding,
            vector_index,
            keyword_index,
            cache,
        })
    }

    /// Attach a pairwise scorer for the reranking stage.
    pub fn with_scorer(mut self, scorer: Arc<dyn IPairwiseScorer>) -> Self {
        self.rerank = RerankingEngine::new(self.config.rerank.clone(), Some(scorer));
        self
    }

    /// Attach a generation provider for query expansion.
    pub fn with_generation(mut self, generation: Arc<dyn IGenerationProvider>) -> Self {
        self.expander = QueryExpander::new(self.config.expansion.clone(), Some(generation));
        self
    }

    /// Replace the default cache, e.g. to attach a distributed store.
    pub fn with_cache(mut self, cache: Arc<HierarchicalCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The single entry point: expansion, fusion, rerank and cache applied
    /// as configured.
    pub async fn search(&self, request: SearchRequest) -> FathomResult<SearchResponse> {
        if request.top_k < 1 {
            return Err(FathomError::Config(ConfigError::InvalidTopK {
                got: request.top_k,
            }));
        }

        let mut degradations = Vec::new();
        let fingerprint = QueryFingerprint::compute(
            &request.query,
            request.top_k,
            &request.filters,
            request.mode,
        );

        if self.config.cache.enabled {
            let lookup = self.cache.get(&fingerprint).await;
            if let Some(event) = lookup.degraded {
                degradations.push(event);
            }
            if let Some(results) = lookup.value {
                debug!(fingerprint = %fingerprint, "cache hit, fast path");
                return Ok(SearchResponse {
                    results,
                    from_cache: true,
                    degradations,
                });
            }
        }

        // Expansion. Degrades to the original query on any failure.
        let expansion = self.expander.expand(&request.query).await;
        if let Some(event) = expansion.degraded {
            degradations.push(event);
        }
        let variants = expansion.variants;

        // Fan out the two retrieval branches; join before fusion.
        let branch_timeout = Duration::from_millis(self.config.per_branch_timeout_ms);
        let fetch_k = request.top_k.saturating_mul(2);

        let vector_branch = async {
            if !request.mode.uses_vector() {
                return BranchOutcome::Skipped;
            }
            match timeout(
                branch_timeout,
                self.run_vector_branch(&variants, fetch_k, &request.filters),
            )
            .await
            {
                Ok(Ok(hits)) => BranchOutcome::Hits(hits),
                Ok(Err(e)) => BranchOutcome::Failed(e.to_string()),
                Err(_) => BranchOutcome::TimedOut,
            }
        };

        let keyword_branch = async {
            if !request.mode.uses_keyword() {
                return BranchOutcome::Skipped;
            }
            match timeout(
                branch_timeout,
                self.run_keyword_branch(&variants, fetch_k),
            )
            .await
            {
                Ok(Ok(hits)) => BranchOutcome::Hits(hits),
                Ok(Err(e)) => BranchOutcome::Failed(e.to_string()),
                Err(_) => BranchOutcome::TimedOut,
            }
        };

        let (vector_outcome, keyword_outcome) = tokio::join!(vector_branch, keyword_branch);

        let attempted = [&vector_outcome, &keyword_outcome]
            .iter()
            .filter(|o| !matches!(o, BranchOutcome::Skipped))
            .count();
        let failures = [&vector_outcome, &keyword_outcome]
            .iter()
            .filter(|o| o.is_failure())
            .count();
        if attempted > 0 && failures == attempted {
            warn!("every retrieval branch failed or timed out");
            return Err(RetrievalError::NoResultsAvailable.into());
        }

        let vector_hits = self.unwrap_branch(vector_outcome, "vector", &mut degradations);
        let keyword_hits = self.unwrap_branch(keyword_outcome, "keyword", &mut degradations);

        // Fuse over a wider cut so hybrid reranking has 2·top_k to work with.
        let fused = self.fusion.fuse(&vector_hits, &keyword_hits, fetch_k);

        let reranked = self
            .rerank
            .rerank(&request.query, fused, request.top_k)
            .await;
        if let Some(event) = reranked.degraded {
            degradations.push(event);
        }
        let results = reranked.results;

        if self.config.cache.enabled {
            let stored = self.cache.put(&fingerprint, &results).await;
            if let Some(event) = stored.degraded {
                degradations.push(event);
            }
        }

        info!(
            query = %request.query,
            results = results.len(),
            degraded = !degradations.is_empty(),
            "search complete"
        );
        Ok(SearchResponse {
            results,
            from_cache: false,
            degradations,
        })
    }

    /// Observability hook. Read-only, side-effect free.
    pub fn cache_stats(&self) -> fathom_cache::CacheStats {
        self.cache.stats()
    }

    /// The `n` most frequently searched fingerprints.
    pub async fn popular_queries(&self, n: usize) -> Vec<(QueryFingerprint, u64)> {
        self.cache.popular_queries(n).await
    }

    /// Remove one cached query from both tiers.
    pub async fn invalidate(&self, fingerprint: &QueryFingerprint) {
        self.cache.invalidate(fingerprint).await;
    }

    /// Remove every cached result list containing the document. Called by
    /// ingestion collaborators when a document changes.
    pub fn invalidate_document(&self, document_id: &str) -> usize {
        self.cache.invalidate_document(document_id)
    }

    /// Vector branch: embed each variant (through the permanent embedding
    /// cache), search the index per variant, pool by id.
    async fn run_vector_branch(
        &self,
        variants: &[String],
        fetch_k: usize,
        filters: &Filters,
    ) -> FathomResult<Vec<SearchResult>> {
        let mut per_variant = Vec::with_capacity(variants.len());
        for variant in variants {
            let query_vector = self.embed_cached(variant).await?;
            let hits = self
                .vector_index
                .search(&query_vector, fetch_k, filters)
                .await?;
            per_variant.push(hits);
        }
        Ok(pool_by_id(per_variant))
    }

    /// Keyword branch: lexical search per variant, pooled by id.
    async fn run_keyword_branch(
        &self,
        variants: &[String],
        fetch_k: usize,
    ) -> FathomResult<Vec<SearchResult>> {
        let mut per_variant = Vec::with_capacity(variants.len());
        for variant in variants {
            let hits = self.keyword_index.search(variant, fetch_k).await?;
            per_variant.push(hits);
        }
        Ok(pool_by_id(per_variant))
    }

    /// Embedding with the permanent sub-cache in front: identical text
    /// never hits the provider twice.
    async fn embed_cached(&self, text: &str) -> FathomResult<Vec<f32>> {
        if let Some(vector) = self.cache.embedding_get(text) {
            return Ok(vector);
        }
        let vector = self.embedding.embed(text).await?;
        self.cache.embedding_put(text, vector.clone());
        Ok(vector)
    }

    /// Convert a branch outcome into its hit list, recording a degradation
    /// for a timed-out or failed branch.
    fn unwrap_branch(
        &self,
        outcome: BranchOutcome,
        source: &str,
        degradations: &mut Vec<DegradationEvent>,
    ) -> Vec<SearchResult> {
        match outcome {
            BranchOutcome::Hits(hits) => hits,
            BranchOutcome::Skipped => Vec::new(),
            BranchOutcome::TimedOut => {
                warn!(source, timeout_ms = self.config.per_branch_timeout_ms, "branch timed out");
                degradations.push(DegradationEvent::new(
                    source,
                    format!("timed out after {}ms", self.config.per_branch_timeout_ms),
                    "surviving source only",
                ));
                Vec::new()
            }
            BranchOutcome::Failed(reason) => {
                warn!(source, %reason, "branch failed");
                degradations.push(DegradationEvent::new(
                    source,
                    reason,
                    "surviving source only",
                ));
                Vec::new()
            }
        }
    }
}

/// Pool per-variant hit lists into one ranked list: the maximum score per
/// id wins, output sorted descending with first-seen tie-break.
fn pool_by_id(per_variant: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut pooled: Vec<SearchResult> = Vec::new();

    for hits in per_variant {
        for hit in hits {
            match index.get(&hit.id) {
                Some(&i) => {
                    if hit.score > pooled[i].score {
                        pooled[i] = hit;
                    }
                }
                None => {
                    index.insert(hit.id.clone(), pooled.len());
                    pooled.push(hit);
                }
            }
        }
    }

    pooled.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    pooled
}
