//! Retrieval stage: translate, query the index, filter, truncate

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::domain::retrieval::{filter_ranked, SearchResult, VectorIndexClient};
use crate::domain::DomainError;

use super::translator::QueryTranslator;

/// Outcome of one retrieval pass
#[derive(Debug)]
pub struct Retrieval {
    /// Surviving candidates, descending similarity
    pub results: Vec<SearchResult>,
    pub search_time_ms: f64,
    /// The query actually issued against the index
    pub query_used: String,
}

/// Issues similarity queries and applies the two-stage ranking filter.
///
/// The index is asked for `2 × top_k` candidates so threshold filtering has
/// headroom without a second round-trip. An index failure degrades to an
/// empty result set; it is never surfaced as an error.
#[derive(Debug, Clone)]
pub struct Retriever {
    index: Arc<dyn VectorIndexClient>,
    translator: QueryTranslator,
}

impl Retriever {
    pub fn new(index: Arc<dyn VectorIndexClient>, translator: QueryTranslator) -> Self {
        Self { index, translator }
    }

    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Retrieval {
        let start = Instant::now();

        let (translated, translation_ms) = self.translator.translate(query).await;

        match self.query_index(&translated, top_k, similarity_threshold).await {
            Ok(results) => {
                let search_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                info!(
                    found = results.len(),
                    search_ms = search_time_ms,
                    translation_ms,
                    "retrieval finished"
                );
                Retrieval {
                    results,
                    search_time_ms,
                    query_used: translated,
                }
            }
            Err(error) => {
                warn!(%error, "document search failed");
                Retrieval {
                    results: Vec::new(),
                    search_time_ms: 0.0,
                    query_used: translated,
                }
            }
        }
    }

    async fn query_index(
        &self,
        query: &str,
        top_k: usize,
        similarity_threshold: f32,
    ) -> Result<Vec<SearchResult>, DomainError> {
        let embeddings = self.index.embed(&[query.to_string()]).await?;
        let embedding = embeddings
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::internal("embedding response was empty"))?;

        let hits = self.index.query(&embedding, top_k * 2).await?;
        let candidates: Vec<SearchResult> = hits.into_iter().map(SearchResult::from_hit).collect();

        Ok(filter_ranked(candidates, similarity_threshold, top_k))
    }
}
