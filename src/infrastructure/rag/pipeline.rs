//! Query orchestration: one transaction per call, timing breakdown included

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::llm::GenerationClient;
use crate::domain::rag::{
    assemble_context, messages, ComparisonResult, DirectResponse, RagResponse, ResponseMetadata,
    SessionState,
};
use crate::domain::retrieval::VectorIndexClient;

use super::generator::AnswerGenerator;
use super::retriever::Retriever;
use super::translator::QueryTranslator;

/// Per-call overrides of the configured retrieval parameters
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub top_k: Option<usize>,
    pub similarity_threshold: Option<f32>,
}

/// Dependency health, checked before accepting queries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemStatus {
    pub vector_index: bool,
    pub generation_service: bool,
    pub total_documents: usize,
    pub available_models: Vec<String>,
}

impl SystemStatus {
    pub fn ready(&self) -> bool {
        self.vector_index && self.generation_service
    }
}

/// Composes translation, retrieval, context assembly, and generation into
/// one sequential query transaction.
///
/// Stages run strictly in order; independent queries may share one pipeline
/// instance since the clients hold no per-query state.
#[derive(Debug, Clone)]
pub struct RagPipeline {
    index: Arc<dyn VectorIndexClient>,
    llm: Arc<dyn GenerationClient>,
    retriever: Retriever,
    generator: AnswerGenerator,
    top_k: usize,
    similarity_threshold: f32,
}

impl RagPipeline {
    pub fn new(
        index: Arc<dyn VectorIndexClient>,
        llm: Arc<dyn GenerationClient>,
        config: &AppConfig,
    ) -> Self {
        let translator = QueryTranslator::new(llm.clone(), config.llm.translation_timeout());
        let retriever = Retriever::new(index.clone(), translator);
        let generator = AnswerGenerator::new(llm.clone(), config.llm.generation_timeout());

        Self {
            index,
            llm,
            retriever,
            generator,
            top_k: config.retrieval.top_k,
            similarity_threshold: config.retrieval.similarity_threshold,
        }
    }

    /// Grounded query with the configured retrieval parameters
    pub async fn query(&self, query: &str, session: &mut SessionState) -> RagResponse {
        self.query_with(query, QueryParams::default(), session).await
    }

    /// Grounded query with per-call parameter overrides
    pub async fn query_with(
        &self,
        query: &str,
        params: QueryParams,
        session: &mut SessionState,
    ) -> RagResponse {
        session.record(query);
        self.run_grounded(query, params).await
    }

    /// Ungrounded query: generation only, retrieval is skipped entirely
    pub async fn direct_query(&self, query: &str, session: &mut SessionState) -> DirectResponse {
        session.record(query);
        self.run_direct(query).await
    }

    /// Run both modes sequentially for the same question
    pub async fn compare(&self, query: &str, session: &mut SessionState) -> ComparisonResult {
        session.record(query);

        let grounded = self.run_grounded(query, QueryParams::default()).await;
        let ungrounded = self.run_direct(query).await;

        ComparisonResult {
            grounded,
            ungrounded,
        }
    }

    /// Probe each dependency; a failed probe maps to `false`, never an error
    pub async fn status(&self) -> SystemStatus {
        let (vector_index, total_documents) = match self.index.count().await {
            Ok(count) => (true, count),
            Err(error) => {
                warn!(%error, "vector index check failed");
                (false, 0)
            }
        };

        let (generation_service, available_models) = match self.llm.list_models().await {
            Ok(models) => (true, models),
            Err(error) => {
                warn!(%error, "generation service check failed");
                (false, Vec::new())
            }
        };

        SystemStatus {
            vector_index,
            generation_service,
            total_documents,
            available_models,
        }
    }

    async fn run_grounded(&self, query: &str, params: QueryParams) -> RagResponse {
        let start = Instant::now();
        let top_k = params.top_k.unwrap_or(self.top_k);
        let similarity_threshold = params
            .similarity_threshold
            .unwrap_or(self.similarity_threshold);

        info!(query = %query, top_k, similarity_threshold, "processing grounded query");

        let retrieval = self.retriever.retrieve(query, top_k, similarity_threshold).await;

        let metadata = ResponseMetadata {
            translated_query: retrieval.query_used.clone(),
            similarity_threshold,
            requested_top_k: top_k,
            documents_found: retrieval.results.len(),
            model: self.llm.model_name().to_string(),
        };

        if retrieval.results.is_empty() {
            // terminal no-results state: the generator is never invoked
            return RagResponse {
                query: query.to_string(),
                answer: messages::NO_RESULTS_ANSWER.to_string(),
                source_documents: Vec::new(),
                search_time_ms: retrieval.search_time_ms,
                generation_time_ms: 0.0,
                total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
                metadata,
            };
        }

        let context = assemble_context(&retrieval.results);
        let (answer, generation_time_ms) = self.generator.generate_grounded(query, &context).await;

        RagResponse {
            query: query.to_string(),
            answer,
            source_documents: retrieval.results,
            search_time_ms: retrieval.search_time_ms,
            generation_time_ms,
            total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            metadata,
        }
    }

    async fn run_direct(&self, query: &str) -> DirectResponse {
        let start = Instant::now();

        info!(query = %query, "processing direct query");

        let (answer, generation_time_ms) = self.generator.generate_direct(query).await;

        DirectResponse {
            query: query.to_string(),
            answer,
            generation_time_ms,
            total_time_ms: start.elapsed().as_secs_f64() * 1000.0,
            model: self.llm.model_name().to_string(),
        }
    }
}
