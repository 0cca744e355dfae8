//! Medical literature RAG core
//!
//! Retrieval-augmented question answering over biomedical literature:
//! - Article segmentation into overlapping, sentence-aligned chunks
//! - Domain-term normalization (abbreviations, unit spellings)
//! - Query translation into the corpus language, with same-language fallback
//! - Similarity search with threshold and top-k filtering
//! - Context assembly with per-document provenance
//! - Grounded and ungrounded answer generation with degraded-fallback
//!   handling
//!
//! The vector index, embedding model, and generation model are external
//! services consumed through the trait seams in [`domain`]; reqwest-backed
//! clients for Chroma and Ollama live in [`infrastructure`].

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    assemble_context, filter_ranked, Answerable, Article, ChunkingConfig, ComparisonResult,
    DirectResponse, DomainError, GenerationClient, GenerationError, GenerationRequest, IndexHit,
    QueryAnswer, RagResponse, ResponseMetadata, SearchResult, SessionState, SourceMetadata,
    TextChunk, Timings, VectorIndexClient,
};
pub use infrastructure::{
    ChromaVectorStore, IngestionPipeline, IngestionStats, OllamaClient, QueryParams, RagPipeline,
    SentenceSegmenter, SystemStatus,
};
