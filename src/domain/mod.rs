//! Domain layer - entities, trait seams, and pure pipeline logic

pub mod article;
pub mod error;
pub mod ingestion;
pub mod llm;
pub mod rag;
pub mod retrieval;

pub use article::{Article, SourceMetadata, LIST_METADATA_FIELDS};
pub use error::DomainError;
pub use ingestion::{ChunkingConfig, TextChunk};
pub use llm::{GenerationClient, GenerationError, GenerationRequest};
pub use rag::{
    assemble_context, Answerable, ComparisonResult, DirectResponse, QueryAnswer, QueryRecord,
    RagResponse, ResponseMetadata, SessionState, Timings,
};
pub use retrieval::{filter_ranked, IndexHit, SearchResult, VectorIndexClient};

#[cfg(test)]
pub use llm::MockGenerationClient;
#[cfg(test)]
pub use retrieval::MockVectorIndexClient;
