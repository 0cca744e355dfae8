//! Infrastructure layer - external service clients and the concrete pipeline

pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod rag;
pub mod text;

pub use index::ChromaVectorStore;
pub use ingestion::{IngestionPipeline, IngestionStats};
pub use llm::OllamaClient;
pub use logging::init_logging;
pub use rag::{AnswerGenerator, QueryParams, QueryTranslator, RagPipeline, Retriever, SystemStatus};
pub use text::SentenceSegmenter;
