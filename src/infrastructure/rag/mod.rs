//! The retrieval-augmented generation pipeline

mod generator;
mod pipeline;
mod retriever;
mod translator;

pub use generator::AnswerGenerator;
pub use pipeline::{QueryParams, RagPipeline, SystemStatus};
pub use retriever::{Retrieval, Retriever};
pub use translator::QueryTranslator;
