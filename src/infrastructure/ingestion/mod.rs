//! Corpus ingestion pipeline

mod pipeline;

pub use pipeline::{IngestionPipeline, IngestionStats};
