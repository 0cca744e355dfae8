//! Chunking domain types
//!
//! Chunk sizing configuration, the chunk entity, and the character-based
//! helpers the segmenter builds on.

mod chunker;

pub use chunker::{helpers, ChunkingConfig, TextChunk};
