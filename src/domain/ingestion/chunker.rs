//! Chunking configuration and the chunk entity

use serde::{Deserialize, Serialize};

use crate::domain::article::SourceMetadata;
use crate::domain::DomainError;

/// Configuration for segmenting article text into chunks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap carried from one chunk into the next, in characters
    pub chunk_overlap: usize,
    /// Sentence-like units shorter than this are merged into the previous unit
    pub min_sentence_len: usize,
}

impl ChunkingConfig {
    /// Create a new chunking configuration
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
            min_sentence_len: 20,
        }
    }

    /// Set the minimum sentence length
    pub fn with_min_sentence_len(mut self, min_len: usize) -> Self {
        self.min_sentence_len = min_len;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.chunk_size == 0 {
            return Err(DomainError::validation("chunk_size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(DomainError::validation(
                "chunk_overlap must be less than chunk_size",
            ));
        }

        Ok(())
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 300,
            chunk_overlap: 50,
            min_sentence_len: 20,
        }
    }
}

/// A retrievable excerpt of an article.
///
/// Created by the segmenter, never mutated afterwards. Concatenating a
/// document's chunks in `sequence_index` order with overlap prefixes removed
/// reconstructs the normalized source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextChunk {
    /// Deterministic id: `{pmid}_{sequence_index}`
    pub id: String,
    /// Normalized, non-empty chunk text
    pub content: String,
    /// 0-based position within the source article
    pub sequence_index: usize,
    /// Copy of the originating article's fields
    pub source_metadata: SourceMetadata,
}

impl TextChunk {
    /// Create a new chunk; the id is derived from the metadata's pmid
    pub fn new(content: impl Into<String>, sequence_index: usize, metadata: SourceMetadata) -> Self {
        Self {
            id: format!("{}_{}", metadata.pmid, sequence_index),
            content: content.into(),
            sequence_index,
            source_metadata: metadata,
        }
    }

    /// Content length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Character-based string helpers shared by the segmentation code.
///
/// All chunk size math is in Unicode scalar values so CJK text is counted
/// the same way as ASCII.
pub mod helpers {
    /// Length in characters
    pub fn char_len(text: &str) -> usize {
        text.chars().count()
    }

    /// The last `n` characters of `text` (the whole text if shorter)
    pub fn char_suffix(text: &str, n: usize) -> &str {
        let len = char_len(text);
        if len <= n {
            return text;
        }
        let skip = len - n;
        match text.char_indices().nth(skip) {
            Some((byte_idx, _)) => &text[byte_idx..],
            None => text,
        }
    }

    /// Drop everything up to and including the first space, so the result
    /// starts at a word boundary. Returns the input unchanged when it
    /// contains no space.
    pub fn trim_to_word_boundary(text: &str) -> &str {
        match text.find(' ') {
            Some(idx) => &text[idx + 1..],
            None => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_config_default() {
        let config = ChunkingConfig::default();
        assert_eq!(config.chunk_size, 300);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.min_sentence_len, 20);
    }

    #[test]
    fn test_chunking_config_validation() {
        let config = ChunkingConfig::new(300, 50);
        assert!(config.validate().is_ok());

        let invalid = ChunkingConfig::new(0, 0);
        assert!(invalid.validate().is_err());

        let invalid = ChunkingConfig::new(100, 100);
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_chunk_id_is_deterministic() {
        let metadata = SourceMetadata {
            pmid: "987".to_string(),
            ..Default::default()
        };
        let chunk = TextChunk::new("some content", 3, metadata);
        assert_eq!(chunk.id, "987_3");
    }

    #[test]
    fn test_char_suffix_multibyte() {
        assert_eq!(helpers::char_suffix("abcdef", 3), "def");
        assert_eq!(helpers::char_suffix("ab", 5), "ab");
        assert_eq!(helpers::char_suffix("心筋梗塞の治療", 2), "治療");
    }

    #[test]
    fn test_trim_to_word_boundary() {
        assert_eq!(helpers::trim_to_word_boundary("lo world again"), "world again");
        assert_eq!(helpers::trim_to_word_boundary("noboundary"), "noboundary");
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(helpers::char_len("abc"), 3);
        assert_eq!(helpers::char_len("高血圧"), 3);
    }
}
