//! Sentence-aware segmentation of article text into overlapping chunks

use tracing::debug;

use crate::domain::article::SourceMetadata;
use crate::domain::ingestion::{helpers, ChunkingConfig, TextChunk};
use crate::domain::DomainError;

/// Splits normalized article text into retrievable chunks.
///
/// Sentences are never broken: the buffer is flushed whenever appending the
/// next sentence would push it past `chunk_size`, and the next buffer is
/// seeded with a word-boundary-safe tail of the flushed chunk. A single
/// sentence longer than `chunk_size` becomes one oversized chunk.
#[derive(Debug, Clone)]
pub struct SentenceSegmenter {
    config: ChunkingConfig,
}

impl SentenceSegmenter {
    pub fn new(config: ChunkingConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    /// Segment `text` into chunks carrying `metadata`.
    ///
    /// Empty input yields an empty sequence; sequence indices are assigned
    /// in emission order starting at 0.
    pub fn segment(&self, text: &str, metadata: &SourceMetadata) -> Vec<TextChunk> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let sentences = self.split_sentences(text);

        let mut chunks: Vec<TextChunk> = Vec::new();
        let mut buffer = String::new();

        for sentence in sentences {
            if buffer.is_empty() {
                buffer = sentence;
                continue;
            }

            let would_be = helpers::char_len(&buffer) + 1 + helpers::char_len(&sentence);
            if would_be > self.config.chunk_size {
                let content = buffer.trim().to_string();
                let tail = self.overlap_tail(&content);
                chunks.push(TextChunk::new(content, chunks.len(), metadata.clone()));

                buffer = if tail.is_empty() {
                    sentence
                } else {
                    format!("{tail} {sentence}")
                };
            } else {
                buffer.push(' ');
                buffer.push_str(&sentence);
            }
        }

        if !buffer.trim().is_empty() {
            chunks.push(TextChunk::new(
                buffer.trim().to_string(),
                chunks.len(),
                metadata.clone(),
            ));
        }

        debug!(
            pmid = %metadata.pmid,
            chunks = chunks.len(),
            "segmented article text"
        );
        chunks
    }

    /// Split on `.` `!` `?` followed by whitespace, keeping the punctuation
    /// with its sentence. Units shorter than `min_sentence_len` are merged
    /// into the previous unit so abbreviations and clipped text do not
    /// produce fragment chunks.
    fn split_sentences(&self, text: &str) -> Vec<String> {
        let mut units: Vec<String> = Vec::new();
        let mut current = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            current.push(c);
            if matches!(c, '.' | '!' | '?')
                && chars.peek().is_some_and(|next| next.is_whitespace())
            {
                while chars.peek().is_some_and(|next| next.is_whitespace()) {
                    chars.next();
                }
                units.push(std::mem::take(&mut current));
            }
        }
        if !current.trim().is_empty() {
            units.push(current);
        }

        let mut merged: Vec<String> = Vec::new();
        for unit in units {
            let unit = unit.trim();
            if unit.is_empty() {
                continue;
            }
            if helpers::char_len(unit) < self.config.min_sentence_len && !merged.is_empty() {
                let previous = merged.last_mut().unwrap();
                previous.push(' ');
                previous.push_str(unit);
            } else {
                merged.push(unit.to_string());
            }
        }
        merged
    }

    /// Trailing substring of at most `chunk_overlap` characters, cut forward
    /// to the next whitespace boundary so it never starts mid-word.
    fn overlap_tail(&self, content: &str) -> String {
        if self.config.chunk_overlap == 0 {
            return String::new();
        }
        if helpers::char_len(content) <= self.config.chunk_overlap {
            return content.to_string();
        }

        let tail = helpers::char_suffix(content, self.config.chunk_overlap);
        helpers::trim_to_word_boundary(tail).trim().to_string()
    }
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self {
            config: ChunkingConfig::default(),
        }
    }
}
