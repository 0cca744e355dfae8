//! Per-article ingestion: searchable content, cleaning, normalization,
//! segmentation

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::article::Article;
use crate::domain::ingestion::{ChunkingConfig, TextChunk};
use crate::domain::DomainError;
use crate::infrastructure::text::{clean, normalize, SentenceSegmenter};

/// Counters accumulated over one ingestion run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestionStats {
    pub articles_processed: usize,
    pub articles_skipped: usize,
    pub chunks_produced: usize,
}

/// Turns article records into index-ready chunks.
///
/// Malformed records are skipped and counted, never fatal to the run; the
/// bulk fetching of articles happens upstream of this pipeline.
#[derive(Debug, Clone)]
pub struct IngestionPipeline {
    segmenter: SentenceSegmenter,
}

impl IngestionPipeline {
    pub fn new(config: ChunkingConfig) -> Result<Self, DomainError> {
        Ok(Self {
            segmenter: SentenceSegmenter::new(config)?,
        })
    }

    /// Join the article's retrievable fields into one labeled text body,
    /// primary fields first.
    pub fn searchable_content(article: &Article) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(title) = &article.title {
            if !title.is_empty() {
                parts.push(format!("Title: {title}"));
            }
        }

        if let Some(abstract_text) = &article.abstract_text {
            if !abstract_text.is_empty() {
                parts.push(format!("Abstract: {abstract_text}"));
            }
        }

        if !article.mesh_terms.is_empty() {
            parts.push(format!("MeSH Terms: {}", article.mesh_terms.join(", ")));
        }

        if !article.keywords.is_empty() {
            parts.push(format!("Keywords: {}", article.keywords.join(", ")));
        }

        parts.join("\n\n")
    }

    /// Process one article into chunks.
    ///
    /// Returns `None` for records that cannot be ingested: a missing
    /// identifier, or no retrievable text once cleaned.
    pub fn process_article(&self, article: &Article) -> Option<Vec<TextChunk>> {
        if article.pmid.is_empty() {
            warn!("skipping article without pmid");
            return None;
        }

        let content = Self::searchable_content(article);
        let cleaned = clean(&content);
        if cleaned.is_empty() {
            warn!(pmid = %article.pmid, "skipping article without retrievable text");
            return None;
        }

        let normalized = normalize(&cleaned);
        Some(self.segmenter.segment(&normalized, &article.source_metadata()))
    }

    /// Process a batch of articles, accumulating chunks and statistics
    pub fn process_corpus(&self, articles: &[Article]) -> (Vec<TextChunk>, IngestionStats) {
        let mut chunks = Vec::new();
        let mut stats = IngestionStats::default();

        for article in articles {
            match self.process_article(article) {
                Some(article_chunks) => {
                    stats.articles_processed += 1;
                    stats.chunks_produced += article_chunks.len();
                    chunks.extend(article_chunks);
                }
                None => stats.articles_skipped += 1,
            }
        }

        info!(
            processed = stats.articles_processed,
            skipped = stats.articles_skipped,
            chunks = stats.chunks_produced,
            "corpus ingestion finished"
        );
        (chunks, stats)
    }
}
