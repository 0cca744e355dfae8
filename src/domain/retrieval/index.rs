//! Vector index client trait

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// A raw candidate as returned by the index, before metadata restoration.
///
/// `distance` is the index's distance measure; similarity is `1 - distance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexHit {
    pub chunk_id: String,
    pub content: String,
    pub metadata: HashMap<String, serde_json::Value>,
    pub distance: f32,
}

impl IndexHit {
    pub fn new(
        chunk_id: impl Into<String>,
        content: impl Into<String>,
        distance: f32,
    ) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            content: content.into(),
            metadata: HashMap::new(),
            distance,
        }
    }

    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}

/// Trait for the external vector index.
///
/// The index is assumed to return query results already sorted by ascending
/// distance (descending similarity); the core does not re-sort.
#[async_trait]
pub trait VectorIndexClient: Send + Sync + Debug {
    /// Embed a batch of texts
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError>;

    /// Nearest-neighbor query for the `k` closest chunks
    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexHit>, DomainError>;

    /// Number of chunks currently indexed
    async fn count(&self) -> Result<usize, DomainError>;
}
