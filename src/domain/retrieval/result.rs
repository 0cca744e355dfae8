//! Search result entity

use serde::{Deserialize, Serialize};

use super::IndexHit;
use crate::domain::article::SourceMetadata;

/// A ranked retrieval candidate with restored metadata.
///
/// Produced fresh for every query, never persisted. `similarity_score` is
/// cosine-derived, conceptually in [-1, 1]; higher means more relevant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chunk_id: String,
    pub content: String,
    pub metadata: SourceMetadata,
    pub similarity_score: f32,
}

impl SearchResult {
    /// Convert a raw index hit: similarity is `1 - distance` and the
    /// flattened metadata is parsed back into structured form.
    pub fn from_hit(hit: IndexHit) -> Self {
        Self {
            chunk_id: hit.chunk_id,
            content: hit.content,
            metadata: SourceMetadata::restore(&hit.metadata),
            similarity_score: 1.0 - hit.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hit_converts_distance_to_similarity() {
        let hit = IndexHit::new("12345_0", "chunk text", 0.25);
        let result = SearchResult::from_hit(hit);

        assert_eq!(result.chunk_id, "12345_0");
        assert_eq!(result.content, "chunk text");
        assert!((result.similarity_score - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_from_hit_restores_list_metadata() {
        let mut metadata = std::collections::HashMap::new();
        metadata.insert(
            "pmid".to_string(),
            serde_json::Value::String("12345".into()),
        );
        metadata.insert(
            "authors".to_string(),
            serde_json::Value::String(r#"["Tanaka K","Suzuki H"]"#.into()),
        );

        let hit = IndexHit::new("12345_0", "text", 0.1).with_metadata(metadata);
        let result = SearchResult::from_hit(hit);

        assert_eq!(result.metadata.pmid, "12345");
        assert_eq!(
            result.metadata.authors,
            vec!["Tanaka K".to_string(), "Suzuki H".to_string()]
        );
    }
}
