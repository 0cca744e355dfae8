//! Query response types

use serde::{Deserialize, Serialize};

use crate::domain::retrieval::SearchResult;

/// Timing breakdown of one query transaction, in milliseconds.
///
/// A `generation_ms` of zero paired with one of the fixed fallback answers
/// marks a failed or skipped generation stage, not an instant response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timings {
    pub search_ms: f64,
    pub generation_ms: f64,
    pub total_ms: f64,
}

/// Retrieval parameters and outcome facts recorded with every response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// The translated query actually issued against the index
    pub translated_query: String,
    pub similarity_threshold: f32,
    pub requested_top_k: usize,
    pub documents_found: usize,
    /// Generation model that produced (or failed to produce) the answer
    pub model: String,
}

/// Response of a grounded (retrieval-augmented) query.
///
/// Immutable after construction; one instance per query, caller-owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagResponse {
    pub query: String,
    pub answer: String,
    /// Ordered by descending similarity
    pub source_documents: Vec<SearchResult>,
    pub search_time_ms: f64,
    pub generation_time_ms: f64,
    pub total_time_ms: f64,
    pub metadata: ResponseMetadata,
}

/// Response of an ungrounded (direct-generation) query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectResponse {
    pub query: String,
    pub answer: String,
    pub generation_time_ms: f64,
    pub total_time_ms: f64,
    pub model: String,
}

/// Common read surface over both response shapes
pub trait Answerable {
    fn answer(&self) -> &str;

    /// Number of source documents backing the answer (zero when ungrounded)
    fn source_count(&self) -> usize;

    fn timings(&self) -> Timings;
}

impl Answerable for RagResponse {
    fn answer(&self) -> &str {
        &self.answer
    }

    fn source_count(&self) -> usize {
        self.source_documents.len()
    }

    fn timings(&self) -> Timings {
        Timings {
            search_ms: self.search_time_ms,
            generation_ms: self.generation_time_ms,
            total_ms: self.total_time_ms,
        }
    }
}

impl Answerable for DirectResponse {
    fn answer(&self) -> &str {
        &self.answer
    }

    fn source_count(&self) -> usize {
        0
    }

    fn timings(&self) -> Timings {
        Timings {
            search_ms: 0.0,
            generation_ms: self.generation_time_ms,
            total_ms: self.total_time_ms,
        }
    }
}

/// Tagged union over the two query modes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum QueryAnswer {
    Grounded(RagResponse),
    Ungrounded(DirectResponse),
}

impl Answerable for QueryAnswer {
    fn answer(&self) -> &str {
        match self {
            Self::Grounded(response) => response.answer(),
            Self::Ungrounded(response) => response.answer(),
        }
    }

    fn source_count(&self) -> usize {
        match self {
            Self::Grounded(response) => response.source_count(),
            Self::Ungrounded(response) => response.source_count(),
        }
    }

    fn timings(&self) -> Timings {
        match self {
            Self::Grounded(response) => response.timings(),
            Self::Ungrounded(response) => response.timings(),
        }
    }
}

/// Both answers for the same question, for side-by-side evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub grounded: RagResponse,
    pub ungrounded: DirectResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rag_response() -> RagResponse {
        RagResponse {
            query: "q".to_string(),
            answer: "grounded answer".to_string(),
            source_documents: Vec::new(),
            search_time_ms: 12.0,
            generation_time_ms: 340.0,
            total_time_ms: 360.0,
            metadata: ResponseMetadata {
                translated_query: "q-en".to_string(),
                similarity_threshold: 0.3,
                requested_top_k: 5,
                documents_found: 0,
                model: "llama3.1:8b-instruct-q4_0".to_string(),
            },
        }
    }

    #[test]
    fn test_answerable_over_grounded() {
        let answer = QueryAnswer::Grounded(rag_response());

        assert_eq!(answer.answer(), "grounded answer");
        assert_eq!(answer.source_count(), 0);
        assert_eq!(answer.timings().search_ms, 12.0);
        assert_eq!(answer.timings().total_ms, 360.0);
    }

    #[test]
    fn test_answerable_over_ungrounded() {
        let answer = QueryAnswer::Ungrounded(DirectResponse {
            query: "q".to_string(),
            answer: "direct answer".to_string(),
            generation_time_ms: 200.0,
            total_time_ms: 201.0,
            model: "m".to_string(),
        });

        assert_eq!(answer.answer(), "direct answer");
        assert_eq!(answer.source_count(), 0);
        assert_eq!(answer.timings().search_ms, 0.0);
        assert_eq!(answer.timings().generation_ms, 200.0);
    }

    #[test]
    fn test_query_answer_serializes_with_mode_tag() {
        let answer = QueryAnswer::Grounded(rag_response());
        let json = serde_json::to_value(&answer).unwrap();
        assert_eq!(json["mode"], "grounded");
    }
}
