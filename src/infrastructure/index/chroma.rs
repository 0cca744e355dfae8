//! Chroma-backed vector index client
//!
//! Query embeddings come from an Ollama embeddings endpoint; similarity
//! search and counting go against a Chroma server. The collection id is
//! resolved from its name once and cached for the life of the client.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::config::{IndexConfig, LlmConfig};
use crate::domain::retrieval::{IndexHit, VectorIndexClient};
use crate::domain::DomainError;

const INDEX_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct ChromaVectorStore {
    client: reqwest::Client,
    chroma_url: String,
    collection: String,
    collection_id: OnceCell<String>,
    embed_url: String,
    embedding_model: String,
}

impl ChromaVectorStore {
    pub fn new(
        chroma_url: impl Into<String>,
        collection: impl Into<String>,
        embed_url: impl Into<String>,
        embedding_model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            chroma_url: chroma_url.into().trim_end_matches('/').to_string(),
            collection: collection.into(),
            collection_id: OnceCell::new(),
            embed_url: embed_url.into().trim_end_matches('/').to_string(),
            embedding_model: embedding_model.into(),
        }
    }

    pub fn from_config(index: &IndexConfig, llm: &LlmConfig) -> Self {
        Self::new(
            &index.base_url,
            &index.collection,
            &llm.base_url,
            &llm.embedding_model,
        )
    }

    async fn collection_id(&self) -> Result<&str, DomainError> {
        self.collection_id
            .get_or_try_init(|| async {
                let url = format!("{}/api/v1/collections/{}", self.chroma_url, self.collection);
                let response = self
                    .client
                    .get(&url)
                    .timeout(INDEX_REQUEST_TIMEOUT)
                    .send()
                    .await
                    .map_err(|e| DomainError::provider("chroma", e.to_string()))?;

                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Err(DomainError::not_found(format!(
                        "collection '{}' not found",
                        self.collection
                    )));
                }
                if !response.status().is_success() {
                    return Err(DomainError::provider(
                        "chroma",
                        format!("HTTP {}", response.status()),
                    ));
                }

                let collection: ChromaCollection = response
                    .json()
                    .await
                    .map_err(|e| DomainError::provider("chroma", e.to_string()))?;

                debug!(collection = %self.collection, id = %collection.id, "resolved collection");
                Ok(collection.id)
            })
            .await
            .map(String::as_str)
    }
}

#[async_trait]
impl VectorIndexClient for ChromaVectorStore {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, DomainError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.embed_url);
        let body = serde_json::json!({
            "model": self.embedding_model,
            "input": texts,
        });

        let response = self
            .client
            .post(&url)
            .timeout(INDEX_REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider("ollama-embed", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::provider(
                "ollama-embed",
                format!("HTTP {}", response.status()),
            ));
        }

        let parsed: OllamaEmbedResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider("ollama-embed", e.to_string()))?;

        Ok(parsed.embeddings)
    }

    async fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexHit>, DomainError> {
        let collection_id = self.collection_id().await?;
        let url = format!(
            "{}/api/v1/collections/{}/query",
            self.chroma_url, collection_id
        );
        let body = serde_json::json!({
            "query_embeddings": [embedding],
            "n_results": k,
            "include": ["documents", "metadatas", "distances"],
        });

        let response = self
            .client
            .post(&url)
            .timeout(INDEX_REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::provider("chroma", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::provider(
                "chroma",
                format!("HTTP {}", response.status()),
            ));
        }

        let parsed: ChromaQueryResponse = response
            .json()
            .await
            .map_err(|e| DomainError::provider("chroma", e.to_string()))?;

        let ids = parsed.ids.into_iter().next().unwrap_or_default();
        let documents = parsed.documents.into_iter().next().unwrap_or_default();
        let metadatas = parsed.metadatas.into_iter().next().unwrap_or_default();
        let distances = parsed.distances.into_iter().next().unwrap_or_default();

        let hits = ids
            .into_iter()
            .enumerate()
            .map(|(i, chunk_id)| IndexHit {
                chunk_id,
                content: documents.get(i).cloned().flatten().unwrap_or_default(),
                metadata: metadatas.get(i).cloned().flatten().unwrap_or_default(),
                distance: distances.get(i).copied().unwrap_or(1.0),
            })
            .collect();

        Ok(hits)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let collection_id = self.collection_id().await?;
        let url = format!(
            "{}/api/v1/collections/{}/count",
            self.chroma_url, collection_id
        );

        let response = self
            .client
            .get(&url)
            .timeout(INDEX_REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DomainError::provider("chroma", e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::provider(
                "chroma",
                format!("HTTP {}", response.status()),
            ));
        }

        response
            .json::<usize>()
            .await
            .map_err(|e| DomainError::provider("chroma", e.to_string()))
    }
}

// Chroma / Ollama API types

#[derive(Debug, Deserialize)]
struct ChromaCollection {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ChromaQueryResponse {
    #[serde(default)]
    ids: Vec<Vec<String>>,
    #[serde(default)]
    documents: Vec<Vec<Option<String>>>,
    #[serde(default)]
    metadatas: Vec<Vec<Option<HashMap<String, serde_json::Value>>>>,
    #[serde(default)]
    distances: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbedResponse {
    #[serde(default)]
    embeddings: Vec<Vec<f32>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COLLECTION_ID: &str = "11111111-2222-3333-4444-555555555555";

    async fn mount_collection(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v1/collections/medical_docs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": COLLECTION_ID,
                "name": "medical_docs",
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    fn store(server: &MockServer) -> ChromaVectorStore {
        ChromaVectorStore::new(server.uri(), "medical_docs", server.uri(), "all-minilm")
    }

    #[tokio::test]
    async fn test_embed_batches_texts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/embed"))
            .and(body_partial_json(serde_json::json!({
                "model": "all-minilm",
                "input": ["first text", "second text"],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "embeddings": [[0.1, 0.2], [0.3, 0.4]],
            })))
            .mount(&server)
            .await;

        let store = store(&server);
        let embeddings = store
            .embed(&["first text".to_string(), "second text".to_string()])
            .await
            .unwrap();

        assert_eq!(embeddings, vec![vec![0.1, 0.2], vec![0.3, 0.4]]);
    }

    #[tokio::test]
    async fn test_query_parses_hits_and_caches_collection_id() {
        let server = MockServer::start().await;
        mount_collection(&server).await;

        Mock::given(method("POST"))
            .and(path(format!("/api/v1/collections/{COLLECTION_ID}/query")))
            .and(body_partial_json(serde_json::json!({"n_results": 2})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ids": [["12345_0", "67890_1"]],
                "documents": [["first chunk", "second chunk"]],
                "metadatas": [[{"pmid": "12345"}, {"pmid": "67890"}]],
                "distances": [[0.1, 0.4]],
            })))
            .expect(2)
            .mount(&server)
            .await;

        let store = store(&server);
        let hits = store.query(&[0.1, 0.2], 2).await.unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].chunk_id, "12345_0");
        assert_eq!(hits[0].content, "first chunk");
        assert_eq!(hits[0].metadata["pmid"], "12345");
        assert!((hits[0].distance - 0.1).abs() < 1e-6);

        // second query must reuse the cached collection id (resolve mock
        // expects exactly one call)
        let again = store.query(&[0.1, 0.2], 2).await.unwrap();
        assert_eq!(again.len(), 2);
    }

    #[tokio::test]
    async fn test_query_unknown_collection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/collections/medical_docs"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let store = store(&server);
        let error = store.query(&[0.1], 1).await.unwrap_err();
        assert!(matches!(error, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count() {
        let server = MockServer::start().await;
        mount_collection(&server).await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/collections/{COLLECTION_ID}/count")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(1234)))
            .mount(&server)
            .await;

        let store = store(&server);
        assert_eq!(store.count().await.unwrap(), 1234);
    }

    #[tokio::test]
    async fn test_empty_embed_input_short_circuits() {
        let server = MockServer::start().await;
        let store = store(&server);
        assert!(store.embed(&[]).await.unwrap().is_empty());
    }
}
