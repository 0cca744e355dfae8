//! Ollama generation client

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::llm::{GenerationClient, GenerationError, GenerationRequest};

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const MODEL_LIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for Ollama's generate API.
///
/// Each call carries its own timeout; no retries happen here, a failed call
/// surfaces its classified [`GenerationError`] to the pipeline.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_base_url(model, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

/// Classify a transport error into the pipeline's failure taxonomy
fn classify_error(error: reqwest::Error) -> GenerationError {
    if error.is_timeout() {
        GenerationError::Timeout
    } else if error.is_connect() {
        GenerationError::Connection
    } else {
        GenerationError::other(error.to_string())
    }
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let body = OllamaGenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
                top_p: request.top_p,
                num_predict: request.max_tokens,
            },
        };

        debug!(model = %self.model, timeout_secs = request.timeout.as_secs(), "generation request");

        let response = self
            .client
            .post(self.generate_url())
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(classify_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(GenerationError::other(format!("HTTP {status}: {detail}")));
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(classify_error)?;

        Ok(parsed.response)
    }

    async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let response = self
            .client
            .get(self.tags_url())
            .timeout(MODEL_LIST_TIMEOUT)
            .send()
            .await
            .map_err(classify_error)?;

        if !response.status().is_success() {
            return Err(GenerationError::other(format!("HTTP {}", response.status())));
        }

        let parsed: OllamaTagsResponse = response
            .json()
            .await
            .map_err(classify_error)?;

        Ok(parsed.models.into_iter().map(|m| m.name).collect())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_complete_returns_response_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.1:8b-instruct-q4_0",
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "アスピリンは血小板凝集を抑制します。",
                "done": true,
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url("llama3.1:8b-instruct-q4_0", server.uri());
        let answer = client
            .complete(GenerationRequest::new("質問"))
            .await
            .unwrap();

        assert_eq!(answer, "アスピリンは血小板凝集を抑制します。");
    }

    #[tokio::test]
    async fn test_complete_sends_sampling_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "options": {"temperature": 0.1, "top_p": 0.9, "num_predict": 1000}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "ok"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url("m", server.uri());
        let request = GenerationRequest::new("p").with_top_p(0.9);
        client.complete(request).await.unwrap();
    }

    #[tokio::test]
    async fn test_http_error_maps_to_other() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url("m", server.uri());
        let error = client
            .complete(GenerationRequest::new("p"))
            .await
            .unwrap_err();

        match error {
            GenerationError::Other { message } => {
                assert!(message.contains("500"));
                assert!(message.contains("model not loaded"));
            }
            other => panic!("expected Other, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_server_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"response": "late"}))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url("m", server.uri());
        let request = GenerationRequest::new("p").with_timeout(Duration::from_millis(100));
        let error = client.complete(request).await.unwrap_err();

        assert!(matches!(error, GenerationError::Timeout));
    }

    #[tokio::test]
    async fn test_unreachable_server_maps_to_connection() {
        // nothing listens on this port
        let client = OllamaClient::with_base_url("m", "http://127.0.0.1:1");
        let request = GenerationRequest::new("p").with_timeout(Duration::from_secs(2));
        let error = client.complete(request).await.unwrap_err();

        assert!(matches!(
            error,
            GenerationError::Connection | GenerationError::Timeout
        ));
    }

    #[tokio::test]
    async fn test_list_models() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [
                    {"name": "llama3.1:8b-instruct-q4_0"},
                    {"name": "all-minilm"}
                ]
            })))
            .mount(&server)
            .await;

        let client = OllamaClient::with_base_url("m", server.uri());
        let models = client.list_models().await.unwrap();
        assert_eq!(models, vec!["llama3.1:8b-instruct-q4_0", "all-minilm"]);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = OllamaClient::with_base_url("m", "http://localhost:11434/");
        assert_eq!(client.generate_url(), "http://localhost:11434/api/generate");
        assert_eq!(client.model_name(), "m");
    }
}
