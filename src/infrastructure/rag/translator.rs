//! Query translation into the corpus language

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::domain::llm::{GenerationClient, GenerationRequest};
use crate::domain::rag::prompt;

const TRANSLATION_MAX_TOKENS: u32 = 50;
const TRANSLATION_TEMPERATURE: f32 = 0.1;

/// Translates Japanese questions into English retrieval queries.
///
/// Translation failure is never fatal: any transport error or empty model
/// output falls back to the original query, so retrieval always proceeds.
#[derive(Debug, Clone)]
pub struct QueryTranslator {
    client: Arc<dyn GenerationClient>,
    timeout: Duration,
}

impl QueryTranslator {
    pub fn new(client: Arc<dyn GenerationClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Translate `query`, returning the query to retrieve with and the
    /// elapsed time in milliseconds.
    pub async fn translate(&self, query: &str) -> (String, f64) {
        let start = Instant::now();

        let request = GenerationRequest::new(prompt::translation_prompt(query))
            .with_temperature(TRANSLATION_TEMPERATURE)
            .with_max_tokens(TRANSLATION_MAX_TOKENS)
            .with_timeout(self.timeout);

        let translated = match self.client.complete(request).await {
            Ok(response) => Self::postprocess(&response),
            Err(error) => {
                warn!(%error, "query translation failed, using original query");
                String::new()
            }
        };

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        if translated.is_empty() {
            return (query.to_string(), elapsed_ms);
        }

        info!(original = %query, translated = %translated, "query translated");
        (translated, elapsed_ms)
    }

    /// Collapse newlines, trim, and keep only the text before the first
    /// period so trailing commentary sentences are discarded.
    fn postprocess(response: &str) -> String {
        let collapsed = response.replace('\n', " ");
        let trimmed = collapsed.trim();

        match trimmed.find('.') {
            Some(idx) => trimmed[..idx].trim().to_string(),
            None => trimmed.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::{GenerationError, MockGenerationClient};

    fn translator(client: MockGenerationClient) -> QueryTranslator {
        QueryTranslator::new(Arc::new(client), Duration::from_secs(15))
    }

    #[tokio::test]
    async fn test_translates_and_trims() {
        let client = MockGenerationClient::new().with_response("COVID-19 treatment options\n");
        let (translated, _elapsed) = translator(client).translate("COVID-19の治療法").await;
        assert_eq!(translated, "COVID-19 treatment options");
    }

    #[tokio::test]
    async fn test_keeps_only_text_before_first_period() {
        let client = MockGenerationClient::new()
            .with_response("Cancer immunotherapy advances. This translation uses precise terms.");
        let (translated, _) = translator(client).translate("がん免疫療法").await;
        assert_eq!(translated, "Cancer immunotherapy advances");
    }

    #[tokio::test]
    async fn test_empty_response_falls_back_to_original() {
        let client = MockGenerationClient::new().with_response("   \n ");
        let (translated, _) = translator(client).translate("遠隔医療の効果").await;
        assert_eq!(translated, "遠隔医療の効果");
    }

    #[tokio::test]
    async fn test_transport_error_falls_back_to_original() {
        let client = MockGenerationClient::new().with_error(GenerationError::Timeout);
        let (translated, elapsed) = translator(client).translate("高血圧の診断基準").await;
        assert_eq!(translated, "高血圧の診断基準");
        assert!(elapsed >= 0.0);
    }

    #[tokio::test]
    async fn test_translation_request_uses_short_token_limit() {
        let client = Arc::new(MockGenerationClient::new().with_response("ok response"));
        let translator = QueryTranslator::new(client.clone(), Duration::from_secs(15));
        translator.translate("質問").await;

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].max_tokens, TRANSLATION_MAX_TOKENS);
        assert_eq!(calls[0].timeout, Duration::from_secs(15));
        assert!(calls[0].prompt.contains("Japanese: 質問"));
    }
}
