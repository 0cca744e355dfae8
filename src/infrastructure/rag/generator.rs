//! Answer generation with degraded-fallback handling

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::domain::llm::{GenerationClient, GenerationError, GenerationRequest};
use crate::domain::rag::{messages, prompt};

const ANSWER_TEMPERATURE: f32 = 0.1;
const ANSWER_TOP_P: f32 = 0.9;
const ANSWER_MAX_TOKENS: u32 = 1000;

/// Builds prompts and invokes the generation model.
///
/// Failures never escape as errors: the fallback message becomes the answer
/// and the elapsed time is reported as zero, which callers read as the
/// failure marker.
#[derive(Debug, Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn GenerationClient>,
    timeout: Duration,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn GenerationClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Grounded mode: answer only from the assembled literature context
    pub async fn generate_grounded(&self, question: &str, context: &str) -> (String, f64) {
        self.generate(prompt::grounded_prompt(context, question)).await
    }

    /// Ungrounded mode: general knowledge only, no retrieval involved
    pub async fn generate_direct(&self, question: &str) -> (String, f64) {
        self.generate(prompt::ungrounded_prompt(question)).await
    }

    async fn generate(&self, prompt: String) -> (String, f64) {
        let start = Instant::now();

        let request = GenerationRequest::new(prompt)
            .with_temperature(ANSWER_TEMPERATURE)
            .with_top_p(ANSWER_TOP_P)
            .with_max_tokens(ANSWER_MAX_TOKENS)
            .with_timeout(self.timeout);

        match self.client.complete(request).await {
            Ok(answer) => {
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                info!(generation_ms = elapsed_ms, "answer generated");

                if answer.is_empty() {
                    (messages::EMPTY_GENERATION_ANSWER.to_string(), elapsed_ms)
                } else {
                    (answer, elapsed_ms)
                }
            }
            Err(GenerationError::Timeout) => {
                error!("answer generation timed out");
                (messages::TIMEOUT_ANSWER.to_string(), 0.0)
            }
            Err(GenerationError::Connection) => {
                error!("failed to connect to generation service");
                (messages::CONNECTION_ANSWER.to_string(), 0.0)
            }
            Err(error) => {
                error!(%error, "answer generation failed");
                (messages::generation_failure_answer(&error.to_string()), 0.0)
            }
        }
    }
}
