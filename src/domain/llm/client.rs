//! Generation client trait and failure taxonomy

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use super::GenerationRequest;

/// Failure classes the pipeline handles differently.
///
/// Timeouts and connection failures map to distinct user-facing fallback
/// answers; everything else carries its detail along.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request timed out")]
    Timeout,

    #[error("failed to connect to generation service")]
    Connection,

    #[error("generation failed: {message}")]
    Other { message: String },
}

impl GenerationError {
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

/// Trait for the external text-generation service.
///
/// One synchronous request/response call per invocation; no retries are
/// performed at this seam.
#[async_trait]
pub trait GenerationClient: Send + Sync + Debug {
    /// Run a completion and return the raw response text
    async fn complete(&self, request: GenerationRequest) -> Result<String, GenerationError>;

    /// List the models the service currently serves (health probe)
    async fn list_models(&self) -> Result<Vec<String>, GenerationError>;

    /// The model this client generates with
    fn model_name(&self) -> &str;
}
