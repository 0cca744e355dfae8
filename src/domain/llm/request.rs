//! Generation request options

use std::time::Duration;

/// Options for a single completion call.
///
/// Sampling stays near-deterministic by default; every request carries its
/// own timeout because translation and answer generation run under very
/// different ceilings.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Full prompt text, instructions included
    pub prompt: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
    /// Maximum output length in tokens
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl GenerationRequest {
    /// Create a request with the default near-deterministic sampling options
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: 0.1,
            top_p: None,
            max_tokens: 1000,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = GenerationRequest::new("prompt");
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.top_p, None);
        assert_eq!(request.max_tokens, 1000);
        assert_eq!(request.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("prompt")
            .with_temperature(0.2)
            .with_top_p(0.9)
            .with_max_tokens(50)
            .with_timeout(Duration::from_secs(15));

        assert_eq!(request.temperature, 0.2);
        assert_eq!(request.top_p, Some(0.9));
        assert_eq!(request.max_tokens, 50);
        assert_eq!(request.timeout, Duration::from_secs(15));
    }
}
