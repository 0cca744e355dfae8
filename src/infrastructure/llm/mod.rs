//! Generation-service clients

mod ollama;

pub use ollama::OllamaClient;
