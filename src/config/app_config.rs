use std::time::Duration;

use serde::Deserialize;

use crate::domain::ChunkingConfig;

/// Application configuration
///
/// Layered from `config/default`, `config/local`, and `APP__`-prefixed
/// environment variables; every section falls back to built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub index: IndexConfig,
    pub retrieval: RetrievalConfig,
    pub chunking: ChunkingConfig,
    pub logging: LoggingConfig,
}

/// Generation service (Ollama) settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    pub generation_timeout_secs: u64,
    pub translation_timeout_secs: u64,
}

/// Vector index (Chroma) settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub base_url: String,
    pub collection: String,
}

/// Retrieval filtering defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub similarity_threshold: f32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1:8b-instruct-q4_0".to_string(),
            embedding_model: "all-minilm".to_string(),
            generation_timeout_secs: 120,
            translation_timeout_secs: 15,
        }
    }
}

impl LlmConfig {
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation_timeout_secs)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            collection: "medical_docs".to_string(),
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            similarity_threshold: 0.3,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
