//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, IndexConfig, LlmConfig, LogFormat, LoggingConfig, RetrievalConfig,
};
