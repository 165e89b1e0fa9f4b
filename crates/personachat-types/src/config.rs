//! Application configuration types for PersonaChat.
//!
//! `AppConfig` represents the top-level `config.toml` in the data directory.
//! Every field has a default so an empty or missing file is valid.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_ERROR_FALLBACK: &str = "Sorry, something went wrong while contacting the AI.";
pub const DEFAULT_EMPTY_FALLBACK: &str = "Sorry, I could not generate a response right now.";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

/// Settings for the generation endpoint.
///
/// The API key itself is never stored here; `api_key_env` names the
/// environment variable it is read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Reply shown when the endpoint cannot be reached or errors.
    #[serde(default = "default_error_fallback")]
    pub error_fallback: String,

    /// Reply shown when the stream completes without any text.
    #[serde(default = "default_empty_fallback")]
    pub empty_fallback: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_error_fallback() -> String {
    DEFAULT_ERROR_FALLBACK.to_string()
}

fn default_empty_fallback() -> String {
    DEFAULT_EMPTY_FALLBACK.to_string()
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            error_fallback: default_error_fallback(),
            empty_fallback: default_empty_fallback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.exchange.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.exchange.model, DEFAULT_MODEL);
        assert_eq!(config.exchange.api_key_env, DEFAULT_API_KEY_ENV);
        assert_ne!(config.exchange.error_fallback, config.exchange.empty_fallback);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.exchange.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_app_config_partial_override() {
        let toml_str = r#"
[exchange]
base_url = "http://localhost:9000/v1beta"
model = "gemini-1.5-pro"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.exchange.base_url, "http://localhost:9000/v1beta");
        assert_eq!(config.exchange.model, "gemini-1.5-pro");
        assert_eq!(config.exchange.api_key_env, DEFAULT_API_KEY_ENV);
        assert_eq!(config.exchange.empty_fallback, DEFAULT_EMPTY_FALLBACK);
    }
}
