//! Configuration loader for PersonaChat.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`AppConfig`]. Falls back to defaults when the file is missing or
//! malformed. The API key is read from the environment, never from the file.

use std::path::Path;

use personachat_types::config::{AppConfig, ExchangeConfig};
use personachat_types::error::ConfigError;
use secrecy::SecretString;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but cannot be read or parsed, logs a warning and
///   returns the default.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    match try_load_app_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No {CONFIG_FILE} found in {}, using defaults",
                data_dir.display()
            );
            AppConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            AppConfig::default()
        }
    }
}

/// Load configuration, distinguishing a missing file (`Ok(None)`) from a
/// broken one.
pub async fn try_load_app_config(data_dir: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                reason: err.to_string(),
            });
        }
    };

    toml::from_str::<AppConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: config_path.display().to_string(),
            reason: err.to_string(),
        })
}

/// Read the API key from the environment variable named in the config.
pub fn resolve_api_key(config: &ExchangeConfig) -> Result<SecretString, ConfigError> {
    resolve_api_key_with(config, |name| std::env::var(name).ok())
}

/// Like [`resolve_api_key`], with an injectable variable lookup.
///
/// Blank values count as missing.
pub fn resolve_api_key_with(
    config: &ExchangeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString, ConfigError> {
    lookup(&config.api_key_env)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| ConfigError::MissingApiKey(config.api_key_env.clone()))
}

#[cfg(test)]
mod tests {
    use personachat_types::config::{DEFAULT_API_KEY_ENV, DEFAULT_MODEL};
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn load_app_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.exchange.model, DEFAULT_MODEL);
        assert!(try_load_app_config(tmp.path()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn load_app_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
[exchange]
base_url = "http://localhost:8080/v1beta"
model = "gemini-1.5-flash"
api_key_env = "MY_GEMINI_KEY"
empty_fallback = "Nothing to say."
"#,
        )
        .await
        .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.exchange.base_url, "http://localhost:8080/v1beta");
        assert_eq!(config.exchange.model, "gemini-1.5-flash");
        assert_eq!(config.exchange.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.exchange.empty_fallback, "Nothing to say.");
    }

    #[tokio::test]
    async fn load_app_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_app_config(tmp.path()).await;
        assert_eq!(config.exchange.model, DEFAULT_MODEL);

        let err = try_load_app_config(tmp.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_api_key_reads_named_variable() {
        let config = ExchangeConfig::default();
        let key = resolve_api_key_with(&config, |name| {
            (name == DEFAULT_API_KEY_ENV).then(|| "secret-value".to_string())
        })
        .unwrap();
        assert_eq!(key.expose_secret(), "secret-value");
    }

    #[test]
    fn resolve_api_key_missing_or_blank_is_error() {
        let config = ExchangeConfig::default();

        let err = resolve_api_key_with(&config, |_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(ref name) if name == DEFAULT_API_KEY_ENV));

        let err = resolve_api_key_with(&config, |_| Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey(_)));
    }
}
