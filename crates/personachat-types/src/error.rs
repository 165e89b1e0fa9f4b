use thiserror::Error;

/// Persistence failures from the key/value store.
///
/// "Not found" is never an error: lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupt record at '{key}': {reason}")]
    Corrupt { key: String, reason: String },
}

/// Errors related to bot operations.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("bot not found")]
    NotFound,

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by a chat exchange.
///
/// Failures of the generation endpoint never appear here; they are turned
/// into fallback reply text by the exchange client.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("bot not found")]
    BotNotFound,

    #[error("message cannot be empty")]
    EmptyMessage,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while talking to the generation endpoint.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("stream produced no text")]
    Empty,
}

/// Errors from loading configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),
}
