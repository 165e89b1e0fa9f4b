//! Application state wiring services to the concrete infra implementations.

use std::sync::Arc;

use anyhow::Context;
use personachat_core::service::bot::BotService;
use personachat_core::service::chat::ChatService;
use personachat_infra::config::{load_app_config, resolve_api_key};
use personachat_infra::exchange::GeminiExchangeClient;
use personachat_infra::filesystem::resolve_data_dir;
use personachat_infra::sqlite::kv::SqliteKvBackend;
use personachat_infra::sqlite::pool::DatabasePool;
use personachat_types::config::AppConfig;

pub type ConcreteBotService = BotService<SqliteKvBackend>;

pub type ConcreteChatService = ChatService<SqliteKvBackend, GeminiExchangeClient>;

/// Shared state for CLI commands.
///
/// The chat service is built on demand so commands that never talk to the
/// model do not require an API key.
#[derive(Clone)]
pub struct AppState {
    pub bot_service: Arc<ConcreteBotService>,
    pub backend: SqliteKvBackend,
    pub config: AppConfig,
}

impl AppState {
    /// Resolve the data directory, load config, and open the database.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let config = load_app_config(&data_dir).await;

        let pool = DatabasePool::open(&data_dir).await?;
        let backend = SqliteKvBackend::new(pool);

        tracing::debug!(data_dir = %data_dir.display(), model = %config.exchange.model, "App state initialized");

        Ok(Self {
            bot_service: Arc::new(BotService::new(backend.clone())),
            backend,
            config,
        })
    }

    /// Build a chat service backed by the Gemini exchange client.
    ///
    /// Fails when the configured API key variable is unset or blank.
    pub fn chat_service(&self) -> anyhow::Result<ConcreteChatService> {
        let api_key = resolve_api_key(&self.config.exchange)?;
        let exchange = GeminiExchangeClient::new(&self.config.exchange, api_key);
        Ok(ChatService::new(self.backend.clone(), exchange))
    }
}
