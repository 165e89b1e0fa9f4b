//! Bot management service.
//!
//! Orchestrates bot creation, lookup, and listing, plus read access to a
//! bot's conversation history.

use chrono::Utc;
use personachat_types::bot::{Bot, BotId, CreateBotRequest, DEFAULT_CREATOR};
use personachat_types::chat::Message;
use personachat_types::error::BotError;
use tracing::info;

use crate::storage::kv_backend::KvBackend;
use crate::storage::store::Store;

/// Service orchestrating the bot lifecycle.
///
/// Generic over `KvBackend` to maintain clean architecture --
/// personachat-core never depends on personachat-infra.
pub struct BotService<B: KvBackend> {
    store: Store<B>,
}

impl<B: KvBackend> BotService<B> {
    pub fn new(backend: B) -> Self {
        Self {
            store: Store::new(backend),
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// Validate the request, assign an id and creation time, and persist.
    pub async fn create_bot(&self, request: CreateBotRequest) -> Result<Bot, BotError> {
        let request = request.validate()?;

        let bot = Bot {
            id: BotId::new(),
            name: request.name,
            description: request.description,
            persona: request.persona,
            image_url: request.image_url,
            creator: request
                .creator
                .unwrap_or_else(|| DEFAULT_CREATOR.to_string()),
            created_at: Utc::now(),
        };

        self.store.put_bot(&bot).await?;
        info!(bot_id = %bot.id, name = %bot.name, "Bot created");

        Ok(bot)
    }

    /// Get a bot by id. Returns None if it does not exist.
    pub async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, BotError> {
        Ok(self.store.get_bot(id).await?)
    }

    /// Get a bot by id, treating absence as [`BotError::NotFound`].
    pub async fn require_bot(&self, id: &BotId) -> Result<Bot, BotError> {
        self.get_bot(id).await?.ok_or(BotError::NotFound)
    }

    /// All bots, newest first.
    pub async fn list_bots(&self) -> Result<Vec<Bot>, BotError> {
        let mut bots = self.store.list_bots().await?;
        bots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bots)
    }

    /// Messages exchanged with a bot so far, oldest first.
    ///
    /// Empty when the bot exists but has never chatted.
    pub async fn chat_history(&self, id: &BotId) -> Result<Vec<Message>, BotError> {
        self.require_bot(id).await?;
        let session = self.store.get_chat_session_by_bot(id).await?;
        Ok(session.map(|s| s.messages).unwrap_or_default())
    }
}
