//! Chat service orchestrating one conversation turn.
//!
//! A turn resolves the bot, loads (or lazily creates) its session, appends
//! the user's message, asks the exchange client for a reply, appends the
//! reply, and writes the session back.
//!
//! The caller must not start a second turn for the same bot while one is in
//! flight; the load/append/write sequence is not atomic.

use personachat_types::bot::BotId;
use personachat_types::chat::{ChatSession, ChatTurn, Message};
use personachat_types::error::ChatError;
use tracing::{debug, info};

use crate::exchange::ExchangeClient;
use crate::storage::kv_backend::KvBackend;
use crate::storage::store::Store;

/// Orchestrates chat turns between the store and an exchange client.
pub struct ChatService<B: KvBackend, X: ExchangeClient> {
    store: Store<B>,
    exchange: X,
}

impl<B: KvBackend, X: ExchangeClient> ChatService<B, X> {
    pub fn new(backend: B, exchange: X) -> Self {
        Self {
            store: Store::new(backend),
            exchange,
        }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    /// Send `content` to a bot and record both sides of the exchange.
    ///
    /// Exactly one exchange call is made per turn. Endpoint failures never
    /// surface here: the reply is then the client's fallback text.
    pub async fn send_message(
        &self,
        bot_id: &BotId,
        content: &str,
    ) -> Result<ChatTurn, ChatError> {
        if content.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let bot = self
            .store
            .get_bot(bot_id)
            .await?
            .ok_or(ChatError::BotNotFound)?;

        let mut session = match self.store.get_chat_session_by_bot(bot_id).await? {
            Some(session) => session,
            None => {
                debug!(bot_id = %bot_id, "Starting new chat session");
                ChatSession::new(bot_id.clone())
            }
        };

        let user_message = Message::from_user(bot_id.clone(), content);
        session.push(user_message.clone());

        let reply_text = self.exchange.reply(content, &bot.persona).await;
        let reply = Message::from_bot(bot_id.clone(), reply_text);
        session.push(reply.clone());

        self.store.put_chat_session(&session).await?;
        info!(
            bot_id = %bot_id,
            session_id = %session.id,
            message_count = session.len(),
            "Chat turn recorded"
        );

        Ok(ChatTurn {
            user_message,
            reply,
            message_count: session.len(),
        })
    }
}
