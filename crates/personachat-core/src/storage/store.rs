//! Typed persistence facade for bots and chat sessions.
//!
//! Records are stored as JSON under namespaced keys:
//!
//! - `bot:{bot_id}` -- one [`Bot`] per key
//! - `chat:{bot_id}` -- the single [`ChatSession`] of that bot
//!
//! Keying sessions by bot id (not by session id) is what enforces the
//! one-session-per-bot invariant: a second write for the same bot replaces
//! the first.
//!
//! Writes are not transactional. A read-modify-write of a session from two
//! writers at once can lose one of the updates.

use personachat_types::bot::{Bot, BotId};
use personachat_types::chat::ChatSession;
use personachat_types::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::kv_backend::KvBackend;

pub const BOT_PREFIX: &str = "bot:";
pub const CHAT_PREFIX: &str = "chat:";

/// Storage key of a bot record.
pub fn bot_key(id: &BotId) -> String {
    format!("{BOT_PREFIX}{id}")
}

/// Storage key of a bot's chat session.
pub fn chat_key(bot_id: &BotId) -> String {
    format!("{CHAT_PREFIX}{bot_id}")
}

/// Bot and chat session persistence over any [`KvBackend`].
pub struct Store<B: KvBackend> {
    backend: B,
}

impl<B: KvBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Bots ---

    /// Write a bot at `bot:{id}`, replacing any bot with the same id.
    pub async fn put_bot(&self, bot: &Bot) -> Result<(), StoreError> {
        self.put_json(&bot_key(&bot.id), bot).await
    }

    /// Every stored bot, in backend enumeration order.
    ///
    /// Records that fail to decode, or that disappear between listing and
    /// reading, are skipped. Backend failures still propagate.
    pub async fn list_bots(&self) -> Result<Vec<Bot>, StoreError> {
        let keys = self.backend.list(BOT_PREFIX).await?;
        let mut bots = Vec::with_capacity(keys.len());

        for key in keys {
            let Some(raw) = self.backend.get(&key).await? else {
                debug!(key = %key, "Listed bot record vanished before read, skipping");
                continue;
            };
            match serde_json::from_str::<Bot>(&raw) {
                Ok(bot) => bots.push(bot),
                Err(e) => warn!(key = %key, error = %e, "Skipping malformed bot record"),
            }
        }

        Ok(bots)
    }

    /// Get a bot by id. Returns None if no bot is stored under that id.
    pub async fn get_bot(&self, id: &BotId) -> Result<Option<Bot>, StoreError> {
        self.get_json(&bot_key(id)).await
    }

    // --- Chat sessions ---

    /// Write a session at `chat:{bot_id}`, replacing the bot's previous session.
    pub async fn put_chat_session(&self, session: &ChatSession) -> Result<(), StoreError> {
        self.put_json(&chat_key(&session.bot_id), session).await
    }

    /// Get the session of a bot. Returns None if the bot has never chatted.
    pub async fn get_chat_session_by_bot(
        &self,
        bot_id: &BotId,
    ) -> Result<Option<ChatSession>, StoreError> {
        self.get_json(&chat_key(bot_id)).await
    }

    // --- Helpers ---

    async fn put_json<T: Serialize>(&self, key: &str, record: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.backend.set(key, &raw).await
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StoreError::Corrupt {
                    key: key.to_string(),
                    reason: e.to_string(),
                }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Utc;
    use personachat_types::chat::Message;

    use super::*;
    use crate::storage::memory::MemoryKvBackend;

    fn make_bot(name: &str) -> Bot {
        Bot {
            id: BotId::new(),
            name: name.to_string(),
            description: format!("{name} description"),
            persona: format!("You are {name}."),
            image_url: format!("https://example.com/{name}.png"),
            creator: "User".to_string(),
            created_at: Utc::now(),
        }
    }

    fn make_store() -> Store<MemoryKvBackend> {
        Store::new(MemoryKvBackend::new())
    }

    /// Backend whose every operation fails.
    struct FailingBackend;

    impl KvBackend for FailingBackend {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }

        async fn list(&self, _prefix: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Backend("quota exceeded".to_string()))
        }
    }

    /// Backend that lists a key it cannot return.
    struct GhostBackend {
        inner: MemoryKvBackend,
    }

    impl KvBackend for GhostBackend {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value).await
        }

        async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
            let mut keys = self.inner.list(prefix).await?;
            keys.push(format!("{prefix}ghost"));
            Ok(keys)
        }
    }

    #[test]
    fn test_key_layout() {
        let id = BotId::new();
        assert_eq!(bot_key(&id), format!("bot:{id}"));
        assert_eq!(chat_key(&id), format!("chat:{id}"));
    }

    #[tokio::test]
    async fn test_put_get_bot_roundtrip() {
        let store = make_store();
        let bot = make_bot("luna");
        store.put_bot(&bot).await.unwrap();

        let got = store.get_bot(&bot.id).await.unwrap();
        assert_eq!(got, Some(bot));
    }

    #[tokio::test]
    async fn test_get_missing_bot_is_none() {
        let store = make_store();
        assert!(store.get_bot(&BotId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_bot_same_id_replaces() {
        let store = make_store();
        let bot = make_bot("luna");
        store.put_bot(&bot).await.unwrap();

        let mut renamed = bot.clone();
        renamed.name = "Luna Prime".to_string();
        store.put_bot(&renamed).await.unwrap();

        let got = store.get_bot(&bot.id).await.unwrap().unwrap();
        assert_eq!(got.name, "Luna Prime");
        assert_eq!(store.list_bots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_bots_returns_all_written() {
        let store = make_store();
        let bots: Vec<Bot> = ["a", "b", "c"].iter().map(|n| make_bot(n)).collect();
        for bot in &bots {
            store.put_bot(bot).await.unwrap();
        }

        let listed: HashSet<BotId> = store
            .list_bots()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        let expected: HashSet<BotId> = bots.into_iter().map(|b| b.id).collect();
        assert_eq!(listed, expected);
    }

    #[tokio::test]
    async fn test_list_bots_ignores_sessions() {
        let store = make_store();
        let bot = make_bot("luna");
        store.put_bot(&bot).await.unwrap();
        store
            .put_chat_session(&ChatSession::new(bot.id.clone()))
            .await
            .unwrap();

        assert_eq!(store.list_bots().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_bots_skips_malformed_records() {
        let store = make_store();
        let bot = make_bot("luna");
        store.put_bot(&bot).await.unwrap();
        store
            .backend()
            .set("bot:broken", "{not json")
            .await
            .unwrap();
        store
            .backend()
            .set("bot:wrong-shape", r#"{"name":"no id"}"#)
            .await
            .unwrap();

        let listed = store.list_bots().await.unwrap();
        assert_eq!(listed, vec![bot]);
    }

    #[tokio::test]
    async fn test_list_bots_skips_vanished_records() {
        let store = Store::new(GhostBackend {
            inner: MemoryKvBackend::new(),
        });
        let bot = make_bot("luna");
        store.put_bot(&bot).await.unwrap();

        let listed = store.list_bots().await.unwrap();
        assert_eq!(listed, vec![bot]);
    }

    #[tokio::test]
    async fn test_list_bots_empty() {
        let store = make_store();
        assert!(store.list_bots().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_bot_on_point_read_is_error() {
        let store = make_store();
        let id = BotId::new();
        store.backend().set(&bot_key(&id), "garbage").await.unwrap();

        let err = store.get_bot(&id).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let store = Store::new(FailingBackend);
        let bot = make_bot("luna");

        assert!(matches!(
            store.put_bot(&bot).await,
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(
            store.get_bot(&bot.id).await,
            Err(StoreError::Backend(_))
        ));
        assert!(matches!(store.list_bots().await, Err(StoreError::Backend(_))));
        assert!(matches!(
            store.get_chat_session_by_bot(&bot.id).await,
            Err(StoreError::Backend(_))
        ));
    }

    #[tokio::test]
    async fn test_session_overwrite_keeps_latest_only() {
        let store = make_store();
        let bot_id = BotId::new();

        let first = ChatSession::new(bot_id.clone());
        store.put_chat_session(&first).await.unwrap();

        let mut second = ChatSession::new(bot_id.clone());
        second.push(Message::from_user(bot_id.clone(), "hello"));
        store.put_chat_session(&second).await.unwrap();

        let got = store.get_chat_session_by_bot(&bot_id).await.unwrap().unwrap();
        assert_eq!(got, second);
        assert_ne!(got.id, first.id);
        assert_eq!(store.backend().list(CHAT_PREFIX).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_session_is_none() {
        let store = make_store();
        assert!(
            store
                .get_chat_session_by_bot(&BotId::new())
                .await
                .unwrap()
                .is_none()
        );
    }
}
