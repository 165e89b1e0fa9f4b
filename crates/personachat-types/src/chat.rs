//! Chat session and message types for PersonaChat.
//!
//! A bot has at most one [`ChatSession`]; its messages are an append-only
//! sequence in conversation order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bot::BotId;

/// A single turn within a chat session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub bot_id: BotId,
    pub content: String,
    /// True when authored by the human, false when produced by the bot.
    pub is_user: bool,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// A message typed by the human.
    pub fn from_user(bot_id: BotId, content: impl Into<String>) -> Self {
        Self::new(bot_id, content.into(), true)
    }

    /// A reply produced by the exchange client.
    pub fn from_bot(bot_id: BotId, content: impl Into<String>) -> Self {
        Self::new(bot_id, content.into(), false)
    }

    fn new(bot_id: BotId, content: String, is_user: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            bot_id,
            content,
            is_user,
            timestamp: Utc::now(),
        }
    }
}

/// The conversation history of one bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: Uuid,
    pub bot_id: BotId,
    #[serde(default)]
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Start an empty session for a bot.
    pub fn new(bot_id: BotId) -> Self {
        Self {
            id: Uuid::now_v7(),
            bot_id,
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Append a message to the end of the conversation.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Outcome of one exchange: the user's message, the bot's reply, and the
/// session length after both were appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_message: Message,
    pub reply: Message,
    pub message_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors_set_author() {
        let bot_id = BotId::new();
        assert!(Message::from_user(bot_id.clone(), "hi").is_user);
        assert!(!Message::from_bot(bot_id, "hello").is_user);
    }

    #[test]
    fn test_session_push_preserves_order() {
        let bot_id = BotId::new();
        let mut session = ChatSession::new(bot_id.clone());
        assert!(session.is_empty());

        session.push(Message::from_user(bot_id.clone(), "first"));
        session.push(Message::from_bot(bot_id, "second"));

        assert_eq!(session.len(), 2);
        assert_eq!(session.messages[0].content, "first");
        assert_eq!(session.messages[1].content, "second");
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let bot_id = BotId::new();
        let mut session = ChatSession::new(bot_id.clone());
        session.push(Message::from_user(bot_id, "hello"));

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"botId\""));
        assert!(json.contains("\"isUser\":true"));

        let parsed: ChatSession = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
