use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::BotError;

/// Creator name recorded when a request does not supply one.
pub const DEFAULT_CREATOR: &str = "User";

/// Unique identifier for a bot, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotId(pub Uuid);

impl BotId {
    /// Create a new BotId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a BotId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BotId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BotId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A persona-driven chat agent.
///
/// Bots are created once and never mutated afterwards. The `persona` text is
/// prepended verbatim to every prompt sent to the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bot {
    pub id: BotId,
    pub name: String,
    /// Short description shown in listings.
    pub description: String,
    /// Instructions that shape every reply.
    pub persona: String,
    /// Avatar image shown next to the bot's replies.
    pub image_url: String,
    /// Who created the bot (there is no account model, so this is free text).
    #[serde(default = "default_creator")]
    pub creator: String,
    pub created_at: DateTime<Utc>,
}

fn default_creator() -> String {
    DEFAULT_CREATOR.to_string()
}

/// Request to create a new bot. Every field except `creator` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBotRequest {
    pub name: String,
    pub description: String,
    pub persona: String,
    pub image_url: String,
    pub creator: Option<String>,
}

impl CreateBotRequest {
    /// Trim every field and reject blank required values.
    ///
    /// A blank `creator` falls back to [`DEFAULT_CREATOR`].
    pub fn validate(self) -> Result<Self, BotError> {
        let creator = self
            .creator
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            name: required("name", &self.name)?,
            description: required("description", &self.description)?,
            persona: required("persona", &self.persona)?,
            image_url: required("image_url", &self.image_url)?,
            creator: Some(creator.unwrap_or_else(default_creator)),
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, BotError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(BotError::InvalidField {
            field,
            reason: "cannot be empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}
