//! Shared domain types for PersonaChat.
//!
//! This crate contains the domain types used across the workspace:
//! Bot, Message, ChatSession, application configuration, and the error
//! enums shared by the core and infrastructure layers.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod bot;
pub mod chat;
pub mod config;
pub mod error;
