//! Business logic and port trait definitions for PersonaChat.
//!
//! This crate defines the "ports" (`KvBackend`, `ExchangeClient`) that the
//! infrastructure layer implements, the `Store` facade over a key/value
//! backend, and the bot/chat services. It depends only on
//! `personachat-types` -- never on `personachat-infra` or any I/O crate.

pub mod exchange;
pub mod service;
pub mod storage;
