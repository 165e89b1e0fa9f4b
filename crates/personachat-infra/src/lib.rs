//! Infrastructure layer for PersonaChat.
//!
//! Contains implementations of the ports defined in `personachat-core`:
//! a SQLite key/value backend, the Gemini streaming exchange client, and
//! the configuration and data-directory loaders used by the binary.

pub mod config;
pub mod exchange;
pub mod filesystem;
pub mod sqlite;
