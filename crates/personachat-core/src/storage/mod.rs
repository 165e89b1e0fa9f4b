//! Storage abstractions for PersonaChat.
//!
//! Defines the key/value backend trait, an in-memory implementation, and
//! the typed `Store` facade that namespaces Bot and ChatSession records.

pub mod kv_backend;
pub mod memory;
pub mod store;
