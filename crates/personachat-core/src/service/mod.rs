//! Application services built on the storage facade and exchange port.

pub mod bot;
pub mod chat;
