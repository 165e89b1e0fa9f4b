//! Exchange client implementations.
//!
//! Contains the Gemini `streamGenerateContent` client that implements
//! [`ExchangeClient`](personachat_core::exchange::ExchangeClient), the wire
//! types it speaks, and the SSE decoder that turns the response body into
//! accumulated reply text.

pub mod gemini;
pub mod sse;
pub mod types;

pub use gemini::GeminiExchangeClient;
