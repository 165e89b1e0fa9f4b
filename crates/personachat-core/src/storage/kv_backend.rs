//! Key/value backend trait.
//!
//! The persistence capability the `Store` depends on: string keys mapped to
//! string values, plus prefix enumeration. Implementations live in this
//! crate (`MemoryKvBackend`) and in personachat-infra (`SqliteKvBackend`).

use personachat_types::error::StoreError;

/// Trait for durable string key/value storage.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KvBackend: Send + Sync {
    /// Get the value stored at `key`. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set the value for `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List every key starting with `prefix`. Order is unspecified.
    fn list(
        &self,
        prefix: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;
}
