//! Key-value storage backing the current-user session slot.

use async_trait::async_trait;

use crate::errors::DomainError;

/// String key-value store that may outlive the process
///
/// Values are opaque to the store; the session holder owns their format.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the value under `key`
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Write `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<(), DomainError>;

    /// Delete the value under `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), DomainError>;
}
