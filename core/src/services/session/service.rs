//! Session holder backed by a SessionStore slot

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::account::Account;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::SessionStore;

/// Default slot the current account is stored under
pub const DEFAULT_SLOT_KEY: &str = "currentUser";

/// Keeps the logged-in account in memory and mirrors it into a store slot
pub struct SessionHolder<S: SessionStore> {
    store: Arc<S>,
    slot_key: String,
    current: RwLock<Option<Account>>,
}

impl<S: SessionStore> SessionHolder<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_slot_key(store, DEFAULT_SLOT_KEY)
    }

    pub fn with_slot_key(store: Arc<S>, slot_key: impl Into<String>) -> Self {
        Self {
            store,
            slot_key: slot_key.into(),
            current: RwLock::new(None),
        }
    }

    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Serialize the account into the slot and make it current
    pub async fn save(&self, account: &Account) -> DomainResult<()> {
        let json = serde_json::to_string(account).map_err(|e| DomainError::Internal {
            message: format!("Failed to serialize session: {}", e),
        })?;
        self.store.set(&self.slot_key, json).await?;
        *self.current.write().await = Some(account.clone());

        tracing::debug!(
            account_id = %account.id,
            slot = %self.slot_key,
            event = "session_saved",
            "Stored current user"
        );
        Ok(())
    }

    /// Load the slot into memory, typically once at startup
    ///
    /// A slot that does not parse as an account is removed and treated as
    /// no session.
    pub async fn restore(&self) -> DomainResult<Option<Account>> {
        let restored = match self.store.get(&self.slot_key).await? {
            None => None,
            Some(raw) => match serde_json::from_str::<Account>(&raw) {
                Ok(account) => {
                    tracing::info!(
                        account_id = %account.id,
                        event = "session_restored",
                        "Restored current user"
                    );
                    Some(account)
                }
                Err(e) => {
                    tracing::warn!(
                        slot = %self.slot_key,
                        error = %e,
                        event = "session_corrupt",
                        "Discarding unreadable session data"
                    );
                    self.store.remove(&self.slot_key).await?;
                    None
                }
            },
        };

        *self.current.write().await = restored.clone();
        Ok(restored)
    }

    /// The in-memory current account
    pub async fn current(&self) -> Option<Account> {
        self.current.read().await.clone()
    }

    /// Forget the current account and remove the slot
    pub async fn clear(&self) -> DomainResult<()> {
        self.store.remove(&self.slot_key).await?;
        if let Some(account) = self.current.write().await.take() {
            tracing::debug!(account_id = %account.id, event = "session_cleared", "Cleared current user");
        }
        Ok(())
    }
}
