//! In-memory implementation of VerificationCodeStore

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::VerificationEntry;
use crate::errors::{AuthError, DomainError};

use super::trait_::VerificationCodeStore;

/// Process-local code store guarded by a single lock
#[derive(Clone, Default)]
pub struct InMemoryVerificationCodeStore {
    entries: Arc<RwLock<HashMap<String, VerificationEntry>>>,
}

impl InMemoryVerificationCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl VerificationCodeStore for InMemoryVerificationCodeStore {
    async fn insert(
        &self,
        entry: VerificationEntry,
    ) -> Result<Option<VerificationEntry>, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.insert(entry.destination.clone(), entry))
    }

    async fn get(&self, destination: &str) -> Result<Option<VerificationEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries.get(destination).cloned())
    }

    async fn remove(&self, destination: &str) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        Ok(entries.remove(destination).is_some())
    }

    async fn consume(
        &self,
        destination: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerificationEntry, DomainError> {
        let mut entries = self.entries.write().await;

        let entry = entries
            .get(destination)
            .ok_or_else(AuthError::code_not_found)?;
        entry.check(code, now)?;

        entries
            .remove(destination)
            .ok_or_else(|| AuthError::code_not_found().into())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        Ok(before - entries.len())
    }
}
