//! Store of live verification codes, keyed by destination.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationEntry;
use crate::errors::DomainError;

/// Holds at most one entry per destination
///
/// Email addresses and phone numbers share one key space; the destination
/// string alone identifies an entry.
#[async_trait]
pub trait VerificationCodeStore: Send + Sync {
    /// Store an entry, replacing any previous one for the same destination
    ///
    /// # Returns
    /// The replaced entry, if there was one
    async fn insert(&self, entry: VerificationEntry)
        -> Result<Option<VerificationEntry>, DomainError>;

    /// Look up the entry for a destination, expired or not
    async fn get(&self, destination: &str) -> Result<Option<VerificationEntry>, DomainError>;

    /// Remove the entry for a destination
    ///
    /// # Returns
    /// `true` if an entry was removed
    async fn remove(&self, destination: &str) -> Result<bool, DomainError>;

    /// Check a submitted code and delete the entry on success, as one step
    ///
    /// Two concurrent calls with the correct code cannot both succeed.
    ///
    /// # Returns
    /// * `Ok(entry)` - the consumed entry
    /// * `Err(AuthError::NotFound)` - no entry for the destination
    /// * `Err(AuthError::Expired)` - entry past its expiry; it is kept
    /// * `Err(AuthError::Mismatch)` - wrong code; the entry is kept
    async fn consume(
        &self,
        destination: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<VerificationEntry, DomainError>;

    /// Drop every entry expired at `now`
    ///
    /// # Returns
    /// Number of entries removed
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;
}
