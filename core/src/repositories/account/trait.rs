//! Account repository trait defining the interface for account persistence.
//!
//! The registry never touches storage directly; tests and the service
//! container inject an isolated implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// # Example
/// ```no_run
/// # use gg_core::repositories::{AccountRepository, InMemoryAccountRepository};
/// # async fn example() -> Result<(), gg_core::errors::DomainError> {
/// let repo = InMemoryAccountRepository::new();
///
/// if repo.exists_by_email("jane@x.com").await? {
///     println!("Email already registered");
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Find an account by its normalized email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Check if an account exists with the given normalized email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::DuplicateEmail))` - the email is taken;
    ///   the existing account is left untouched
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace a stored account
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::NotFound))` - no account with that id
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Count accounts, optionally filtered by role
    async fn count_by_role(&self, role: Option<Role>) -> Result<u64, DomainError>;

    /// Allocate the next sequential student number, starting at 1
    async fn next_student_sequence(&self) -> Result<u32, DomainError>;
}
