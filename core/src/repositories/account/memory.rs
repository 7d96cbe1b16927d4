//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::{Account, Role};
use crate::errors::{AuthError, DomainError};

use super::trait_::AccountRepository;

/// Process-local account storage
///
/// Cloning shares the underlying map, so one instance can back several
/// services.
#[derive(Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
    student_sequence: Arc<AtomicU32>,
}

impl InMemoryAccountRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            student_sequence: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::DuplicateEmail {
                email: account.email,
            }
            .into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if !accounts.contains_key(&account.id) {
            return Err(AuthError::account_not_found().into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn count_by_role(&self, role: Option<Role>) -> Result<u64, DomainError> {
        let accounts = self.accounts.read().await;
        let count = match role {
            Some(r) => accounts.values().filter(|a| a.role() == r).count(),
            None => accounts.len(),
        };
        Ok(count as u64)
    }

    async fn next_student_sequence(&self) -> Result<u32, DomainError> {
        Ok(self.student_sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::account::StudentLevel;

    fn student(email: &str) -> Account {
        Account::new_student(
            "Jane Doe".to_string(),
            email.to_string(),
            "5551234567".to_string(),
            "hash".to_string(),
            "GG2025001".to_string(),
            StudentLevel::Beginner,
            vec![],
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryAccountRepository::new();
        let created = repo.create(student("jane@x.com")).await.unwrap();

        let by_id = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id.unwrap().email, "jane@x.com");
        let by_email = repo.find_by_email("jane@x.com").await.unwrap();
        assert_eq!(by_email.unwrap().id, created.id);
        assert!(repo.exists_by_email("jane@x.com").await.unwrap());
        assert!(!repo.exists_by_email("john@x.com").await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_email_keeps_first() {
        let repo = InMemoryAccountRepository::new();
        let first = repo.create(student("jane@x.com")).await.unwrap();

        let result = repo.create(student("jane@x.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::DuplicateEmail { .. }))
        ));
        assert_eq!(repo.len().await, 1);
        let stored = repo.find_by_email("jane@x.com").await.unwrap().unwrap();
        assert_eq!(stored.id, first.id);
    }

    #[tokio::test]
    async fn test_update_unknown_account() {
        let repo = InMemoryAccountRepository::new();
        let result = repo.update(student("jane@x.com")).await;
        assert!(matches!(
            result,
            Err(DomainError::Auth(AuthError::NotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_count_and_sequence() {
        let repo = InMemoryAccountRepository::new();
        repo.create(student("a@x.com")).await.unwrap();
        repo.create(student("b@x.com")).await.unwrap();

        assert_eq!(repo.count_by_role(None).await.unwrap(), 2);
        assert_eq!(repo.count_by_role(Some(Role::Student)).await.unwrap(), 2);
        assert_eq!(repo.count_by_role(Some(Role::Staff)).await.unwrap(), 0);

        assert_eq!(repo.next_student_sequence().await.unwrap(), 1);
        assert_eq!(repo.next_student_sequence().await.unwrap(), 2);
    }
}
