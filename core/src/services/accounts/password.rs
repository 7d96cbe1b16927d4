//! bcrypt password hashing

use crate::errors::{DomainError, DomainResult};

/// Hash a password with the given bcrypt cost
pub fn hash_password(password: &str, cost: u32) -> DomainResult<String> {
    bcrypt::hash(password, cost).map_err(|e| DomainError::Internal {
        message: format!("Failed to hash password: {}", e),
    })
}

/// Check a password against a stored hash; malformed hashes never match
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123", 4).unwrap();
        assert_ne!(hash, "Secret123");
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("secret123", &hash));
    }

    #[test]
    fn test_malformed_hash() {
        assert!(!verify_password("Secret123", "not-a-hash"));
        assert!(!verify_password("Secret123", ""));
    }
}
