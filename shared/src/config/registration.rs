//! Registration configuration

use serde::{Deserialize, Serialize};

/// Account registration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    /// Prefix of human-readable student ids (e.g. `GG2025` -> `GG2025001`)
    #[serde(default = "default_student_id_prefix")]
    pub student_id_prefix: String,

    /// bcrypt cost factor used when hashing passwords
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            student_id_prefix: default_student_id_prefix(),
            password_hash_cost: default_password_hash_cost(),
        }
    }
}

impl RegistrationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let student_id_prefix = std::env::var("REGISTRATION_STUDENT_ID_PREFIX")
            .unwrap_or_else(|_| default_student_id_prefix());
        let password_hash_cost = std::env::var("REGISTRATION_PASSWORD_HASH_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_password_hash_cost);

        Self {
            student_id_prefix,
            password_hash_cost,
        }
    }

    /// Format a sequential student number into a student id
    pub fn format_student_id(&self, sequence: u32) -> String {
        format!("{}{:03}", self.student_id_prefix, sequence)
    }
}

fn default_student_id_prefix() -> String {
    String::from("GG2025")
}

fn default_password_hash_cost() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_student_id() {
        let config = RegistrationConfig::default();
        assert_eq!(config.format_student_id(1), "GG2025001");
        assert_eq!(config.format_student_id(42), "GG2025042");
        assert_eq!(config.format_student_id(1234), "GG20251234");
    }
}
