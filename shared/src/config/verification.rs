//! Verification code configuration

use serde::{Deserialize, Serialize};

/// One-time code settings shared by the verification service and the
/// registration workflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes until a sent code expires
    #[serde(default = "default_code_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Seconds the caller must wait before offering a resend
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_code_expiration_minutes(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let code_expiration_minutes = std::env::var("VERIFICATION_CODE_EXPIRY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_code_expiration_minutes);
        let resend_cooldown_seconds = std::env::var("VERIFICATION_RESEND_COOLDOWN_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_resend_cooldown_seconds);

        Self {
            code_expiration_minutes,
            resend_cooldown_seconds,
        }
    }

    /// Code lifetime as a chrono duration
    pub fn code_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.code_expiration_minutes)
    }

    /// Resend cool-down as a chrono duration
    pub fn resend_cooldown(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.resend_cooldown_seconds)
    }
}

fn default_code_expiration_minutes() -> i64 {
    15
}

fn default_resend_cooldown_seconds() -> i64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        let config = VerificationConfig::default();
        assert_eq!(config.code_lifetime(), chrono::Duration::minutes(15));
        assert_eq!(config.resend_cooldown(), chrono::Duration::seconds(60));
    }
}
