//! Configuration for the verification service

use chrono::Duration;
use gg_shared::config::VerificationConfig;

use crate::domain::entities::verification_code::DEFAULT_EXPIRATION_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Seconds until a resend should be offered, reported in `SendCodeResult`
    pub resend_cooldown_seconds: i64,
}

impl VerificationServiceConfig {
    pub fn code_lifetime(&self) -> Duration {
        Duration::minutes(self.code_expiration_minutes)
    }

    pub fn resend_cooldown(&self) -> Duration {
        Duration::seconds(self.resend_cooldown_seconds)
    }
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: 60,
        }
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_expiration_minutes: config.code_expiration_minutes,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
        }
    }
}
