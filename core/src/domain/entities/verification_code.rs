//! Verification entry for email and SMS one-time codes.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

use crate::errors::AuthError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Smallest code that can be generated
pub const MIN_CODE: u32 = 100_000;

/// Largest code that can be generated
pub const MAX_CODE: u32 = 999_999;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// Delivery channel of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Phone,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Email => write!(f, "email"),
            Channel::Phone => write!(f, "phone"),
        }
    }
}

/// A live one-time code for a single destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationEntry {
    /// Email address or phone number the code was sent to
    pub destination: String,

    pub channel: Channel,

    /// The 6-digit code
    pub code: String,

    pub created_at: DateTime<Utc>,

    pub expires_at: DateTime<Utc>,
}

impl VerificationEntry {
    /// Creates an entry issued at `now` that lives for `lifetime`
    pub fn new(
        destination: impl Into<String>,
        channel: Channel,
        code: impl Into<String>,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            destination: destination.into(),
            channel,
            code: code.into(),
            created_at: now,
            expires_at: now + lifetime,
        }
    }

    /// Generates a uniformly random code in `100000..=999999` from the OS CSPRNG
    pub fn generate_code() -> String {
        OsRng.gen_range(MIN_CODE..=MAX_CODE).to_string()
    }

    /// Expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Checks a submitted code against this entry at time `now`
    ///
    /// Expiry is checked before the code itself, so a correct but stale code
    /// reports [`AuthError::Expired`].
    pub fn check(&self, submitted: &str, now: DateTime<Utc>) -> Result<(), AuthError> {
        if self.is_expired_at(now) {
            return Err(AuthError::Expired);
        }
        if !Self::codes_match(&self.code, submitted) {
            return Err(AuthError::Mismatch);
        }
        Ok(())
    }

    /// Time remaining until expiration, zero once expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }

    fn codes_match(stored: &str, submitted: &str) -> bool {
        stored.len() == submitted.len() && constant_time_eq(stored.as_bytes(), submitted.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_at(now: DateTime<Utc>) -> VerificationEntry {
        VerificationEntry::new(
            "jane@x.com",
            Channel::Email,
            "123456",
            now,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
        )
    }

    #[test]
    fn test_generate_code_range() {
        for _ in 0..200 {
            let code = VerificationEntry::generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            let num: u32 = code.parse().expect("Generated code should be numeric");
            assert!((MIN_CODE..=MAX_CODE).contains(&num));
        }
    }

    #[test]
    fn test_code_uniqueness() {
        let codes: std::collections::HashSet<String> =
            (0..100).map(|_| VerificationEntry::generate_code()).collect();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let entry = entry_at(now);

        assert_eq!(entry.expires_at, now + Duration::minutes(15));
        assert!(!entry.is_expired_at(entry.expires_at));
        assert!(entry.is_expired_at(entry.expires_at + Duration::seconds(1)));
    }

    #[test]
    fn test_check_outcomes() {
        let now = Utc::now();
        let entry = entry_at(now);

        assert!(entry.check("123456", now).is_ok());
        assert!(matches!(entry.check("654321", now), Err(AuthError::Mismatch)));
        assert!(matches!(entry.check("12345", now), Err(AuthError::Mismatch)));

        let later = now + Duration::minutes(16);
        assert!(matches!(entry.check("123456", later), Err(AuthError::Expired)));
        assert!(matches!(entry.check("000000", later), Err(AuthError::Expired)));
    }

    #[test]
    fn test_time_until_expiration() {
        let now = Utc::now();
        let entry = entry_at(now);

        assert_eq!(entry.time_until_expiration(now), Duration::minutes(15));
        assert_eq!(
            entry.time_until_expiration(now + Duration::minutes(20)),
            Duration::zero()
        );
    }

    #[test]
    fn test_channel_serialization() {
        assert_eq!(serde_json::to_string(&Channel::Email).unwrap(), "\"email\"");
        assert_eq!(serde_json::to_string(&Channel::Phone).unwrap(), "\"phone\"");
    }
}
