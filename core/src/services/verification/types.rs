//! Types for verification service results

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::VerificationEntry;

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The stored entry, including the code itself
    pub entry: VerificationEntry,
    /// Message id reported by the delivery collaborator
    pub message_id: String,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
}
