//! Shared error response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response surfaced to callers of the registration flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes used across the workspace
pub mod error_codes {
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const CODE_EXPIRED: &str = "VERIFICATION_CODE_EXPIRED";
    pub const CODE_MISMATCH: &str = "VERIFICATION_CODE_MISMATCH";
    pub const NOT_VERIFIED: &str = "NOT_VERIFIED";
    pub const PENDING_APPROVAL: &str = "PENDING_APPROVAL";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const NOT_STAFF: &str = "NOT_STAFF";
    pub const RESEND_TOO_SOON: &str = "RESEND_TOO_SOON";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Trait for converting errors to ErrorResponse
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}
