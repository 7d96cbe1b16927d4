//! Registration states

use serde::{Deserialize, Serialize};

/// Step a registration is at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    /// Form not yet accepted
    #[default]
    Started,
    /// Waiting for the email code
    EmailPending,
    /// Waiting for the phone code
    MobilePending,
    /// Student fully verified and logged in
    Complete,
    /// Staff fully verified, waiting for an administrator
    PendingApproval,
}

impl RegistrationState {
    /// No further steps are possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, RegistrationState::Complete | RegistrationState::PendingApproval)
    }
}

impl std::fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationState::Started => write!(f, "started"),
            RegistrationState::EmailPending => write!(f, "email_pending"),
            RegistrationState::MobilePending => write!(f, "mobile_pending"),
            RegistrationState::Complete => write!(f, "complete"),
            RegistrationState::PendingApproval => write!(f, "pending_approval"),
        }
    }
}

/// Which registration form started the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationKind {
    Student,
    Staff,
}
