//! Domain-specific error types and error handling.

use gg_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use gg_shared::validation::ValidationErrors;
use thiserror::Error;

/// Verification and login failures surfaced to the caller of a workflow step
///
/// None of these are retried automatically and none leave partial state
/// behind; the caller corrects its input and resubmits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("An account with email {email} already exists")]
    DuplicateEmail { email: String },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Verification code has expired")]
    Expired,

    #[error("Invalid verification code")]
    Mismatch,

    #[error("Account is not verified")]
    NotVerified,

    #[error("Account is pending admin approval")]
    PendingApproval,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not a staff account")]
    NotStaff,

    #[error("Please wait {seconds} seconds before requesting a new code")]
    ResendTooSoon { seconds: i64 },

    #[error("Cannot {action} while registration is {state}")]
    InvalidTransition { state: String, action: String },
}

impl AuthError {
    /// `NotFound` for a missing account
    pub fn account_not_found() -> Self {
        AuthError::NotFound {
            resource: "Account".to_string(),
        }
    }

    /// `NotFound` for a destination without a live code
    pub fn code_not_found() -> Self {
        AuthError::NotFound {
            resource: "Verification code".to_string(),
        }
    }

    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::DuplicateEmail { .. } => error_codes::DUPLICATE_EMAIL,
            AuthError::NotFound { .. } => error_codes::NOT_FOUND,
            AuthError::Expired => error_codes::CODE_EXPIRED,
            AuthError::Mismatch => error_codes::CODE_MISMATCH,
            AuthError::NotVerified => error_codes::NOT_VERIFIED,
            AuthError::PendingApproval => error_codes::PENDING_APPROVAL,
            AuthError::InvalidCredentials => error_codes::INVALID_CREDENTIALS,
            AuthError::NotStaff => error_codes::NOT_STAFF,
            AuthError::ResendTooSoon { .. } => error_codes::RESEND_TOO_SOON,
            AuthError::InvalidTransition { .. } => error_codes::INVALID_TRANSITION,
        }
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid form: {0}")]
    InvalidForm(ValidationErrors),

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DomainError {
    /// The auth failure wrapped by this error, if any
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            DomainError::Auth(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::InvalidForm(errors)
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Auth(err) => ErrorResponse::new(err.error_code(), err.to_string()),
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
            }
            DomainError::InvalidForm(errors) => {
                let mut response =
                    ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid registration form");
                for (field, messages) in errors.to_field_errors() {
                    response = response.add_detail(field, messages);
                }
                response
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal error")
            }
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
