//! Shared utilities and common types for the Grammar Gallery services
//!
//! This crate provides common functionality used across the workspace:
//! - Configuration types
//! - Error response structures
//! - Utility functions (phone, email and password validation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DeliveryConfig, Environment, LoggingConfig, RegistrationConfig, SessionConfig,
    VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use utils::{email, password, phone, validation};
