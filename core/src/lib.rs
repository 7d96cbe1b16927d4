//! # Grammar Gallery Core
//!
//! Domain layer for identity verification and registration.
//! This crate contains the account and verification entities, the error
//! taxonomy, repository interfaces with in-memory implementations, and the
//! services that drive a new user from registration to an active account.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::{
    AccountRepository, InMemoryAccountRepository, InMemorySessionStore,
    InMemoryVerificationCodeStore, SessionStore, VerificationCodeStore,
};
pub use services::{
    AccountRegistry, Clock, CodeDelivery, RegistrationState, RegistrationWorkflow, SessionHolder,
    VerificationService, VerificationServiceConfig,
};
