//! Verification service module for email and SMS one-time codes
//!
//! This module provides the code lifecycle used by registration:
//! - Code generation from the OS CSPRNG (or a pinned generator in tests)
//! - Storage keyed by destination, newest code wins
//! - Delivery through an injected email/SMS collaborator
//! - Single-use verification with expiry

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use traits::{CodeDelivery, CodeGenerator, FixedCodeGenerator, RandomCodeGenerator};
pub use types::SendCodeResult;
