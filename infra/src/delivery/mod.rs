//! Code Delivery Module
//!
//! Simulated email and SMS senders used to "deliver" verification codes.
//! Nothing leaves the process: messages are written to the log (and,
//! optionally, the console) after a configurable delay that stands in for
//! network I/O.
//!
//! ## Features
//!
//! - **Service Traits**: `EmailService` and `SmsService` interfaces
//! - **Mock Implementations**: console output for development
//! - **Router**: channel dispatch implementing the core `CodeDelivery` trait
//! - **Security**: destinations are masked in logs

pub mod email_service;
pub mod mock_email;
pub mod mock_sms;
pub mod router;
pub mod sms_service;

pub use email_service::EmailService;
pub use mock_email::MockEmailService;
pub use mock_sms::MockSmsService;
pub use router::DeliveryRouter;
pub use sms_service::SmsService;


/// A message captured by a mock sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub message_id: String,
    pub to: String,
    pub body: String,
}

/// Pull the six-digit code back out of a rendered message
pub fn extract_code(body: &str) -> Option<String> {
    body.split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == gg_core::domain::entities::CODE_LENGTH)
        .map(str::to_string)
}
