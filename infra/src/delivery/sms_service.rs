//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that handle
//! sending verification codes.

use async_trait::async_trait;

use crate::InfrastructureError;

/// SMS service trait for sending text messages
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code via SMS
    ///
    /// Formats the code into the standard message.
    async fn send_verification_code(&self, phone_number: &str, code: &str) -> Result<String, InfrastructureError> {
        let message = format!("Your Grammar Gallery verification code is: {}", code);
        self.send_sms(phone_number, &message).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
