//! Email Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Email service trait for sending messages
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send an email, returning the provider message id
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Send a verification code by email
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<String, InfrastructureError> {
        let body = format!(
            "Welcome to Grammar Gallery!\n\nYour email verification code is: {}\n\nIf you did not request this, ignore this message.",
            code
        );
        self.send_email(to, "Verify your Grammar Gallery email", &body).await
    }

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
