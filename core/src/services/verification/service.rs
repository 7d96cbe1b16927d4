//! Main verification service implementation

use std::sync::Arc;

use gg_shared::email::mask_email;
use gg_shared::phone::mask_phone_number;

use crate::domain::entities::verification_code::{Channel, VerificationEntry};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::VerificationCodeStore;
use crate::services::clock::{Clock, SystemClock};

use super::config::VerificationServiceConfig;
use super::traits::{CodeDelivery, CodeGenerator, RandomCodeGenerator};
use super::types::SendCodeResult;

/// Verification service for email and SMS one-time codes
pub struct VerificationService<C: VerificationCodeStore, D: CodeDelivery> {
    /// Store of live codes
    store: Arc<C>,
    /// Email/SMS delivery
    delivery: Arc<D>,
    /// Service configuration
    config: VerificationServiceConfig,
    clock: Arc<dyn Clock>,
    generator: Arc<dyn CodeGenerator>,
}

/// Log-safe rendering of a destination
pub(crate) fn mask_destination(destination: &str, channel: Channel) -> String {
    match channel {
        Channel::Email => mask_email(destination),
        Channel::Phone => mask_phone_number(destination),
    }
}

fn channel_of(destination: &str) -> Channel {
    if destination.contains('@') {
        Channel::Email
    } else {
        Channel::Phone
    }
}

impl<C: VerificationCodeStore, D: CodeDelivery> VerificationService<C, D> {
    /// Create a new verification service
    ///
    /// # Arguments
    ///
    /// * `store` - Code store implementation
    /// * `delivery` - Email/SMS delivery implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<C>, delivery: Arc<D>, config: VerificationServiceConfig) -> Self {
        Self {
            store,
            delivery,
            config,
            clock: Arc::new(SystemClock),
            generator: Arc::new(RandomCodeGenerator),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the code source
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Send a verification code to an email address or phone number
    ///
    /// This method:
    /// 1. Generates a new code
    /// 2. Stores it, replacing any previous code for the destination
    /// 3. Delivers it through the delivery collaborator
    ///
    /// No rate limiting happens here; callers enforce the resend cool-down.
    /// If delivery fails, a still-valid previous code is put back.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The stored entry and delivery details
    /// * `Err(DomainError::Internal)` - If storing or delivery fails
    pub async fn send_code(&self, destination: &str, channel: Channel) -> DomainResult<SendCodeResult> {
        let now = self.clock.now();
        let entry = VerificationEntry::new(
            destination,
            channel,
            self.generator.generate(),
            now,
            self.config.code_lifetime(),
        );
        let masked = mask_destination(destination, channel);

        let replaced = self.store.insert(entry.clone()).await?;

        tracing::info!(
            destination = %masked,
            channel = %channel,
            replaced = replaced.is_some(),
            expires_at = %entry.expires_at,
            event = "otp_generated",
            "Generated new verification code"
        );

        let message_id = match self.delivery.deliver(destination, channel, &entry.code).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    destination = %masked,
                    channel = %channel,
                    error = %e,
                    event = "otp_delivery_failed",
                    "Failed to deliver verification code"
                );
                match replaced {
                    Some(previous) if !previous.is_expired_at(now) => {
                        self.store.insert(previous).await?;
                    }
                    _ => {
                        self.store.remove(destination).await?;
                    }
                }
                return Err(DomainError::Internal {
                    message: format!("Failed to deliver verification code: {}", e),
                });
            }
        };

        tracing::debug!(
            destination = %masked,
            message_id = %message_id,
            event = "otp_sent",
            "Verification code delivered"
        );

        Ok(SendCodeResult {
            entry,
            message_id,
            next_resend_at: now + self.config.resend_cooldown(),
        })
    }

    /// Verify a submitted code and consume it on success
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The code matched; it can not be used again
    /// * `Err(AuthError::NotFound)` - No code was sent to the destination
    /// * `Err(AuthError::Expired)` - The code is past its expiry
    /// * `Err(AuthError::Mismatch)` - The code is wrong
    pub async fn verify_code(&self, destination: &str, code: &str) -> DomainResult<()> {
        let masked = mask_destination(destination, channel_of(destination));

        match self.store.consume(destination, code, self.clock.now()).await {
            Ok(_) => {
                tracing::info!(
                    destination = %masked,
                    event = "otp_verified",
                    "Verification code accepted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    destination = %masked,
                    error = %e,
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
                Err(e)
            }
        }
    }

    /// Check if a code is stored for the destination, expired or not
    pub async fn code_exists(&self, destination: &str) -> DomainResult<bool> {
        Ok(self.store.get(destination).await?.is_some())
    }

    /// Drop any code stored for the destination
    pub async fn clear(&self, destination: &str) -> DomainResult<()> {
        if self.store.remove(destination).await? {
            tracing::debug!(
                destination = %mask_destination(destination, channel_of(destination)),
                event = "otp_cleared",
                "Cleared verification code"
            );
        }
        Ok(())
    }

    /// Remove every expired code, returning how many were dropped
    pub async fn purge_expired(&self) -> DomainResult<usize> {
        let removed = self.store.purge_expired(self.clock.now()).await?;
        if removed > 0 {
            tracing::info!(removed, event = "otp_purged", "Purged expired verification codes");
        }
        Ok(removed)
    }
}
