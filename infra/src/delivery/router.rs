//! Channel router bridging the infrastructure senders with the core
//! `CodeDelivery` trait

use async_trait::async_trait;
use std::sync::Arc;

use gg_core::domain::entities::Channel;
use gg_core::services::CodeDelivery;

use super::email_service::EmailService;
use super::sms_service::SmsService;

/// Sends email-channel codes by email and phone-channel codes by SMS
pub struct DeliveryRouter<E: EmailService, S: SmsService> {
    email: Arc<E>,
    sms: Arc<S>,
}

impl<E: EmailService, S: SmsService> DeliveryRouter<E, S> {
    pub fn new(email: Arc<E>, sms: Arc<S>) -> Self {
        Self { email, sms }
    }
}

#[async_trait]
impl<E: EmailService, S: SmsService> CodeDelivery for DeliveryRouter<E, S> {
    async fn deliver(&self, destination: &str, channel: Channel, code: &str) -> Result<String, String> {
        let result = match channel {
            Channel::Email => self.email.send_verification_code(destination, code).await,
            Channel::Phone => self.sms.send_verification_code(destination, code).await,
        };
        result.map_err(|e| e.to_string())
    }
}
