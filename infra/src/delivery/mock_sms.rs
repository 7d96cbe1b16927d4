//! Mock SMS Service Implementation
//!
//! Logs SMS messages instead of sending them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use gg_shared::config::DeliveryConfig;
use gg_shared::phone::{is_valid_phone, mask_phone_number};

use super::sms_service::SmsService;
use super::SentMessage;
use crate::InfrastructureError;

/// Mock SMS service for development and testing
///
/// This implementation:
/// - Logs SMS messages, optionally echoing them to the console
/// - Validates phone numbers
/// - Sleeps for the configured latency before returning
/// - Keeps an outbox so tests and the demo can read codes back
#[derive(Clone)]
pub struct MockSmsService {
    message_count: Arc<AtomicU64>,
    outbox: Arc<Mutex<Vec<SentMessage>>>,
    simulate_failure: bool,
    console_output: bool,
    latency: Duration,
}

impl MockSmsService {
    /// Create a new mock SMS service with default delivery settings
    pub fn new() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }

    /// Create a mock service with configurable options and no latency
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            simulate_failure,
            console_output,
            latency: Duration::ZERO,
        }
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self {
            latency: config.simulated_latency(),
            ..Self::with_options(config.console_output, false)
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    /// Most recent message sent to `phone_number`
    pub fn last_message_to(&self, phone_number: &str) -> Option<SentMessage> {
        let outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.iter().rev().find(|m| m.to == phone_number).cloned()
    }

    /// Every message sent so far, oldest first
    pub fn sent_messages(&self) -> Vec<SentMessage> {
        self.outbox.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let masked_phone = mask_phone_number(phone_number);

        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number format: {}",
                masked_phone
            )));
        }

        if self.simulate_failure {
            warn!(phone = %masked_phone, "Mock SMS service simulating failure");
            return Err(InfrastructureError::Sms(
                "Simulated SMS sending failure".to_string(),
            ));
        }

        // Simulate network delay
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let message_id = format!("mock_sms_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK SMS SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {}", phone_number);
            println!("Message ID: {}", message_id);
            println!("Content: {}", message);
            println!("{}\n", "=".repeat(60));
        }

        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentMessage {
                message_id: message_id.clone(),
                to: phone_number.to_string(),
                body: message.to_string(),
            });

        info!(
            target: "sms_service",
            provider = "mock",
            phone = %masked_phone,
            message_id = %message_id,
            message_length = message.len(),
            "SMS sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
