//! Mock email service that logs instead of sending

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use gg_shared::config::DeliveryConfig;
use gg_shared::email::{is_valid_email, mask_email};

use super::email_service::EmailService;
use super::SentMessage;
use crate::InfrastructureError;

/// Mock email service for development and testing
#[derive(Clone)]
pub struct MockEmailService {
    message_count: Arc<AtomicU64>,
    outbox: Arc<Mutex<Vec<SentMessage>>>,
    sender: String,
    simulate_failure: bool,
    console_output: bool,
    latency: Duration,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self::from_config(&DeliveryConfig::default())
    }

    pub fn from_config(config: &DeliveryConfig) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            outbox: Arc::new(Mutex::new(Vec::new())),
            sender: config.email_sender.clone(),
            simulate_failure: false,
            console_output: config.console_output,
            latency: config.simulated_latency(),
        }
    }

    /// Quiet, instant service for tests
    pub fn silent() -> Self {
        Self {
            console_output: false,
            latency: Duration::ZERO,
            ..Self::new()
        }
    }

    pub fn set_simulate_failure(&mut self, simulate: bool) {
        self.simulate_failure = simulate;
    }

    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Most recent message sent to `to`
    pub fn last_message_to(&self, to: &str) -> Option<SentMessage> {
        let outbox = self.outbox.lock().unwrap_or_else(|e| e.into_inner());
        outbox.iter().rev().find(|m| m.to == to).cloned()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let masked = mask_email(to);

        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                masked
            )));
        }

        if self.simulate_failure {
            warn!(email = %masked, "Mock email service simulating failure");
            return Err(InfrastructureError::Email(
                "Simulated email sending failure".to_string(),
            ));
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let message_id = format!("mock_email_{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            println!("\n{}", "=".repeat(60));
            println!("MOCK EMAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("From: {}", self.sender);
            println!("To: {}", to);
            println!("Subject: {}", subject);
            println!("{}", body);
            println!("{}\n", "=".repeat(60));
        }

        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(SentMessage {
                message_id: message_id.clone(),
                to: to.to_string(),
                body: body.to_string(),
            });

        info!(
            target: "email_service",
            provider = "mock",
            email = %masked,
            message_id = %message_id,
            "Email sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
