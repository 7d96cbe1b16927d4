//! Code delivery configuration

use serde::{Deserialize, Serialize};

/// Settings for the simulated email and SMS gateways
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Fixed delay standing in for gateway latency, in milliseconds
    #[serde(default = "default_simulated_latency_ms")]
    pub simulated_latency_ms: u64,

    /// Echo delivered messages to stdout
    #[serde(default = "default_console_output")]
    pub console_output: bool,

    /// Sender shown on simulated emails
    #[serde(default = "default_email_sender")]
    pub email_sender: String,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_simulated_latency_ms(),
            console_output: default_console_output(),
            email_sender: default_email_sender(),
        }
    }
}

impl DeliveryConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let simulated_latency_ms = std::env::var("DELIVERY_SIMULATED_LATENCY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_simulated_latency_ms);
        let console_output = std::env::var("DELIVERY_CONSOLE_OUTPUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_console_output);

        Self {
            simulated_latency_ms,
            console_output,
            email_sender: std::env::var("DELIVERY_EMAIL_SENDER")
                .unwrap_or_else(|_| default_email_sender()),
        }
    }

    /// Simulated latency as a std duration
    pub fn simulated_latency(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.simulated_latency_ms)
    }
}

fn default_simulated_latency_ms() -> u64 {
    100
}

fn default_console_output() -> bool {
    true
}

fn default_email_sender() -> String {
    String::from("no-reply@grammar.gallery")
}
