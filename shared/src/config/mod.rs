//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `environment` - Environment detection and logging configuration
//! - `verification` - One-time code expiry and resend cool-down
//! - `registration` - Student id allocation and password hashing
//! - `session` - Current-user slot persistence
//! - `delivery` - Simulated email/SMS delivery

pub mod delivery;
pub mod environment;
pub mod registration;
pub mod session;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use delivery::DeliveryConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use registration::RegistrationConfig;
pub use session::SessionConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Registration configuration
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Session persistence configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Code delivery configuration
    #[serde(default)]
    pub delivery: DeliveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            verification: VerificationConfig::default(),
            registration: RegistrationConfig::default(),
            session: SessionConfig::default(),
            delivery: DeliveryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            registration: RegistrationConfig {
                password_hash_cost: 12,
                ..Default::default()
            },
            delivery: DeliveryConfig {
                console_output: false,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
            ..Default::default()
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            verification: VerificationConfig::from_env(),
            registration: RegistrationConfig::from_env(),
            session: SessionConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}
