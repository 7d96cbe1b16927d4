//! # Infrastructure Layer
//!
//! Concrete implementations behind the Grammar Gallery core traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Delivery**: simulated email and SMS senders routed per channel
//! - **Session**: a JSON file store that keeps the current user across restarts
//! - **Config**: layered configuration loading (defaults, file, environment)
//! - **Logging**: `tracing` subscriber setup

use std::sync::Arc;

use gg_core::repositories::{InMemoryAccountRepository, InMemoryVerificationCodeStore};
use gg_core::services::{
    AccountRegistry, RegistrationWorkflow, SessionHolder, VerificationService,
    VerificationServiceConfig,
};
use gg_shared::config::AppConfig;

// Re-export core types for convenience
pub use gg_core::errors::*;

pub mod config;
pub mod delivery;
pub mod logging;
pub mod session;

use delivery::{DeliveryRouter, MockEmailService, MockSmsService};
use session::FileSessionStore;

/// Delivery used by the assembled services
pub type Delivery = DeliveryRouter<MockEmailService, MockSmsService>;

/// Account registry over in-memory accounts and the file session store
pub type Registry = AccountRegistry<InMemoryAccountRepository, FileSessionStore>;

/// Verification service over the in-memory code store and simulated delivery
pub type Verifier = VerificationService<InMemoryVerificationCodeStore, Delivery>;

/// Registration workflow over the assembled services
pub type Workflow = RegistrationWorkflow<
    InMemoryAccountRepository,
    FileSessionStore,
    InMemoryVerificationCodeStore,
    Delivery,
>;

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    pub config: AppConfig,
    pub registry: Arc<Registry>,
    pub verification: Arc<Verifier>,
    pub email: Arc<MockEmailService>,
    pub sms: Arc<MockSmsService>,
}

impl InfrastructureServices {
    /// Wire the services from configuration
    pub fn new(config: AppConfig) -> Self {
        let email = Arc::new(MockEmailService::from_config(&config.delivery));
        let sms = Arc::new(MockSmsService::from_config(&config.delivery));
        let router = Arc::new(DeliveryRouter::new(email.clone(), sms.clone()));

        let verification = Arc::new(VerificationService::new(
            Arc::new(InMemoryVerificationCodeStore::new()),
            router,
            VerificationServiceConfig::from(&config.verification),
        ));

        let session_store = Arc::new(FileSessionStore::new(&config.session.store_path));
        let session = Arc::new(SessionHolder::with_slot_key(
            session_store,
            config.session.slot_key.clone(),
        ));
        let registry = Arc::new(AccountRegistry::new(
            Arc::new(InMemoryAccountRepository::new()),
            session,
            config.registration.clone(),
        ));

        Self {
            config,
            registry,
            verification,
            email,
            sms,
        }
    }

    /// Start a new registration
    pub fn workflow(&self) -> Workflow {
        RegistrationWorkflow::new(self.registry.clone(), self.verification.clone())
    }
}

/// Initialize infrastructure services
///
/// This function:
/// - Builds the service graph from `config`
/// - Restores the current user from the session file, if any
pub async fn initialize(config: AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!(environment = %config.environment, "Initializing infrastructure services...");

    let services = InfrastructureServices::new(config);
    let restored = services.registry.session().restore().await?;

    tracing::info!(
        session_restored = restored.is_some(),
        "Infrastructure services initialized successfully"
    );
    Ok(services)
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Email delivery error
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS delivery error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),

    /// Domain error raised while initializing
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Domain(inner) => inner,
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
