//! Test fixtures for the registration workflow

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use gg_shared::config::RegistrationConfig;

use crate::domain::entities::verification_code::Channel;
use crate::repositories::{
    InMemoryAccountRepository, InMemorySessionStore, InMemoryVerificationCodeStore,
};
use crate::services::accounts::AccountRegistry;
use crate::services::clock::ManualClock;
use crate::services::registration::RegistrationWorkflow;
use crate::services::session::SessionHolder;
use crate::services::verification::{
    CodeDelivery, FixedCodeGenerator, VerificationService, VerificationServiceConfig,
};

// Delivery that remembers every code it was asked to send
#[derive(Default)]
pub struct RecordingDelivery {
    pub sent: Mutex<Vec<(String, Channel, String)>>,
}

impl RecordingDelivery {
    pub fn sent_to(&self, destination: &str) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, _, _)| d == destination)
            .count()
    }
}

#[async_trait]
impl CodeDelivery for RecordingDelivery {
    async fn deliver(
        &self,
        destination: &str,
        channel: Channel,
        code: &str,
    ) -> Result<String, String> {
        self.sent
            .lock()
            .unwrap()
            .push((destination.to_string(), channel, code.to_string()));
        Ok(format!("msg-{}", self.sent.lock().unwrap().len()))
    }
}

pub type TestWorkflow = RegistrationWorkflow<
    InMemoryAccountRepository,
    InMemorySessionStore,
    InMemoryVerificationCodeStore,
    RecordingDelivery,
>;

pub struct Harness {
    pub registry: Arc<AccountRegistry<InMemoryAccountRepository, InMemorySessionStore>>,
    pub verification: Arc<VerificationService<InMemoryVerificationCodeStore, RecordingDelivery>>,
    pub delivery: Arc<RecordingDelivery>,
    pub codes: Arc<InMemoryVerificationCodeStore>,
    pub session_store: Arc<InMemorySessionStore>,
    pub clock: Arc<ManualClock>,
}

impl Harness {
    /// Every generated code is `123456`
    pub fn new() -> Self {
        let session_store = Arc::new(InMemorySessionStore::new());
        let registry = Arc::new(AccountRegistry::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(SessionHolder::new(session_store.clone())),
            RegistrationConfig {
                password_hash_cost: 4,
                ..RegistrationConfig::default()
            },
        ));

        let clock = Arc::new(ManualClock::default());
        let codes = Arc::new(InMemoryVerificationCodeStore::new());
        let delivery = Arc::new(RecordingDelivery::default());
        let verification = Arc::new(
            VerificationService::new(
                codes.clone(),
                delivery.clone(),
                VerificationServiceConfig::default(),
            )
            .with_clock(clock.clone())
            .with_code_generator(Arc::new(FixedCodeGenerator::new("123456"))),
        );

        Self {
            registry,
            verification,
            delivery,
            codes,
            session_store,
            clock,
        }
    }

    pub fn workflow(&self) -> TestWorkflow {
        RegistrationWorkflow::new(self.registry.clone(), self.verification.clone())
    }
}
