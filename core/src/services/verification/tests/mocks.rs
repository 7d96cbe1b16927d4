//! Mock implementations for testing verification service

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::entities::verification_code::Channel;
use crate::services::verification::traits::CodeDelivery;

// Mock delivery recording the last code per destination
pub struct MockDelivery {
    pub sent_messages: Arc<Mutex<HashMap<String, (Channel, String)>>>,
    pub should_fail: AtomicBool,
}

impl MockDelivery {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail: AtomicBool::new(should_fail),
        }
    }

    pub fn get_sent_code(&self, destination: &str) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .get(destination)
            .map(|(_, code)| code.clone())
    }

    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl CodeDelivery for MockDelivery {
    async fn deliver(
        &self,
        destination: &str,
        channel: Channel,
        code: &str,
    ) -> Result<String, String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("Delivery service error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(destination.to_string(), (channel, code.to_string()));
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }
}
