//! Traits for code delivery and code generation

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::entities::verification_code::{Channel, VerificationEntry};

/// Trait for email/SMS delivery integration
#[async_trait]
pub trait CodeDelivery: Send + Sync {
    /// Deliver a verification code, returning the provider message id
    async fn deliver(&self, destination: &str, channel: Channel, code: &str)
        -> Result<String, String>;
}

/// Source of new verification codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random 6-digit codes
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        VerificationEntry::generate_code()
    }
}

/// Hands out preset codes in order, repeating the last one
///
/// For tests and scripted demos only; `VerificationService::new` defaults
/// to [`RandomCodeGenerator`].
#[derive(Debug)]
pub struct FixedCodeGenerator {
    codes: Mutex<Vec<String>>,
}

impl FixedCodeGenerator {
    pub fn new(code: impl Into<String>) -> Self {
        Self::sequence(vec![code.into()])
    }

    /// Generator yielding `codes` front to back
    pub fn sequence(codes: Vec<String>) -> Self {
        let mut codes = codes;
        codes.reverse();
        Self {
            codes: Mutex::new(codes),
        }
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> String {
        let mut codes = self.codes.lock().unwrap_or_else(|e| e.into_inner());
        if codes.len() > 1 {
            codes.pop().unwrap_or_default()
        } else {
            codes.last().cloned().unwrap_or_default()
        }
    }
}
