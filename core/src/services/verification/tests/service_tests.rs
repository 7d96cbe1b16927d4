//! Unit tests for verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::verification_code::{Channel, CODE_LENGTH};
use crate::errors::{AuthError, DomainError};
use crate::repositories::InMemoryVerificationCodeStore;
use crate::services::clock::{Clock, ManualClock};
use crate::services::verification::{
    FixedCodeGenerator, VerificationService, VerificationServiceConfig,
};

use super::mocks::MockDelivery;

type TestService = VerificationService<InMemoryVerificationCodeStore, MockDelivery>;

fn service_with(delivery: Arc<MockDelivery>, clock: Arc<ManualClock>) -> TestService {
    VerificationService::new(
        Arc::new(InMemoryVerificationCodeStore::new()),
        delivery,
        VerificationServiceConfig::default(),
    )
    .with_clock(clock)
}

#[tokio::test]
async fn test_send_code_success() {
    let delivery = Arc::new(MockDelivery::new(false));
    let clock = Arc::new(ManualClock::default());
    let service = service_with(delivery.clone(), clock.clone());

    let result = service.send_code("jane@x.com", Channel::Email).await.unwrap();

    assert_eq!(result.entry.destination, "jane@x.com");
    assert_eq!(result.entry.channel, Channel::Email);
    assert_eq!(result.entry.code.len(), CODE_LENGTH);
    assert_eq!(result.entry.expires_at, clock.now() + Duration::minutes(15));
    assert_eq!(result.next_resend_at, clock.now() + Duration::seconds(60));
    assert!(result.message_id.starts_with("mock-msg-"));

    assert_eq!(delivery.get_sent_code("jane@x.com"), Some(result.entry.code.clone()));
    assert!(service.code_exists("jane@x.com").await.unwrap());
}

#[tokio::test]
async fn test_verify_code_single_use() {
    let delivery = Arc::new(MockDelivery::new(false));
    let service = service_with(delivery.clone(), Arc::new(ManualClock::default()))
        .with_code_generator(Arc::new(FixedCodeGenerator::new("123456")));

    service.send_code("5551234567", Channel::Phone).await.unwrap();

    assert!(service.verify_code("5551234567", "123456").await.is_ok());

    let second = service.verify_code("5551234567", "123456").await;
    assert!(matches!(
        second,
        Err(DomainError::Auth(AuthError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_verify_code_mismatch_keeps_code() {
    let service = service_with(Arc::new(MockDelivery::new(false)), Arc::new(ManualClock::default()))
        .with_code_generator(Arc::new(FixedCodeGenerator::new("123456")));

    service.send_code("jane@x.com", Channel::Email).await.unwrap();

    let result = service.verify_code("jane@x.com", "654321").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::Mismatch))));
    assert!(service.verify_code("jane@x.com", "123456").await.is_ok());
}

#[tokio::test]
async fn test_verify_code_expired() {
    let clock = Arc::new(ManualClock::default());
    let service = service_with(Arc::new(MockDelivery::new(false)), clock.clone())
        .with_code_generator(Arc::new(FixedCodeGenerator::new("123456")));

    service.send_code("jane@x.com", Channel::Email).await.unwrap();

    clock.advance(Duration::minutes(15));
    clock.advance(Duration::seconds(1));

    let result = service.verify_code("jane@x.com", "123456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::Expired))));
}

#[tokio::test]
async fn test_verify_at_exact_expiry_succeeds() {
    let clock = Arc::new(ManualClock::default());
    let service = service_with(Arc::new(MockDelivery::new(false)), clock.clone())
        .with_code_generator(Arc::new(FixedCodeGenerator::new("123456")));

    service.send_code("jane@x.com", Channel::Email).await.unwrap();
    clock.advance(Duration::minutes(15));

    assert!(service.verify_code("jane@x.com", "123456").await.is_ok());
}

#[tokio::test]
async fn test_verify_without_code() {
    let service = service_with(Arc::new(MockDelivery::new(false)), Arc::new(ManualClock::default()));

    let result = service.verify_code("nobody@x.com", "123456").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_resend_invalidates_previous_code() {
    let service = service_with(Arc::new(MockDelivery::new(false)), Arc::new(ManualClock::default()))
        .with_code_generator(Arc::new(FixedCodeGenerator::sequence(vec![
            "111111".to_string(),
            "222222".to_string(),
        ])));

    service.send_code("jane@x.com", Channel::Email).await.unwrap();
    service.send_code("jane@x.com", Channel::Email).await.unwrap();

    let stale = service.verify_code("jane@x.com", "111111").await;
    assert!(matches!(stale, Err(DomainError::Auth(AuthError::Mismatch))));
    assert!(service.verify_code("jane@x.com", "222222").await.is_ok());
}

#[tokio::test]
async fn test_delivery_failure_leaves_no_code() {
    let service = service_with(Arc::new(MockDelivery::new(true)), Arc::new(ManualClock::default()));

    let result = service.send_code("jane@x.com", Channel::Email).await;
    match result {
        Err(DomainError::Internal { message }) => {
            assert!(message.contains("Delivery service error"));
        }
        other => panic!("Expected internal error, got {:?}", other.map(|r| r.entry)),
    }
    assert!(!service.code_exists("jane@x.com").await.unwrap());
}

#[tokio::test]
async fn test_clear_and_purge() {
    let clock = Arc::new(ManualClock::new(Utc::now()));
    let service = service_with(Arc::new(MockDelivery::new(false)), clock.clone());

    service.send_code("old@x.com", Channel::Email).await.unwrap();
    clock.advance(Duration::minutes(10));
    service.send_code("new@x.com", Channel::Email).await.unwrap();
    service.send_code("5551234567", Channel::Phone).await.unwrap();

    service.clear("5551234567").await.unwrap();
    assert!(!service.code_exists("5551234567").await.unwrap());

    clock.advance(Duration::minutes(6));
    assert_eq!(service.purge_expired().await.unwrap(), 1);
    assert!(!service.code_exists("old@x.com").await.unwrap());
    assert!(service.code_exists("new@x.com").await.unwrap());
}

#[tokio::test]
async fn test_failed_resend_keeps_previous_code() {
    let delivery = Arc::new(MockDelivery::new(false));
    let clock = Arc::new(ManualClock::default());
    let service = service_with(delivery.clone(), clock.clone())
        .with_code_generator(Arc::new(FixedCodeGenerator::sequence(vec![
            "111111".to_string(),
            "222222".to_string(),
        ])));

    let first = service.send_code("jane@x.com", Channel::Email).await.unwrap();
    clock.advance(Duration::minutes(1));

    delivery.set_failing(true);
    let resend = service.send_code("jane@x.com", Channel::Email).await;
    assert!(matches!(resend, Err(DomainError::Internal { .. })));

    assert_eq!(delivery.get_sent_code("jane@x.com"), Some("111111".to_string()));
    assert!(service.verify_code("jane@x.com", &first.entry.code).await.is_ok());
}

#[tokio::test]
async fn test_failed_resend_after_expiry_leaves_no_code() {
    let delivery = Arc::new(MockDelivery::new(false));
    let clock = Arc::new(ManualClock::default());
    let service = service_with(delivery.clone(), clock.clone());

    service.send_code("jane@x.com", Channel::Email).await.unwrap();
    clock.advance(Duration::minutes(16));

    delivery.set_failing(true);
    assert!(service.send_code("jane@x.com", Channel::Email).await.is_err());
    assert!(!service.code_exists("jane@x.com").await.unwrap());
}
