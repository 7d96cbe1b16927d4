//! Unit tests for the account registry

use std::sync::Arc;

use gg_shared::config::RegistrationConfig;

use crate::domain::entities::account::{Profile, Role, StudentLevel};
use crate::domain::value_objects::{StaffRegistration, StudentRegistration};
use crate::errors::{AuthError, DomainError};
use crate::repositories::{InMemoryAccountRepository, InMemorySessionStore, SessionStore};
use crate::services::accounts::AccountRegistry;
use crate::services::session::SessionHolder;

type TestRegistry = AccountRegistry<InMemoryAccountRepository, InMemorySessionStore>;

fn registry() -> (TestRegistry, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let config = RegistrationConfig {
        password_hash_cost: 4,
        ..RegistrationConfig::default()
    };
    let registry = AccountRegistry::new(
        Arc::new(InMemoryAccountRepository::new()),
        Arc::new(SessionHolder::new(store.clone())),
        config,
    );
    (registry, store)
}

fn jane() -> StudentRegistration {
    StudentRegistration::new(
        "Jane Doe",
        "jane@x.com",
        "5551234567",
        "Secret123",
        StudentLevel::Beginner,
        vec!["1".to_string()],
    )
}

fn sam() -> StaffRegistration {
    StaffRegistration::new(
        "Sam",
        "Teacher",
        "sam@x.com",
        "5559876543",
        "Phonetics",
        "MA in Linguistics",
        "Teach3rPass",
    )
}

fn assert_auth(result: Result<impl std::fmt::Debug, DomainError>, expected: AuthError) {
    match result {
        Err(DomainError::Auth(err)) => assert_eq!(err, expected),
        other => panic!("Expected {:?}, got {:?}", expected, other),
    }
}

#[tokio::test]
async fn test_register_student_assigns_sequential_ids() {
    let (registry, _) = registry();

    let first = registry.register_student(&jane()).await.unwrap();
    let mut second_form = jane();
    second_form.email = "john@x.com".to_string();
    let second = registry.register_student(&second_form).await.unwrap();

    assert_eq!(first.student_id(), Some("GG2025001"));
    assert_eq!(second.student_id(), Some("GG2025002"));
    assert_eq!(first.role(), Role::Student);
    assert!(!first.is_verified);
    assert_eq!(first.pending_verification.email.as_deref(), Some("jane@x.com"));
    assert_eq!(first.pending_verification.mobile.as_deref(), Some("5551234567"));
}

#[tokio::test]
async fn test_register_stores_password_hash() {
    let (registry, _) = registry();
    let account = registry.register_student(&jane()).await.unwrap();

    assert_ne!(account.password_hash, "Secret123");
    assert!(account.password_hash.starts_with("$2"));
}

#[tokio::test]
async fn test_duplicate_email_rejected_case_insensitively() {
    let (registry, _) = registry();
    let first = registry.register_student(&jane()).await.unwrap();

    let mut again = jane();
    again.email = "  JANE@X.COM ".to_string();
    again.name = "Someone Else".to_string();
    assert_auth(
        registry.register_student(&again).await,
        AuthError::DuplicateEmail {
            email: "jane@x.com".to_string(),
        },
    );

    let mut staff = sam();
    staff.email = "jane@x.com".to_string();
    assert!(registry.register_staff(&staff).await.is_err());

    let stored = registry.find_by_email("jane@x.com").await.unwrap().unwrap();
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.name, "Jane Doe");
}

#[tokio::test]
async fn test_register_staff() {
    let (registry, _) = registry();
    let account = registry.register_staff(&sam()).await.unwrap();

    assert_eq!(account.name, "Sam Teacher");
    assert_eq!(account.role(), Role::Staff);
    assert!(!account.is_approved());
    assert!(!account.is_verified);
}

#[tokio::test]
async fn test_mark_verified_is_idempotent() {
    let (registry, _) = registry();
    let account = registry.register_student(&jane()).await.unwrap();

    let after_mobile = registry.mark_mobile_verified(account.id).await.unwrap();
    assert!(!after_mobile.is_verified);

    let after_email = registry.mark_email_verified(account.id).await.unwrap();
    assert!(after_email.is_verified);

    let again = registry.mark_email_verified(account.id).await.unwrap();
    assert!(again.is_verified);
    assert!(again.pending_verification.is_empty());
}

#[tokio::test]
async fn test_mark_unknown_account() {
    let (registry, _) = registry();
    assert_auth(
        registry.mark_email_verified(uuid::Uuid::new_v4()).await,
        AuthError::account_not_found(),
    );
}

#[tokio::test]
async fn test_approve_staff() {
    let (registry, _) = registry();
    let staff = registry.register_staff(&sam()).await.unwrap();
    let student = registry.register_student(&jane()).await.unwrap();

    assert!(registry.approve_staff(staff.id).await.unwrap().is_approved());
    assert_auth(registry.approve_staff(student.id).await, AuthError::NotStaff);
    assert_auth(
        registry.approve_staff(uuid::Uuid::new_v4()).await,
        AuthError::account_not_found(),
    );
}

#[tokio::test]
async fn test_login_gates_in_order() {
    let (registry, store) = registry();

    assert_auth(
        registry.login("nobody@x.com", "Secret123").await,
        AuthError::account_not_found(),
    );

    let account = registry.register_student(&jane()).await.unwrap();
    assert_auth(
        registry.login("jane@x.com", "wrong").await,
        AuthError::NotVerified,
    );

    registry.mark_email_verified(account.id).await.unwrap();
    registry.mark_mobile_verified(account.id).await.unwrap();
    assert_auth(
        registry.login("jane@x.com", "wrong").await,
        AuthError::InvalidCredentials,
    );
    assert!(store.get("currentUser").await.unwrap().is_none());

    let logged_in = registry.login("Jane@X.com", "Secret123").await.unwrap();
    assert!(logged_in.last_login_at.is_some());
    assert_eq!(registry.session().current().await.unwrap().id, account.id);
    assert!(store.get("currentUser").await.unwrap().is_some());
}

#[tokio::test]
async fn test_staff_login_pending_until_approved() {
    let (registry, _) = registry();
    let staff = registry.register_staff(&sam()).await.unwrap();
    registry.mark_email_verified(staff.id).await.unwrap();
    registry.mark_mobile_verified(staff.id).await.unwrap();

    assert_auth(
        registry.login("sam@x.com", "Teach3rPass").await,
        AuthError::PendingApproval,
    );

    registry.approve_staff(staff.id).await.unwrap();
    let account = registry.login("sam@x.com", "Teach3rPass").await.unwrap();
    assert_eq!(account.id, staff.id);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (registry, store) = registry();
    let admin = registry
        .register_admin("Admin", "admin@grammar.gallery", "5550000000", "Adm1nPass")
        .await
        .unwrap();
    registry.login("admin@grammar.gallery", "Adm1nPass").await.unwrap();
    assert_eq!(registry.session().current().await.unwrap().id, admin.id);

    registry.logout().await.unwrap();
    assert!(registry.session().current().await.is_none());
    assert!(store.get("currentUser").await.unwrap().is_none());
}

#[tokio::test]
async fn test_amend_student_replaces_form_details() {
    let (registry, _) = registry();
    let account = registry.register_student(&jane()).await.unwrap();
    registry.mark_email_verified(account.id).await.unwrap();

    let mut corrected = jane();
    corrected.phone = " 5550001111 ".to_string();
    corrected.level = StudentLevel::Intermediate;
    corrected.course_ids = vec!["2".to_string(), "3".to_string()];
    let amended = registry.amend_student(account.id, &corrected).await.unwrap();

    assert_eq!(amended.phone, "5550001111");
    assert_eq!(amended.student_id(), Some("GG2025001"));
    assert!(amended.email_verified);
    assert_eq!(amended.pending_verification.mobile.as_deref(), Some("5550001111"));
    match &amended.profile {
        Profile::Student { level, enrolled_courses, .. } => {
            assert_eq!(*level, StudentLevel::Intermediate);
            assert_eq!(enrolled_courses, &vec!["2".to_string(), "3".to_string()]);
        }
        other => panic!("unexpected profile {:?}", other),
    }
    let stored = registry.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored, amended);
}

#[tokio::test]
async fn test_amend_rejects_wrong_role_and_finished_accounts() {
    let (registry, _) = registry();
    let student = registry.register_student(&jane()).await.unwrap();
    let staff = registry.register_staff(&sam()).await.unwrap();

    assert!(matches!(
        registry.amend_staff(student.id, &sam()).await,
        Err(DomainError::Validation { .. })
    ));
    assert!(matches!(
        registry.amend_student(staff.id, &jane()).await,
        Err(DomainError::Validation { .. })
    ));

    let mut fixed = sam();
    fixed.department = "Grammar".to_string();
    let amended = registry.amend_staff(staff.id, &fixed).await.unwrap();
    assert!(matches!(&amended.profile, Profile::Staff { department, .. } if department == "Grammar"));

    registry.mark_email_verified(student.id).await.unwrap();
    registry.mark_mobile_verified(student.id).await.unwrap();
    assert!(matches!(
        registry.amend_student(student.id, &jane()).await,
        Err(DomainError::Validation { .. })
    ));
    assert_auth(
        registry.amend_student(uuid::Uuid::new_v4(), &jane()).await,
        AuthError::account_not_found(),
    );
}
