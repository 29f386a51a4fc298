//! Unit tests for the OTP policy engine

use std::sync::Arc;

use crate::domain::value_objects::IdentityStatus;
use crate::errors::{DomainError, ErrorKind, OtpError};
use crate::services::otp::policy::{
    OtpKeys, ACCOUNT_LOCK_TTL_SECS, OTP_SUBJECT, REQUEST_WINDOW_SECS, SPAM_LOCK_TTL_SECS,
};
use crate::services::otp::OtpPolicyEngine;

use super::mocks::{MockNotificationSender, MockStore};

const EMAIL: &str = "jane@example.com";
const TEMPLATE: &str = "user-activation-mail";

fn engine(
    store_fails: bool,
    sender_fails: bool,
) -> (
    OtpPolicyEngine<MockStore, MockNotificationSender>,
    Arc<MockStore>,
    Arc<MockNotificationSender>,
) {
    let store = Arc::new(MockStore::new(store_fails));
    let sender = Arc::new(MockNotificationSender::new(sender_fails));
    let engine = OtpPolicyEngine::new(store.clone(), sender.clone());
    (engine, store, sender)
}

fn wrong_code_for(code: &str) -> &'static str {
    if code == "1000" {
        "1001"
    } else {
        "1000"
    }
}

#[tokio::test]
async fn test_fresh_identity_passes_restriction_check() {
    let (engine, store, _) = engine(false, false);

    assert!(engine.check_restrictions(EMAIL).await.is_ok());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_third_request_in_window_sets_spam_lock() {
    let (engine, store, _) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.track_request(EMAIL).await.unwrap();
    engine.track_request(EMAIL).await.unwrap();
    assert_eq!(store.value(&keys.request_count).as_deref(), Some("2"));

    let result = engine.track_request(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::SpamLocked))));
    assert_eq!(store.value(&keys.spam_lock).as_deref(), Some("locked"));
    assert_eq!(store.ttl(&keys.spam_lock), Some(SPAM_LOCK_TTL_SECS));

    let result = engine.check_restrictions(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::SpamLocked))));
}

#[tokio::test]
async fn test_request_window_rearmed_on_each_increment() {
    let (engine, store, _) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    // Counter left over from earlier in the window with a partly elapsed TTL
    store.insert(&keys.request_count, "1", 120);

    engine.track_request(EMAIL).await.unwrap();
    assert_eq!(store.value(&keys.request_count).as_deref(), Some("2"));
    assert_eq!(store.ttl(&keys.request_count), Some(REQUEST_WINDOW_SECS));
}

#[tokio::test]
async fn test_non_numeric_counter_treated_as_zero() {
    let (engine, store, _) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);
    store.insert(&keys.request_count, "garbage", 3600);

    engine.track_request(EMAIL).await.unwrap();
    assert_eq!(store.value(&keys.request_count).as_deref(), Some("1"));
}

#[tokio::test]
async fn test_issue_sends_then_persists_code_and_cooldown() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, EMAIL);
    assert_eq!(sent[0].subject, OTP_SUBJECT);
    assert_eq!(sent[0].template_id, TEMPLATE);
    assert_eq!(sent[0].variables.get("name").map(String::as_str), Some("Jane"));

    let code = sender.last_code(EMAIL).unwrap();
    assert_eq!(store.value(&keys.otp), Some(code));
    assert_eq!(store.ttl(&keys.otp), Some(300));
    assert_eq!(store.value(&keys.cooldown).as_deref(), Some("true"));
    assert_eq!(store.ttl(&keys.cooldown), Some(60));

    let result = engine.check_restrictions(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::Cooldown))));
}

#[tokio::test]
async fn test_issue_then_correct_verify_clears_state() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();

    // One miss first so the attempt counter exists
    let _ = engine.verify_otp(EMAIL, wrong_code_for(&code)).await;
    assert!(store.value(&keys.attempts).is_some());

    engine.verify_otp(EMAIL, &code).await.unwrap();
    assert!(store.value(&keys.otp).is_none());
    assert!(store.value(&keys.attempts).is_none());
}

#[tokio::test]
async fn test_wrong_codes_escalate_to_account_lock() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();
    let wrong = wrong_code_for(&code);

    let first = engine.verify_otp(EMAIL, wrong).await.unwrap_err();
    assert_eq!(first.attempts_remaining(), Some(2));
    assert_eq!(first.to_string(), "Incorrect OTP. 2 attempts left.");
    assert_eq!(store.value(&keys.attempts).as_deref(), Some("1"));
    assert_eq!(store.ttl(&keys.attempts), Some(300));

    let second = engine.verify_otp(EMAIL, wrong).await.unwrap_err();
    assert_eq!(second.attempts_remaining(), Some(1));

    let third = engine.verify_otp(EMAIL, wrong).await.unwrap_err();
    assert!(matches!(third, DomainError::Otp(OtpError::TooManyAttempts)));
    assert_eq!(store.value(&keys.account_lock).as_deref(), Some("locked"));
    assert_eq!(store.ttl(&keys.account_lock), Some(ACCOUNT_LOCK_TTL_SECS));
    assert!(store.value(&keys.otp).is_none());
    assert!(store.value(&keys.attempts).is_none());

    let result = engine.check_restrictions(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::AccountLocked))));

    // The original code is gone too
    let result = engine.verify_otp(EMAIL, &code).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::InvalidOrExpired))));
}

#[tokio::test]
async fn test_verify_without_active_otp() {
    let (engine, store, _) = engine(false, false);

    let result = engine.verify_otp(EMAIL, "1234").await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::InvalidOrExpired))));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_verify_after_code_expiry() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();
    store.expire(&keys.otp);

    let result = engine.verify_otp(EMAIL, &code).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::InvalidOrExpired))));
}

#[tokio::test]
async fn test_reissue_after_cooldown_expiry() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.check_restrictions(EMAIL).await.unwrap();
    engine.track_request(EMAIL).await.unwrap();
    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();
    engine.verify_otp(EMAIL, &code).await.unwrap();

    store.expire(&keys.cooldown);

    engine.check_restrictions(EMAIL).await.unwrap();
    engine.track_request(EMAIL).await.unwrap();
    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    assert_eq!(sender.sent().len(), 2);
    assert!(store.value(&keys.otp).is_some());
}

#[tokio::test]
async fn test_reissue_keeps_failed_attempt_counter() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();
    let _ = engine.verify_otp(EMAIL, wrong_code_for(&code)).await;
    let _ = engine.verify_otp(EMAIL, wrong_code_for(&code)).await;
    assert_eq!(store.value(&keys.attempts).as_deref(), Some("2"));

    store.expire(&keys.cooldown);
    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let fresh = sender.last_code(EMAIL).unwrap();

    // Misses against the previous code still count against the new one
    assert_eq!(store.value(&keys.attempts).as_deref(), Some("2"));
    let result = engine.verify_otp(EMAIL, wrong_code_for(&fresh)).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::TooManyAttempts))));
}

#[tokio::test]
async fn test_send_failure_persists_nothing() {
    let (engine, store, _) = engine(false, true);

    let error = engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotificationFailure);
    assert!(error.is_infrastructure());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_store_failure_maps_to_store_unavailable() {
    let (engine, _, _) = engine(true, false);

    let error = engine.check_restrictions(EMAIL).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StoreUnavailable);

    let error = engine.verify_otp(EMAIL, "1234").await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::StoreUnavailable);
}

#[tokio::test]
async fn test_restriction_precedence_and_lazy_reads() {
    let (engine, store, _) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);
    store.insert(&keys.cooldown, "true", 60);
    store.insert(&keys.spam_lock, "locked", 3600);
    store.insert(&keys.account_lock, "locked", 1800);

    let status = engine.identity_status(EMAIL).await.unwrap();
    assert_eq!(status, IdentityStatus::AccountLocked);
    assert_eq!(store.reads(), vec![keys.account_lock.clone()]);

    store.expire(&keys.account_lock);
    let result = engine.check_restrictions(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::SpamLocked))));

    store.expire(&keys.spam_lock);
    let result = engine.check_restrictions(EMAIL).await;
    assert!(matches!(result, Err(DomainError::Otp(OtpError::Cooldown))));
}

#[tokio::test]
async fn test_verify_ignores_issuance_locks() {
    let (engine, store, sender) = engine(false, false);
    let keys = OtpKeys::for_identity(EMAIL);

    engine.issue_otp("Jane", EMAIL, TEMPLATE).await.unwrap();
    let code = sender.last_code(EMAIL).unwrap();
    store.insert(&keys.spam_lock, "locked", 3600);

    assert!(engine.verify_otp(EMAIL, &code).await.is_ok());
}
