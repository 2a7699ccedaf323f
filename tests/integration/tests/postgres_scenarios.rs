//! Wink scenarios against PostgreSQL
//!
//! These tests require a running PostgreSQL instance and DATABASE_URL.
//!
//! Run with: cargo test -p integration-tests --test postgres_scenarios

use chrono::Duration;
use integration_tests::{check_test_env, unique_user, user_pair, TestHarness};
use wink_core::{WinkDecision, WinkStatus};
use wink_service::WinkService;

#[tokio::test]
async fn test_wink_lifecycle() {
    if !check_test_env() {
        return;
    }

    let harness = TestHarness::postgres().await.expect("Failed to connect");
    let (alice, bob) = user_pair();

    let wink_id = harness.send_ok(&alice, &bob).await.unwrap();
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 1);

    harness.advance(Duration::days(2));
    let refused = harness.service().send(&alice, bob.id).await.unwrap();
    assert!(!refused.success);

    harness
        .service()
        .respond(&bob, wink_id, WinkDecision::Accepted)
        .await
        .unwrap();
    let status = harness.service().check_status(&alice, bob.id).await.unwrap();
    assert_eq!(status.status, Some(WinkStatus::Accepted));
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 0);

    let err = harness
        .service()
        .respond(&bob, wink_id, WinkDecision::Rejected)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "WINK_ALREADY_RESOLVED");

    harness.advance(Duration::days(5));
    assert!(harness.service().send(&alice, bob.id).await.unwrap().success);
}

#[tokio::test]
async fn test_concurrent_sends_insert_once() {
    if !check_test_env() {
        return;
    }

    let harness = TestHarness::postgres().await.expect("Failed to connect");
    let (alice, bob) = user_pair();

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let ctx = harness.ctx.clone();
            tokio::spawn(async move { WinkService::new(&ctx).send(&alice, bob.id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().success {
            successes += 1;
        }
    }
    assert_eq!(successes, 1);
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 1);
}

#[tokio::test]
async fn test_pending_count_per_recipient() {
    if !check_test_env() {
        return;
    }

    let harness = TestHarness::postgres().await.expect("Failed to connect");
    let bob = unique_user();

    for _ in 0..3 {
        harness.send_ok(&unique_user(), &bob).await.unwrap();
    }
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 3);
}
