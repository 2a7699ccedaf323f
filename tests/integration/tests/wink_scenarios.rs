//! End-to-end wink scenarios over the in-memory store
//!
//! Run with: cargo test -p integration-tests --test wink_scenarios

use chrono::Duration;
use integration_tests::{unique_user, user_pair, TestHarness};
use wink_core::{WinkDecision, WinkStatus};
use wink_service::dto::ListWinksRequest;
use wink_service::WinkService;

// ============================================================================
// Send / status
// ============================================================================

#[tokio::test]
async fn test_first_wink_is_pending() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();

    let sent = harness.service().send(&alice, bob.id).await.unwrap();
    assert!(sent.success);
    assert!(sent.wink_id.is_some());

    let status = harness.service().check_status(&alice, bob.id).await.unwrap();
    assert!(status.winked);
    assert_eq!(status.status, Some(WinkStatus::Pending));
    assert!(!status.can_send_new);
    assert_eq!(status.next_eligible_at, Some(harness.now() + Duration::days(7)));

    // the reverse direction is untouched
    let reverse = harness.service().check_status(&bob, alice.id).await.unwrap();
    assert!(!reverse.winked);
    assert!(reverse.can_send_new);
}

#[tokio::test]
async fn test_second_wink_within_five_days_refused() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();
    harness.send_ok(&alice, &bob).await.unwrap();

    harness.advance(Duration::days(5));
    let second = harness.service().send(&alice, bob.id).await.unwrap();

    assert!(!second.success);
    assert!(second.message.contains("pending"), "message: {}", second.message);
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 1);
}

#[tokio::test]
async fn test_rejected_wink_still_blocks_until_window_ends() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();
    let wink_id = harness.send_ok(&alice, &bob).await.unwrap();

    harness.advance(Duration::days(1));
    let rejected = harness
        .service()
        .respond(&bob, wink_id, WinkDecision::Rejected)
        .await
        .unwrap();
    assert_eq!(rejected.status, WinkStatus::Rejected);

    let status = harness.service().check_status(&alice, bob.id).await.unwrap();
    assert_eq!(status.status, Some(WinkStatus::Rejected));
    assert!(!status.can_send_new);

    harness.advance(Duration::days(5));
    let refused = harness.service().send(&alice, bob.id).await.unwrap();
    assert!(!refused.success);
    assert!(refused.message.contains("rejected"));

    // day 7 after the original wink
    harness.advance(Duration::days(1));
    assert!(harness.service().send(&alice, bob.id).await.unwrap().success);

    let status = harness.service().check_status(&alice, bob.id).await.unwrap();
    assert_eq!(status.status, Some(WinkStatus::Pending));
}

#[tokio::test]
async fn test_accept_is_reflected_immediately() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();
    let wink_id = harness.send_ok(&alice, &bob).await.unwrap();

    assert!(harness
        .service()
        .respond_ok(&bob, wink_id, WinkDecision::Accepted)
        .await);

    let status = harness.service().check_status(&alice, bob.id).await.unwrap();
    assert_eq!(status.status, Some(WinkStatus::Accepted));
}

#[tokio::test]
async fn test_cooldown_boundary_is_inclusive() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();
    harness.send_ok(&alice, &bob).await.unwrap();

    harness.advance(Duration::days(7) - Duration::seconds(1));
    assert!(!harness.service().send(&alice, bob.id).await.unwrap().success);

    harness.advance(Duration::seconds(1));
    assert!(harness.service().send(&alice, bob.id).await.unwrap().success);
}

// ============================================================================
// Pending count
// ============================================================================

#[tokio::test]
async fn test_pending_count_tracks_sends_and_responses() {
    let harness = TestHarness::in_memory();
    let bob = unique_user();
    let service = harness.service();

    assert_eq!(service.count_pending(&bob).await.unwrap(), 0);

    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(harness.send_ok(&unique_user(), &bob).await.unwrap());
    }
    assert_eq!(service.count_pending(&bob).await.unwrap(), 3);

    harness.send_ok(&unique_user(), &bob).await.unwrap();
    assert_eq!(service.count_pending(&bob).await.unwrap(), 4);

    service.respond(&bob, ids[0], WinkDecision::Accepted).await.unwrap();
    assert_eq!(service.count_pending(&bob).await.unwrap(), 3);

    service.respond(&bob, ids[1], WinkDecision::Rejected).await.unwrap();
    assert_eq!(service.count_pending(&bob).await.unwrap(), 2);

    // a failed second response changes nothing
    assert!(!service.respond_ok(&bob, ids[1], WinkDecision::Accepted).await);
    assert_eq!(service.count_pending(&bob).await.unwrap(), 2);
}

// ============================================================================
// Guards
// ============================================================================

#[tokio::test]
async fn test_self_wink_and_foreign_responses_rejected() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();
    let service = harness.service();

    let err = service.send(&alice, alice.id).await.unwrap_err();
    assert_eq!(err.status_code(), 400);

    let wink_id = harness.send_ok(&alice, &bob).await.unwrap();
    let err = service
        .respond(&alice, wink_id, WinkDecision::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let err = service
        .respond(&unique_user(), wink_id, WinkDecision::Accepted)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 404);

    let wink = service.get_wink(&bob, wink_id).await.unwrap();
    assert_eq!(wink.status, WinkStatus::Pending);
}

#[tokio::test]
async fn test_listings_page_newest_first() {
    let harness = TestHarness::in_memory();
    let bob = unique_user();
    let service = harness.service();

    let mut ids = Vec::new();
    for _ in 0..5 {
        ids.push(harness.send_ok(&unique_user(), &bob).await.unwrap());
    }

    let first_page = service
        .list_received(
            &bob,
            ListWinksRequest {
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let first_ids: Vec<String> = first_page.iter().map(|w| w.id.clone()).collect();
    assert_eq!(first_ids, vec![ids[4].to_string(), ids[3].to_string()]);

    let next_page = service
        .list_received(
            &bob,
            ListWinksRequest {
                before: Some(ids[3]),
                limit: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let next_ids: Vec<String> = next_page.iter().map(|w| w.id.clone()).collect();
    assert_eq!(next_ids, vec![ids[2].to_string(), ids[1].to_string()]);

    let sent = service
        .list_sent(&bob, ListWinksRequest::default())
        .await
        .unwrap();
    assert!(sent.is_empty());
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_sends_exactly_one_succeeds() {
    let harness = TestHarness::in_memory();
    let (alice, bob) = user_pair();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let ctx = harness.ctx.clone();
            tokio::spawn(async move { WinkService::new(&ctx).send(&alice, bob.id).await })
        })
        .collect();

    let mut successes = 0;
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        if response.success {
            successes += 1;
        } else {
            assert!(response.message.starts_with("You already winked"));
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(harness.service().count_pending(&bob).await.unwrap(), 1);
}
