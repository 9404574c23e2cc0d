//! Ordering engine integration tests
//!
//! Positions must always form a dense 1..N over active entries, ordered by
//! join time with insertion order breaking clock-resolution ties.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use waitline_core::application::queue_ops::{CreateQueueRequest, JoinQueueRequest};
use waitline_core::application::QueueService;
use waitline_core::error::AppError;
use waitline_core::port::id_provider::ShortIdProvider;
use waitline_core::port::time_provider::TimeProvider;
use waitline_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};

/// Strictly increasing fake clock
struct SteppingTimeProvider(AtomicI64);

impl TimeProvider for SteppingTimeProvider {
    fn now_millis(&self) -> i64 {
        self.0.fetch_add(1000, Ordering::SeqCst)
    }
}

/// Frozen clock: every caller joins at the same millisecond
struct FrozenTimeProvider;

impl TimeProvider for FrozenTimeProvider {
    fn now_millis(&self) -> i64 {
        1_000_000
    }
}

async fn setup_with_clock(clock: Arc<dyn TimeProvider>) -> Arc<QueueService> {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteQueueRepository::new(pool.clone()));
    let tx_repo = Arc::new(SqliteQueueRepository::new(pool));

    Arc::new(QueueService::new(
        repo,
        tx_repo,
        Arc::new(ShortIdProvider::for_queues()),
        Arc::new(ShortIdProvider::for_entries()),
        clock,
    ))
}

async fn setup() -> Arc<QueueService> {
    setup_with_clock(Arc::new(SteppingTimeProvider(AtomicI64::new(1000)))).await
}

async fn create_queue(service: &QueueService) -> String {
    service
        .create_queue(CreateQueueRequest {
            name: "Ordering test".to_string(),
            description: None,
        })
        .await
        .unwrap()
        .id
}

async fn join(service: &QueueService, queue_id: &str, msisdn: &str) {
    service
        .join_queue(JoinQueueRequest {
            queue_id: queue_id.to_string(),
            msisdn: msisdn.to_string(),
            full_name: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_positions_follow_join_order() {
    let service = setup().await;
    let q = create_queue(&service).await;

    join(&service, &q, "100").await;
    join(&service, &q, "200").await;
    join(&service, &q, "300").await;

    assert_eq!(service.position(&q, "100").await.unwrap(), 1);
    assert_eq!(service.position(&q, "200").await.unwrap(), 2);
    assert_eq!(service.position(&q, "300").await.unwrap(), 3);
}

#[tokio::test]
async fn test_leave_compacts_positions() {
    let service = setup().await;
    let q = create_queue(&service).await;

    join(&service, &q, "100").await;
    join(&service, &q, "200").await;
    join(&service, &q, "300").await;

    service.leave_queue(&q, "200").await.unwrap();

    assert_eq!(service.position(&q, "100").await.unwrap(), 1);
    assert_eq!(service.position(&q, "300").await.unwrap(), 2);

    let err = service.position(&q, "200").await.unwrap_err();
    assert!(matches!(err, AppError::NotInQueue(_)));
}

#[tokio::test]
async fn test_first_active_entry_is_position_one() {
    let service = setup().await;
    let q = create_queue(&service).await;

    join(&service, &q, "100").await;
    join(&service, &q, "200").await;

    service.leave_queue(&q, "100").await.unwrap();
    assert_eq!(service.position(&q, "200").await.unwrap(), 1);
}

#[tokio::test]
async fn test_positions_are_dense_one_to_n() {
    let service = setup().await;
    let q = create_queue(&service).await;

    let callers: Vec<String> = (0..8).map(|i| format!("2547000000{:02}", i)).collect();
    for msisdn in &callers {
        join(&service, &q, msisdn).await;
    }
    // A couple of departures in the middle
    service.leave_queue(&q, &callers[2]).await.unwrap();
    service.leave_queue(&q, &callers[5]).await.unwrap();

    let mut positions = BTreeSet::new();
    for msisdn in &callers {
        if let Ok(pos) = service.position(&q, msisdn).await {
            positions.insert(pos);
        }
    }

    let expected: BTreeSet<i64> = (1..=6).collect();
    assert_eq!(positions, expected);
}

#[tokio::test]
async fn test_position_unknown_caller_fails() {
    let service = setup().await;
    let q = create_queue(&service).await;

    join(&service, &q, "100").await;

    let err = service.position(&q, "999").await.unwrap_err();
    assert!(matches!(err, AppError::NotInQueue(_)));
}

#[tokio::test]
async fn test_position_missing_queue_fails_not_in_queue() {
    let service = setup().await;

    let err = service
        .position(&"GHOST1".to_string(), "100")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotInQueue(_)));
}

#[tokio::test]
async fn test_identical_join_times_rank_by_insertion_order() {
    // Clock-resolution tie: everyone shares one joined_at
    let service = setup_with_clock(Arc::new(FrozenTimeProvider)).await;
    let q = create_queue(&service).await;

    join(&service, &q, "100").await;
    join(&service, &q, "200").await;
    join(&service, &q, "300").await;

    assert_eq!(service.position(&q, "100").await.unwrap(), 1);
    assert_eq!(service.position(&q, "200").await.unwrap(), 2);
    assert_eq!(service.position(&q, "300").await.unwrap(), 3);
}
