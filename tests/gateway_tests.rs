//! Integration tests for the request-retry gateway.

use project_radar::error::{NetworkError, RadarError, ResponseError};
use project_radar::resilience::{ChannelObserver, RetryGateway, RetryPolicy, RetryProgress};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn recorder() -> (Arc<Mutex<Vec<(u32, u64)>>>, impl Fn(RetryProgress) + Send + Sync) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let observer = move |p: RetryProgress| sink.lock().unwrap().push((p.attempt, p.delay_ms()));
    (seen, observer)
}

#[tokio::test(start_paused = true)]
async fn test_fail_fail_succeed() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let attempts = AtomicU32::new(0);
    let (seen, observer) = recorder();
    let start = Instant::now();

    // Act
    let result: Result<u32, String> = gateway
        .execute(
            || async {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if n < 3 {
                    Err(format!("failure {n}"))
                } else {
                    Ok(n)
                }
            },
            Some(&observer),
        )
        .await;

    // Assert
    assert_eq!(result, Ok(3));
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(*seen.lock().unwrap(), vec![(1, 5000), (2, 10000)]);
    assert_eq!(start.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_always_failing_returns_last_error() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let attempts = AtomicU32::new(0);
    let (seen, observer) = recorder();
    let start = Instant::now();

    // Act
    let result: Result<(), String> = gateway
        .execute(
            || async {
                let n = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                Err(format!("E{n}"))
            },
            Some(&observer),
        )
        .await;

    // Assert
    assert_eq!(result, Err("E4".to_string()));
    assert_eq!(attempts.load(Ordering::SeqCst), 4);
    assert_eq!(*seen.lock().unwrap(), vec![(1, 5000), (2, 10000), (3, 15000)]);
    assert_eq!(start.elapsed(), Duration::from_secs(30));
}

#[tokio::test(start_paused = true)]
async fn test_success_without_observer() {
    let gateway = RetryGateway::with_defaults();
    let start = Instant::now();

    let result: Result<&str, String> = gateway.execute(|| async { Ok("done") }, None).await;

    assert_eq!(result, Ok("done"));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_invocations_do_not_share_attempt_counters() {
    let gateway = RetryGateway::with_defaults();

    for _ in 0..2 {
        let attempts = AtomicU32::new(0);
        let (seen, observer) = recorder();

        let result: Result<u32, String> = gateway
            .execute(
                || async {
                    match attempts.fetch_add(1, Ordering::SeqCst) {
                        0 => Err("cold start".to_string()),
                        n => Ok(n),
                    }
                },
                Some(&observer),
            )
            .await;

        assert_eq!(result, Ok(1));
        assert_eq!(*seen.lock().unwrap(), vec![(1, 5000)]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_result_is_retried_like_any_error() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let attempts = AtomicU32::new(0);

    // Act
    let result: Result<String, RadarError> = gateway
        .execute(
            || async {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(ResponseError::EmptyResult {
                        message: "No analysis generated.".to_string(),
                    }
                    .into())
                } else {
                    Ok("## Summary".to_string())
                }
            },
            None,
        )
        .await;

    // Assert
    assert_eq!(result.unwrap(), "## Summary");
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_custom_table() {
    let gateway = RetryGateway::new(RetryPolicy::from_millis(&[100, 250]));
    let (seen, observer) = recorder();
    let start = Instant::now();

    let result: Result<(), &str> = gateway.execute(|| async { Err("nope") }, Some(&observer)).await;

    assert_eq!(result, Err("nope"));
    assert_eq!(*seen.lock().unwrap(), vec![(1, 100), (2, 250)]);
    assert_eq!(start.elapsed(), Duration::from_millis(350));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_invocations_are_independent() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let first_attempts = AtomicU32::new(0);
    let second_attempts = AtomicU32::new(0);
    let (first_seen, first_observer) = recorder();
    let (second_seen, second_observer) = recorder();
    let start = Instant::now();

    // Act
    let (first, second): (Result<&str, String>, Result<&str, String>) = tokio::join!(
        gateway.execute(
            || async {
                if first_attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err("first".to_string())
                } else {
                    Ok("a")
                }
            },
            Some(&first_observer),
        ),
        gateway.execute(
            || async {
                if second_attempts.fetch_add(1, Ordering::SeqCst) < 1 {
                    Err("second".to_string())
                } else {
                    Ok("b")
                }
            },
            Some(&second_observer),
        ),
    );

    // Assert
    assert_eq!(first, Ok("a"));
    assert_eq!(second, Ok("b"));
    assert_eq!(*first_seen.lock().unwrap(), vec![(1, 5000), (2, 10000)]);
    assert_eq!(*second_seen.lock().unwrap(), vec![(1, 5000)]);
    assert_eq!(start.elapsed(), Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_cancellation_during_delay() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let attempts = AtomicU32::new(0);
    let (seen, observer) = recorder();
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(7)).await;
        canceller.cancel();
    });
    let start = Instant::now();

    // Act
    let result: Result<(), RadarError> = gateway
        .execute_cancellable(
            || async {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(NetworkError::ConnectionFailed {
                    message: "refused".to_string(),
                }
                .into())
            },
            Some(&observer),
            &token,
        )
        .await;

    // Assert
    assert!(result.unwrap_err().is_cancelled());
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(*seen.lock().unwrap(), vec![(1, 5000), (2, 10000)]);
    assert_eq!(start.elapsed(), Duration::from_secs(7));
}

#[tokio::test(start_paused = true)]
async fn test_channel_observer_streams_progress() {
    // Arrange
    let gateway = RetryGateway::with_defaults();
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let observer = ChannelObserver::new(tx);
    let attempts = AtomicU32::new(0);

    // Act
    let result: Result<(), String> = gateway
        .execute(
            || async {
                if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err("boom".to_string())
                } else {
                    Ok(())
                }
            },
            Some(&observer),
        )
        .await;
    drop(observer);

    // Assert
    assert!(result.is_ok());
    let progress = rx.recv().await.unwrap();
    assert_eq!(progress.attempt, 1);
    assert_eq!(progress.status_line(), "Retrying (1/3) - waiting 5s...");
    assert!(rx.recv().await.is_none());
}
