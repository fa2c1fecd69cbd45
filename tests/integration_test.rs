use url_integrity_service::{
    errors::ServiceError,
    models::UrlCheckRequest,
    rate_limiter::RateLimiter,
    url_check_service::UrlCheckService,
};
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_rate_limiter() {
    let rate_limiter = RateLimiter::new(5, Duration::from_secs(1)); // 5 requests per second

    // Test rate limiting
    for i in 0..10 {
        let allowed = rate_limiter.check_rate_limit().await;
        println!("Request {}: {}", i, if allowed { "ALLOWED" } else { "BLOCKED" });

        if i < 5 {
            assert!(allowed, "First 5 requests should be allowed");
        } else {
            assert!(!allowed, "Requests after limit should be blocked");
        }
    }
}

#[test]
fn test_sliding_window_recovers_capacity() {
    // 5 checks per minute, driven by synthetic instants
    let rate_limiter = RateLimiter::new(5, Duration::from_millis(60_000));
    let start = Instant::now();

    for i in 0..5 {
        assert!(
            rate_limiter.check_at(start),
            "Call {} at t=0 should be allowed",
            i + 1
        );
    }
    assert!(
        !rate_limiter.check_at(start),
        "Call 6 at t=0 should be blocked"
    );

    // Still inside the window
    assert!(!rate_limiter.check_at(start + Duration::from_millis(59_999)));

    // Window has fully slid past the first five admissions
    assert!(rate_limiter.check_at(start + Duration::from_millis(60_001)));
}

#[test]
fn test_eviction_at_exact_window_boundary() {
    let rate_limiter = RateLimiter::new(1, Duration::from_millis(100));
    let start = Instant::now();

    assert!(rate_limiter.check_at(start));
    // An entry exactly one window old is evicted
    assert!(rate_limiter.check_at(start + Duration::from_millis(100)));
}

#[test]
fn test_denied_calls_are_not_recorded() {
    let rate_limiter = RateLimiter::new(1, Duration::from_millis(100));
    let start = Instant::now();

    assert!(rate_limiter.check_at(start));
    // Denied mid-window; if this were recorded it would extend the window
    assert!(!rate_limiter.check_at(start + Duration::from_millis(50)));
    assert!(rate_limiter.check_at(start + Duration::from_millis(100)));
}

#[test]
fn test_zero_limit_always_denies() {
    let rate_limiter = RateLimiter::new(0, Duration::from_millis(60_000));
    let start = Instant::now();

    for i in 0..3 {
        assert!(
            !rate_limiter.check_at(start + Duration::from_millis(i * 1_000)),
            "A zero-limit limiter should deny every call"
        );
    }
}

#[test]
fn test_admission_sequence_is_deterministic() {
    let offsets_ms: [u64; 8] = [0, 0, 10, 20, 30, 40, 50, 120];

    let run = |start: Instant| -> Vec<bool> {
        let rate_limiter = RateLimiter::new(3, Duration::from_millis(100));
        offsets_ms
            .iter()
            .map(|ms| rate_limiter.check_at(start + Duration::from_millis(*ms)))
            .collect()
    };

    let first = run(Instant::now());
    let second = run(Instant::now() + Duration::from_secs(5));
    assert_eq!(first, second, "Same instant offsets should give the same admit/deny sequence");
    assert_eq!(first, vec![true, true, true, false, false, false, false, true]);
}

#[tokio::test]
async fn test_invalid_url_rejected_before_check() {
    let service = UrlCheckService::new().expect("Failed to create service");

    let request = UrlCheckRequest {
        url: "not a url".to_string(),
        client_id: Some("test_client".to_string()),
    };

    let err = service
        .check_and_display_url(&request)
        .await
        .expect_err("Malformed URL should be rejected");
    assert!(matches!(err, ServiceError::InvalidUrl(_)));

    // Nothing was stored for the rejected request
    assert_eq!(service.get_check_count().await, 0);
}

#[tokio::test]
async fn test_unknown_check_id_not_found() {
    let service = UrlCheckService::new().expect("Failed to create service");

    let err = service
        .get_check_by_id("missing-id")
        .await
        .expect_err("Unknown id should not resolve");
    assert!(matches!(err, ServiceError::CheckNotFound(_)));

    let checks = service.get_all_checks().await.expect("Failed to list checks");
    assert!(checks.is_empty());

    let by_host = service
        .get_checks_by_host("example.com")
        .await
        .expect("Failed to filter checks");
    assert!(by_host.is_empty());

    service.clear_checks().await;
    assert_eq!(service.get_check_count().await, 0);
}
