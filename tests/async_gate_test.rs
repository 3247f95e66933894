use std::time::Duration;

use tokio::time::Instant;

use callgate::app::ports::AdmissionPort;
use callgate::infra::gate_adapter::GateAdapter;
use callgate::AsyncRateLimiter;

// All tests run on the paused tokio clock, so pacing is exact: sleeps jump
// the clock straight to their deadline and no timer jitter leaks in.

#[tokio::test(start_paused = true)]
async fn a_fresh_gate_admits_a_full_burst_then_waits_for_the_watermark() {
    // limit=4, seconds=4: interval 1s, tolerance 3s.
    let limiter = AsyncRateLimiter::new(4, 4).unwrap();
    let t0 = Instant::now();

    for _ in 0..4 {
        limiter.acquire().await;
        assert_eq!(t0.elapsed(), Duration::ZERO);
    }

    // The fifth call sleeps until the watermark, which the burst pushed to 4s.
    limiter.acquire().await;
    assert_eq!(t0.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn queued_waiters_are_spaced_exactly_one_interval_apart() {
    let limiter = AsyncRateLimiter::new(1, 1).unwrap();
    let t0 = Instant::now();

    let mut set = tokio::task::JoinSet::new();
    for _ in 0..4 {
        let limiter = limiter.clone();
        set.spawn(async move {
            limiter.acquire().await;
            t0.elapsed()
        });
    }
    let mut admissions = Vec::new();
    while let Some(result) = set.join_next().await {
        admissions.push(result.unwrap());
    }
    admissions.sort();

    assert_eq!(
        admissions,
        vec![
            Duration::ZERO,
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn calls_spaced_a_full_interval_apart_never_wait() {
    let limiter = AsyncRateLimiter::new(1, 1).unwrap();
    for _ in 0..3 {
        let before = Instant::now();
        limiter.acquire().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

#[tokio::test(start_paused = true)]
async fn gated_future_output_propagates_unchanged() {
    let limiter = AsyncRateLimiter::new(2, 1).unwrap();

    let ok: Result<u32, String> = limiter.call(async { Ok(7) }).await;
    assert_eq!(ok, Ok(7));

    let err: Result<u32, String> = limiter.call(async { Err("boom".to_string()) }).await;
    assert_eq!(err, Err("boom".to_string()));
}

#[tokio::test(start_paused = true)]
async fn the_adapter_paces_callers_through_the_port() {
    let gate: Box<dyn AdmissionPort> =
        Box::new(GateAdapter(AsyncRateLimiter::new(1, 1).unwrap()));
    let t0 = Instant::now();

    gate.acquire().await;
    gate.acquire().await;
    assert_eq!(t0.elapsed(), Duration::from_secs(1));
}
