//! Circuit breaker for backend protection.
//!
//! # States
//! - Closed: normal operation, requests pass through
//! - Open: backend assumed down, requests fail fast
//! - Half-Open: testing if backend recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: consecutive failures >= max_failures
//! Open → Half-Open: first gate check after reset_timeout since the last failure
//! Half-Open → Closed: probe request succeeds
//! Half-Open → Open: probe request fails
//! ```
//!
//! # Design Decisions
//! - Per-backend circuit breaker (not global)
//! - Fail fast in Open state (no waiting for timeout)
//! - Single probe in Half-Open (prevents hammering recovering backend)
//! - Gate check and Open → Half-Open transition share one critical section

use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "CLOSED",
            CircuitState::Open => "OPEN",
            CircuitState::HalfOpen => "HALF_OPEN",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Inner {
    state: CircuitState,
    failures: u32,
    last_failure: Option<Instant>,
    last_success: Option<Instant>,
    probe_in_flight: bool,
}

/// Admission handed out by [`CircuitBreaker::allow`].
#[derive(Debug)]
#[must_use = "an admitted call must be recorded or released"]
pub struct Permit {
    probe: bool,
}

impl Permit {
    /// Whether this call is the single Half-Open probe.
    pub fn is_probe(&self) -> bool {
        self.probe
    }
}

/// Point-in-time view of a breaker, for health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub state: CircuitState,
    pub failures: u32,
    pub since_last_failure: Option<Duration>,
    pub since_last_success: Option<Duration>,
}

/// Consecutive-failure circuit breaker for one backend.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    max_failures: u32,
    reset_timeout: Duration,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, max_failures: u32, reset_timeout: Duration) -> Self {
        Self {
            name: name.into(),
            max_failures: max_failures.max(1),
            reset_timeout,
            inner: Mutex::new(Inner {
                state: CircuitState::Closed,
                failures: 0,
                last_failure: None,
                last_success: None,
                probe_in_flight: false,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gate check made before every outbound call.
    ///
    /// The returned permit must be handed back through
    /// [`record_outcome`](Self::record_outcome) or [`release`](Self::release).
    /// In Half-Open only the holder of the probe permit settles the circuit.
    pub fn allow(&self) -> Option<Permit> {
        let mut inner = self.inner.lock();
        match inner.state {
            CircuitState::Closed => Some(Permit { probe: false }),
            CircuitState::Open => {
                let expired = inner
                    .last_failure
                    .map_or(true, |at| at.elapsed() > self.reset_timeout);
                if !expired {
                    return None;
                }
                inner.state = CircuitState::HalfOpen;
                inner.probe_in_flight = true;
                tracing::info!(backend = %self.name, "Circuit half-open, admitting probe");
                Some(Permit { probe: true })
            }
            CircuitState::HalfOpen => {
                if inner.probe_in_flight {
                    None
                } else {
                    inner.probe_in_flight = true;
                    Some(Permit { probe: true })
                }
            }
        }
    }

    /// Record the outcome of a call admitted by [`allow`](Self::allow).
    ///
    /// Calls admitted while Closed that finish after the circuit opened only
    /// update counters and timestamps.
    pub fn record_outcome(&self, permit: Permit, success: bool) {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        if success {
            inner.last_success = Some(now);
        } else {
            inner.failures = inner.failures.saturating_add(1);
            inner.last_failure = Some(now);
        }

        if permit.probe {
            inner.probe_in_flight = false;
            if inner.state == CircuitState::HalfOpen {
                if success {
                    inner.state = CircuitState::Closed;
                    inner.failures = 0;
                    tracing::info!(backend = %self.name, "Circuit closed, probe succeeded");
                } else {
                    inner.state = CircuitState::Open;
                    tracing::warn!(backend = %self.name, "Circuit re-opened, probe failed");
                }
            }
            return;
        }

        if inner.state != CircuitState::Closed {
            return;
        }
        if success {
            inner.failures = 0;
        } else if inner.failures >= self.max_failures {
            inner.state = CircuitState::Open;
            tracing::warn!(
                backend = %self.name,
                failures = inner.failures,
                reset_timeout = ?self.reset_timeout,
                "Circuit opened"
            );
        }
    }

    /// Give up an admitted call without a verdict.
    ///
    /// A probe permit frees the Half-Open slot; counters are untouched.
    pub fn release(&self, permit: Permit) {
        if permit.probe {
            self.inner.lock().probe_in_flight = false;
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    pub fn failures(&self) -> u32 {
        self.inner.lock().failures
    }

    pub fn snapshot(&self) -> BreakerSnapshot {
        let inner = self.inner.lock();
        BreakerSnapshot {
            state: inner.state,
            failures: inner.failures,
            since_last_failure: inner.last_failure.map(|at| at.elapsed()),
            since_last_success: inner.last_success.map(|at| at.elapsed()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    fn breaker() -> CircuitBreaker {
        CircuitBreaker::new("test", 5, Duration::from_secs(30))
    }

    fn call(cb: &CircuitBreaker, success: bool) {
        let permit = cb.allow().expect("call should be admitted");
        cb.record_outcome(permit, success);
    }

    fn trip(cb: &CircuitBreaker) {
        for _ in 0..5 {
            call(cb, false);
        }
    }

    #[test]
    fn test_opens_after_max_failures() {
        let cb = breaker();
        for _ in 0..4 {
            call(&cb, false);
        }
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 4);

        call(&cb, false);
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(cb.allow().is_none());
    }

    #[test]
    fn test_success_clears_failure_streak() {
        let cb = breaker();
        for _ in 0..4 {
            call(&cb, false);
        }
        call(&cb, true);
        assert_eq!(cb.failures(), 0);

        for _ in 0..4 {
            call(&cb, false);
        }
        assert_eq!(cb.state(), CircuitState::Closed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stays_open_until_reset_timeout() {
        let cb = breaker();
        trip(&cb);

        tokio::time::advance(Duration::from_secs(29)).await;
        assert!(cb.allow().is_none());
        assert_eq!(cb.state(), CircuitState::Open);

        tokio::time::advance(Duration::from_secs(2)).await;
        let probe = cb.allow().unwrap();
        assert!(probe.is_probe());
        assert_eq!(cb.state(), CircuitState::HalfOpen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_admits_single_probe() {
        let cb = breaker();
        trip(&cb);
        tokio::time::advance(Duration::from_secs(31)).await;

        let probe = cb.allow().unwrap();
        assert!(cb.allow().is_none());
        assert!(cb.allow().is_none());

        cb.release(probe);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        assert!(cb.allow().unwrap().is_probe());
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_success_closes() {
        let cb = breaker();
        trip(&cb);
        tokio::time::advance(Duration::from_secs(31)).await;

        call(&cb, true);
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 0);
        assert!(cb.snapshot().since_last_success.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_open_failure_reopens_immediately() {
        let cb = breaker();
        trip(&cb);
        tokio::time::advance(Duration::from_secs(31)).await;

        call(&cb, false);
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(cb.allow().is_none());

        // The reopen restarts the reset clock.
        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(cb.allow().is_some());
    }

    /// One failure opens the circuit, one second later a probe is out, and
    /// a call admitted while still Closed is returned.
    async fn probe_with_straggler() -> (CircuitBreaker, Permit, Permit) {
        let cb = CircuitBreaker::new("test", 1, Duration::from_secs(1));
        let straggler = cb.allow().unwrap();
        assert!(!straggler.is_probe());
        call(&cb, false);
        assert_eq!(cb.state(), CircuitState::Open);

        tokio::time::advance(Duration::from_millis(1100)).await;
        let probe = cb.allow().unwrap();
        assert!(probe.is_probe());
        (cb, probe, straggler)
    }

    #[tokio::test(start_paused = true)]
    async fn test_straggler_success_does_not_settle_probe() {
        let (cb, probe, straggler) = probe_with_straggler().await;

        cb.record_outcome(straggler, true);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        assert!(cb.allow().is_none());
        assert!(cb.snapshot().since_last_success.is_some());

        cb.record_outcome(probe, true);
        assert_eq!(cb.state(), CircuitState::Closed);
        assert_eq!(cb.failures(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_straggler_failure_does_not_settle_probe() {
        let (cb, probe, straggler) = probe_with_straggler().await;

        cb.record_outcome(straggler, false);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
        assert_eq!(cb.failures(), 2);
        assert!(cb.allow().is_none());

        cb.record_outcome(probe, false);
        assert_eq!(cb.state(), CircuitState::Open);
    }

    #[tokio::test(start_paused = true)]
    async fn test_straggler_release_keeps_probe_slot() {
        let (cb, probe, straggler) = probe_with_straggler().await;

        cb.release(straggler);
        assert!(cb.allow().is_none());

        cb.release(probe);
        assert!(cb.allow().unwrap().is_probe());
    }

    #[test]
    fn test_straggler_after_open_keeps_circuit_open() {
        let cb = CircuitBreaker::new("test", 1, Duration::from_secs(30));
        let straggler = cb.allow().unwrap();
        call(&cb, false);

        cb.record_outcome(straggler, true);
        assert_eq!(cb.state(), CircuitState::Open);
        assert!(cb.allow().is_none());
    }

    #[test]
    fn test_concurrent_half_open_transition_admits_one() {
        let cb = Arc::new(CircuitBreaker::new("stress", 1, Duration::from_millis(10)));
        call(&cb, false);
        assert_eq!(cb.state(), CircuitState::Open);
        std::thread::sleep(Duration::from_millis(30));

        let threads = 32;
        let barrier = Arc::new(Barrier::new(threads));
        let admitted = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let cb = cb.clone();
                let barrier = barrier.clone();
                let admitted = admitted.clone();
                std::thread::spawn(move || {
                    barrier.wait();
                    if cb.allow().is_some() {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(admitted.load(Ordering::SeqCst), 1);
        assert_eq!(cb.state(), CircuitState::HalfOpen);
    }

    #[test]
    fn test_state_names() {
        assert_eq!(CircuitState::HalfOpen.to_string(), "HALF_OPEN");
        assert_eq!(
            serde_json::to_string(&CircuitState::Open).unwrap(),
            "\"OPEN\""
        );
    }
}
