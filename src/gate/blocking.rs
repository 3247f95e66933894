use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use tracing::trace;

use crate::config::GateConfig;
use crate::error::Result;
use crate::gcra::{Decision, Gcra};
use crate::observability::metrics as gate_metrics;

/// Thread-blocking GCRA limiter.
///
/// Admits at most `limit` calls over any window of `seconds`; a caller over
/// budget sleeps until its reserved slot arrives. The watermark is the only
/// mutable state and is read-modify-written under the mutex. The slot is
/// reserved inside the critical section, so the sleep itself always happens
/// with the mutex released and waiting callers never serialize each other.
#[derive(Debug)]
pub struct RateLimiter {
    gcra: Gcra,
    watermark: Mutex<Instant>,
}

impl RateLimiter {
    /// Fails fast when `limit` or `seconds` is zero.
    pub fn new(limit: u64, seconds: u64) -> Result<Self> {
        Ok(Self::from_config(GateConfig::new(limit, seconds)?))
    }

    pub fn from_config(config: GateConfig) -> Self {
        Self {
            gcra: Gcra::new(&config),
            watermark: Mutex::new(Instant::now()),
        }
    }

    /// Block the calling thread until GCRA admits it.
    pub fn acquire(&self) {
        let now = Instant::now();
        let decision = {
            let mut watermark = self.watermark.lock().expect("watermark lock poisoned");
            let decision = self.gcra.decide(*watermark, now);
            *watermark = decision.watermark();
            decision
        };
        match decision {
            Decision::Admit { .. } => gate_metrics::admitted(),
            Decision::Wait { wake_at, .. } => {
                let wait = wake_at.saturating_duration_since(now);
                trace!(wait_secs = wait.as_secs_f64(), "admission delayed");
                gate_metrics::delayed(wait.as_secs_f64());
                thread::sleep(wait);
            }
        }
    }

    /// Gate one operation: block until admitted, then run it with no lock
    /// held. The return value, including any `Err`, is handed back unchanged
    /// and the consumed slot is not refunded.
    pub fn call<T>(&self, op: impl FnOnce() -> T) -> T {
        self.acquire();
        op()
    }
}
