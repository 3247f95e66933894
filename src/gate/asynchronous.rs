use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tokio::time;
use tracing::trace;

use crate::config::GateConfig;
use crate::error::Result;
use crate::gcra::{Decision, Gcra};
use crate::observability::metrics as gate_metrics;

/// Tokio GCRA limiter. Cheap to clone; all clones share one watermark.
///
/// Same pacing contract as the blocking [`RateLimiter`](crate::RateLimiter):
/// the decision and watermark advance happen under the mutex, the sleep
/// happens after the guard is dropped. Instants go through `tokio::time` so
/// a paused test clock paces the gate deterministically.
#[derive(Debug, Clone)]
pub struct AsyncRateLimiter {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    gcra: Gcra,
    watermark: Mutex<Instant>,
}

impl AsyncRateLimiter {
    /// Fails fast when `limit` or `seconds` is zero.
    pub fn new(limit: u64, seconds: u64) -> Result<Self> {
        Ok(Self::from_config(GateConfig::new(limit, seconds)?))
    }

    pub fn from_config(config: GateConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                gcra: Gcra::new(&config),
                watermark: Mutex::new(time::Instant::now().into_std()),
            }),
        }
    }

    /// Wait until GCRA admits the caller.
    pub async fn acquire(&self) {
        let now = time::Instant::now().into_std();
        let decision = {
            let mut watermark = self.inner.watermark.lock().await;
            let decision = self.inner.gcra.decide(*watermark, now);
            *watermark = decision.watermark();
            decision
        };
        match decision {
            Decision::Admit { .. } => gate_metrics::admitted(),
            Decision::Wait { wake_at, .. } => {
                let wait = wake_at.saturating_duration_since(now);
                trace!(wait_secs = wait.as_secs_f64(), "admission delayed");
                gate_metrics::delayed(wait.as_secs_f64());
                time::sleep_until(time::Instant::from_std(wake_at)).await;
            }
        }
    }

    /// Gate one operation: wait for admission, then drive the future. The
    /// output, including any `Err`, is handed back unchanged.
    pub async fn call<F: Future>(&self, op: F) -> F::Output {
        self.acquire().await;
        op.await
    }
}
