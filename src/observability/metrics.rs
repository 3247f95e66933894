//! Gate admission metrics.
//!
//! Thin helpers over the `metrics` facade using Prometheus naming
//! conventions. Recording is always cheap; nothing is exported unless a host
//! installs a recorder, either its own or via [`init_metrics`].

use std::sync::{Once, OnceLock};

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the global Prometheus recorder. Idempotent. The handle is kept
/// for in-process rendering so short-lived processes can dump a scrape body
/// on exit instead of running an HTTP listener.
pub fn init_metrics() {
    INIT.call_once(|| {
        match metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                if HANDLE.set(handle).is_err() {
                    warn!("metrics handle already set");
                }
                info!("Prometheus recorder installed");
            }
            Err(e) => warn!("Failed to install Prometheus recorder: {}", e),
        }
    });
}

/// Render the current metrics in Prometheus exposition format, if the
/// recorder was installed through [`init_metrics`].
pub fn render() -> Option<String> {
    HANDLE.get().map(|handle| handle.render())
}

/// Record a call admitted immediately.
pub fn admitted() {
    ::metrics::counter!("callgate_admitted_total").increment(1);
}

/// Record a call delayed for its slot, and how long it will wait.
pub fn delayed(wait_secs: f64) {
    ::metrics::counter!("callgate_delayed_total").increment(1);
    ::metrics::histogram!("callgate_wait_seconds").record(wait_secs);
}
