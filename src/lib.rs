//! `callgate` paces calls to a wrapped operation with the Generic Cell Rate
//! Algorithm: at most `limit` calls proceed immediately over any window of
//! `seconds`; callers over budget sleep until their slot arrives.

pub mod config;
pub mod error;
pub mod gate;
pub mod gcra;
pub mod logging;
pub mod observability;

// Layered boundaries for hosts that wire the gate through a trait seam
pub mod app;
pub mod infra;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::{AsyncRateLimiter, RateLimiter};
