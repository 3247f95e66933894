// Admission gates: thread-blocking and tokio variants over the same GCRA core.

pub mod asynchronous;
pub mod blocking;

pub use asynchronous::AsyncRateLimiter;
pub use blocking::RateLimiter;
