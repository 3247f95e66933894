//! Generic Cell Rate Algorithm decision core.
//!
//! The whole algorithm is one watermark: the theoretical arrival time of the
//! next call. A caller is conforming when the watermark trails the current
//! time by no more than the burst tolerance; otherwise it must wait until the
//! watermark arrives. This module is pure arithmetic over instants so the
//! pacing rules can be tested without clocks, locks, or sleeping.

use std::time::{Duration, Instant};

use crate::config::GateConfig;

/// Outcome of one admission decision. Every decision advances the watermark
/// by exactly one interval; a `Wait` reserves the caller's slot up front so
/// no lock needs to be held while it sleeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed immediately.
    Admit { watermark: Instant },
    /// Sleep until `wake_at`, then proceed.
    Wait { wake_at: Instant, watermark: Instant },
}

impl Decision {
    /// The watermark to store back, whichever way the decision went.
    pub fn watermark(&self) -> Instant {
        match self {
            Decision::Admit { watermark } | Decision::Wait { watermark, .. } => *watermark,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Gcra {
    interval: Duration,
    tolerance: Duration,
}

impl Gcra {
    pub fn new(config: &GateConfig) -> Self {
        Self {
            interval: config.interval(),
            tolerance: config.tolerance(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Decide whether a call arriving at `now` conforms, given the current
    /// watermark. `tat = max(watermark, now)`; conforming iff
    /// `tat - now <= tolerance`. Non-conforming callers wake when the
    /// pre-advance watermark arrives.
    pub fn decide(&self, watermark: Instant, now: Instant) -> Decision {
        let tat = watermark.max(now);
        if tat - now <= self.tolerance {
            Decision::Admit {
                watermark: tat + self.interval,
            }
        } else {
            Decision::Wait {
                wake_at: watermark,
                watermark: watermark + self.interval,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gcra(limit: u64, seconds: u64) -> Gcra {
        Gcra::new(&GateConfig::new(limit, seconds).unwrap())
    }

    #[test]
    fn fresh_watermark_admits_immediately() {
        let g = gcra(1, 1);
        let now = Instant::now();
        match g.decide(now, now) {
            Decision::Admit { watermark } => {
                assert_eq!(watermark, now + Duration::from_secs(1));
            }
            other => panic!("expected admit, got {:?}", other),
        }
    }

    #[test]
    fn watermark_at_the_tolerance_boundary_still_admits() {
        // limit=4, seconds=4: interval 1s, tolerance 3s.
        let g = gcra(4, 4);
        let now = Instant::now();
        let watermark = now + Duration::from_secs(3);
        match g.decide(watermark, now) {
            Decision::Admit { watermark: next } => {
                assert_eq!(next, watermark + Duration::from_secs(1));
            }
            other => panic!("expected admit, got {:?}", other),
        }
    }

    #[test]
    fn watermark_beyond_tolerance_waits_until_it_arrives() {
        let g = gcra(4, 4);
        let now = Instant::now();
        let watermark = now + Duration::from_secs(4);
        match g.decide(watermark, now) {
            Decision::Wait { wake_at, watermark: next } => {
                assert_eq!(wake_at, watermark);
                assert_eq!(next, watermark + Duration::from_secs(1));
            }
            other => panic!("expected wait, got {:?}", other),
        }
    }

    #[test]
    fn a_full_burst_admits_then_the_next_call_waits() {
        let g = gcra(4, 4);
        let now = Instant::now();
        let mut watermark = now;
        for _ in 0..4 {
            match g.decide(watermark, now) {
                Decision::Admit { watermark: next } => watermark = next,
                other => panic!("burst call should admit, got {:?}", other),
            }
        }
        assert!(matches!(g.decide(watermark, now), Decision::Wait { .. }));
    }

    #[test]
    fn idle_time_does_not_bank_extra_credit() {
        // A watermark far in the past clamps to `now`; the limiter never owes
        // more than the burst allowance after a quiet stretch.
        let g = gcra(1, 1);
        let now = Instant::now();
        let stale = now.checked_sub(Duration::from_secs(30)).unwrap();
        match g.decide(stale, now) {
            Decision::Admit { watermark } => {
                assert_eq!(watermark, now + Duration::from_secs(1));
            }
            other => panic!("expected admit, got {:?}", other),
        }
    }
}
