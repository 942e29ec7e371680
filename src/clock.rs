//! Wall-clock seam.
//!
//! All blocking waits in the detector (head-start delay, live pacing,
//! pause polling, waiting for a live recording to finish) go through the
//! [`Clock`] trait so tests can drive the live-session paths with a
//! simulated clock instead of real sleeps. Production code uses
//! [`SystemClock`].

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// Source of wall-clock time and blocking sleeps.
pub trait Clock: Send + Sync {
    /// The current wall-clock time.
    fn now(&self) -> DateTime<Utc>;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}
