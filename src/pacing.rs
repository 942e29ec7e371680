//! Live-session pacing.
//!
//! When the recording is still being written, the scan must not run ahead
//! of the recorder (a frame that has not been written yet reads as end of
//! stream), yet must not fall arbitrarily far behind either, or the run
//! never finishes promptly. [`Pacer`] computes a per-frame sleep that keeps
//! cumulative scan progress within a bounded lag of the recording.
//!
//! The rule, per frame:
//!
//! - start from the nominal frame interval (`1/fps`) minus the time already
//!   spent processing the frame;
//! - behind by more than the buffer: drop the sleep to zero at full speed,
//!   otherwise scale it down to a quarter to catch up gradually;
//! - within (or ahead of) the buffer: hold back at 1.5× the nominal
//!   interval so the scan never races the writer.
//!
//! A non-positive computed sleep means "no sleep". Pacing is only applied
//! while the session is live; finished recordings run at full speed or with
//! a fixed small idle delay.

use std::time::Duration;

/// Per-frame sleep calculator for scans against a live recording.
#[derive(Debug, Clone, Copy)]
pub struct Pacer {
    nominal: Duration,
    buffer_secs: i64,
    full_speed: bool,
}

impl Pacer {
    /// Build a pacer for the given frame rate and lag buffer.
    ///
    /// A non-positive `fps` yields a zero nominal interval, which in turn
    /// never sleeps.
    pub fn new(fps: f64, buffer_secs: i64, full_speed: bool) -> Self {
        let nominal = if fps > 0.0 {
            Duration::from_secs_f64(1.0 / fps)
        } else {
            Duration::ZERO
        };
        Self {
            nominal,
            buffer_secs,
            full_speed,
        }
    }

    /// The nominal per-frame interval (`1/fps`).
    pub fn nominal_interval(&self) -> Duration {
        self.nominal
    }

    /// Compute the sleep to insert after a frame that took `frame_cost` to
    /// process, given how many seconds the scan lags the recorder.
    ///
    /// `seconds_behind` is seconds recorded so far minus seconds of frames
    /// already scanned. Returns `None` when no sleep is needed.
    pub fn sleep_duration(&self, frame_cost: Duration, seconds_behind: i64) -> Option<Duration> {
        let nominal_us = self.nominal.as_micros() as i64;
        let mut sleep_us = nominal_us - frame_cost.as_micros() as i64;

        if seconds_behind > self.buffer_secs {
            sleep_us = if self.full_speed { 0 } else { sleep_us / 4 };
        } else if seconds_behind < self.buffer_secs {
            sleep_us = nominal_us + nominal_us / 2;
        }

        (sleep_us > 0).then(|| Duration::from_micros(sleep_us as u64))
    }
}
