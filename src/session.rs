//! Recording session description.

use chrono::{DateTime, Utc};

/// Immutable description of the recording window being flagged.
///
/// `pre_roll` and `post_roll` are the caller's *approximate* boundary
/// offsets, in frames: how far into the recording the program is expected
/// to start, and how far before the end it is expected to finish. The
/// detector searches near these guesses; a value of zero disables the
/// corresponding boundary search entirely.
///
/// Constructed once and never mutated. The scheduled window
/// (`started_at`/`stops_at`) and the actual recording window
/// (`recording_started_at`/`recording_stops_at`) are kept separately
/// because a recorder may start early or run long.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    /// When the scheduled program starts.
    pub started_at: DateTime<Utc>,
    /// When the scheduled program ends.
    pub stops_at: DateTime<Utc>,
    /// When the recorder actually began writing.
    pub recording_started_at: DateTime<Utc>,
    /// When the recorder will stop (or stopped) writing.
    pub recording_stops_at: DateTime<Utc>,
    /// Expected frame offset of the program start. Zero disables the
    /// pre-roll search.
    pub pre_roll: u64,
    /// Expected frame distance of the program end from the end of the
    /// recording. Zero disables the post-roll search.
    pub post_roll: u64,
    /// Nominal frame rate, used for window sizing and live pacing.
    pub fps: f64,
    /// When `true`, a live scan that has fallen behind catches up without
    /// any per-frame sleep; when `false`, sleeps are only shortened, and
    /// finished-file scans insert a small idle delay to yield CPU.
    pub full_speed: bool,
    /// Selects the finer progress cadence (every 100 frames rather than
    /// every 500) even when the session is not live.
    pub show_progress: bool,
}

impl Session {
    /// Returns `true` if the recording is still being written at `now`.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now <= self.recording_stops_at
    }

    /// Seconds of program recorded by `now`, floored at zero.
    pub(crate) fn seconds_recorded(&self, now: DateTime<Utc>) -> i64 {
        (now - self.recording_started_at).num_seconds().max(0)
    }

    /// Seconds elapsed since the scheduled start, floored at zero.
    pub(crate) fn seconds_since_start(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds().max(0)
    }

    /// Planned length of the recording in seconds, floored at zero.
    pub(crate) fn recording_span_secs(&self) -> i64 {
        (self.recording_stops_at - self.recording_started_at)
            .num_seconds()
            .max(0)
    }
}
