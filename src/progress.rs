//! Progress reporting, cancellation, and pause support.
//!
//! This module provides [`ProgressCallback`] for observing a detection run,
//! [`CancellationToken`] for cooperative cancellation, and [`PauseToken`]
//! for suspending the scan loop without losing accumulated state.
//!
//! # Example
//!
//! ```
//! use rollscan::{ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         match info.percentage {
//!             Some(pct) => println!("[{:?}] {pct}% @ {:.0} fps", info.phase, info.scan_fps),
//!             None => println!("[{:?}] frame {} @ {:.0} fps", info.phase, info.current_frame, info.scan_fps),
//!         }
//!     }
//! }
//! ```

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Instant;

/// The stage of a detection run a progress snapshot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanPhase {
    /// Waiting for the live recording to accumulate a head start.
    HeadStart,
    /// Scanning near the expected program start.
    PreRollSearch,
    /// Waiting for a live recording to finish before the post-roll scans.
    RecordingWait,
    /// Scanning near the expected program end.
    PostRollSearch,
}

/// A snapshot of detection progress.
///
/// Emitted at the scan loop's cooperative-yield cadence: every 500 frames,
/// or every 100 frames while the session is live or fine progress was
/// requested.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Which stage of the run produced this snapshot.
    pub phase: ScanPhase,
    /// Frames visited so far, across all scan passes of the run.
    pub frames_processed: u64,
    /// Projected total frames for the run, when known.
    pub total_frames: Option<u64>,
    /// Completion percentage (0–100), when the projected total is known.
    pub percentage: Option<u8>,
    /// Scan throughput in frames per second since the run started.
    pub scan_fps: f32,
    /// The frame number currently being visited (0 during wait phases).
    pub current_frame: u64,
}

/// Trait for receiving progress updates during a detection run.
///
/// Implementations must be [`Send`] and [`Sync`]: the detector usually runs
/// on a dedicated worker thread while the host observes from elsewhere.
///
/// Callbacks are **infallible**: they observe but cannot halt the run.
/// Use [`CancellationToken`] to stop it and [`PauseToken`] to suspend it.
pub trait ProgressCallback: Send + Sync {
    /// Called at the cooperative-yield cadence, and once per wait-loop poll
    /// while the detector is blocked on the wall clock.
    fn on_progress(&self, info: &ProgressInfo);

    /// Called when a boundary search has produced at least one candidate,
    /// i.e. the eventual break list is known to be non-trivial.
    fn on_break_list_updated(&self) {}
}

/// A no-op implementation that discards all notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Cooperative cancellation token backed by an [`AtomicBool`].
///
/// Clone the token and hand one copy to the detector's config; call
/// [`cancel`](CancellationToken::cancel) from any thread. The scan and wait
/// loops check the token at every yield point and abandon the run with
/// [`RollscanError::Cancelled`](crate::RollscanError::Cancelled), discarding
/// partial candidates.
///
/// # Example
///
/// ```
/// use rollscan::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
/// token.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. All clones observe it.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Cooperative pause token.
///
/// While paused, the scan loop parks in a coarse polling wait (one-second
/// granularity) at its next yield point. Accumulated frame counts and
/// candidates are kept; cancellation is still honored while parked.
///
/// # Example
///
/// ```
/// use rollscan::PauseToken;
///
/// let token = PauseToken::new();
/// token.pause();
/// assert!(token.is_paused());
/// token.resume();
/// assert!(!token.is_paused());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PauseToken {
    paused: Arc<AtomicBool>,
}

impl PauseToken {
    /// Create a new, unpaused token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the detector to park at its next yield point.
    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }

    /// Let a parked detector continue.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }

    /// Check whether a pause has been requested.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
}

/// Internal helper that times the run and assembles snapshots.
pub(crate) struct ProgressTracker {
    started: Instant,
}

impl ProgressTracker {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Build a snapshot for the current state of the run.
    ///
    /// `total_frames` of zero means the projected total is unknown and the
    /// snapshot reports an absolute frame count instead of a percentage.
    pub(crate) fn snapshot(
        &self,
        phase: ScanPhase,
        frames_processed: u64,
        total_frames: u64,
        current_frame: u64,
    ) -> ProgressInfo {
        let elapsed = self.started.elapsed().as_secs_f32();
        let scan_fps = if elapsed > 0.0 {
            frames_processed as f32 / elapsed
        } else {
            0.0
        };

        let percentage = (total_frames > 0)
            .then(|| (frames_processed * 100 / total_frames).min(100) as u8);

        ProgressInfo {
            phase,
            frames_processed,
            total_frames: (total_frames > 0).then_some(total_frames),
            percentage,
            scan_fps,
            current_frame,
        }
    }
}
