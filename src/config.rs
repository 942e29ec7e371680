//! Detector configuration.
//!
//! [`DetectorConfig`] is a builder that threads tunables, the progress
//! callback, and the cancellation/pause tokens into a
//! [`BoundaryDetector`](crate::BoundaryDetector) without polluting its
//! method signatures. All settings have defaults matching long-standing
//! DVR flagging practice; a default-constructed config is fully usable.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use rollscan::{CancellationToken, DetectorConfig, ProgressCallback, ProgressInfo};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} frames done", info.phase, info.frames_processed);
//!     }
//! }
//!
//! let token = CancellationToken::new();
//! let config = DetectorConfig::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_cancellation(token.clone())
//!     .with_lookahead_secs(90);
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Duration;

use crate::progress::{CancellationToken, NoOpProgress, PauseToken, ProgressCallback};

/// Configuration for a detection run.
///
/// Replaces the ambient settings lookup of classic flaggers with an
/// explicit structure passed at construction.
#[derive(Clone)]
pub struct DetectorConfig {
    /// When `true` (the default), a scene change *or* a blank frame counts
    /// as boundary evidence; when `false`, only blank frames do.
    pub(crate) aggressive: bool,
    /// Seconds of recording that must exist before a live scan starts.
    pub(crate) head_start_secs: i64,
    /// Lag tolerance behind a live recorder before a scan catches up.
    pub(crate) scan_buffer_secs: i64,
    /// How far past a guessed boundary the forward search may look.
    pub(crate) lookahead_secs: u64,
    /// Granularity of the wall-clock wait loops (head start, recording
    /// finish, pause).
    pub(crate) poll_interval: Duration,
    /// Per-frame delay on finished recordings when full speed is off.
    pub(crate) idle_frame_delay: Duration,
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// Pause token. `None` means never paused.
    pub(crate) pause: Option<PauseToken>,
}

impl Debug for DetectorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DetectorConfig")
            .field("aggressive", &self.aggressive)
            .field("head_start_secs", &self.head_start_secs)
            .field("scan_buffer_secs", &self.scan_buffer_secs)
            .field("lookahead_secs", &self.lookahead_secs)
            .field("poll_interval", &self.poll_interval)
            .field("idle_frame_delay", &self.idle_frame_delay)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("has_pause", &self.pause.is_some())
            .finish()
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl DetectorConfig {
    /// Create a configuration with default settings.
    ///
    /// Defaults: aggressive matching, 120 s head start, 30 s live lag
    /// buffer, 120 s lookahead, 5 s wait-loop polling, 10 ms idle frame
    /// delay, no progress callback, no cancellation, no pause.
    pub fn new() -> Self {
        Self {
            aggressive: true,
            head_start_secs: 120,
            scan_buffer_secs: 30,
            lookahead_secs: 120,
            poll_interval: Duration::from_secs(5),
            idle_frame_delay: Duration::from_millis(10),
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            pause: None,
        }
    }

    /// Control how much evidence a frame needs to qualify as a boundary.
    ///
    /// Aggressive (default) accepts scene changes or blank frames;
    /// conservative requires a blank frame.
    #[must_use]
    pub fn with_aggressive(mut self, aggressive: bool) -> Self {
        self.aggressive = aggressive;
        self
    }

    /// Set how many seconds of a live recording must exist before
    /// scanning starts. A recording that ends before this elapses is
    /// skipped as too short to flag.
    #[must_use]
    pub fn with_head_start_secs(mut self, secs: i64) -> Self {
        self.head_start_secs = secs.max(0);
        self
    }

    /// Set the lag tolerance (seconds) behind a live recorder.
    ///
    /// While within the buffer the scan holds back to avoid racing frames
    /// not yet written; once behind by more, it catches up.
    #[must_use]
    pub fn with_scan_buffer_secs(mut self, secs: i64) -> Self {
        self.scan_buffer_secs = secs.max(0);
        self
    }

    /// Set how far past a guessed boundary the forward search may look,
    /// in seconds of video at the session's frame rate.
    #[must_use]
    pub fn with_lookahead_secs(mut self, secs: u64) -> Self {
        self.lookahead_secs = secs;
        self
    }

    /// Set the granularity of the wall-clock wait loops.
    ///
    /// Bounds how quickly a waiting detector notices cancellation.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the per-frame CPU-yield delay used on finished recordings when
    /// the session does not request full speed.
    #[must_use]
    pub fn with_idle_frame_delay(mut self, delay: Duration) -> Self {
        self.idle_frame_delay = delay;
        self
    }

    /// Attach a progress callback.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When cancelled, the run stops at its next yield point and returns
    /// [`RollscanError::Cancelled`](crate::RollscanError::Cancelled).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Attach a pause token.
    #[must_use]
    pub fn with_pause(mut self, token: PauseToken) -> Self {
        self.pause = Some(token);
        self
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }

    /// Returns `true` if a pause is currently requested.
    pub(crate) fn is_paused(&self) -> bool {
        self.pause.as_ref().is_some_and(|token| token.is_paused())
    }
}
