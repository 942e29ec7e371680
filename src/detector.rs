//! The boundary detector.
//!
//! [`BoundaryDetector`] drives the whole run on a single logical worker:
//! wait out the live head start, resolve the pre-roll boundary with two
//! directional scans, wait for a live recording to finish, resolve the
//! post-roll boundary the same way, and reduce the four candidates into the
//! final break list. See the crate-level docs for the search protocol.

use std::sync::Arc;

use log::debug;

use crate::breaks::{self, BoundaryCandidates, BreakList};
use crate::clock::{Clock, SystemClock};
use crate::config::DetectorConfig;
use crate::error::RollscanError;
use crate::progress::{ProgressTracker, ScanPhase};
use crate::record::FrameMap;
use crate::scanner::{ScanRequest, scan_range};
use crate::session::Session;
use crate::source::{FrameClassifier, FrameSource};

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Both requested boundaries were resolved; the break list is ready.
    Flagged,
    /// The recording ended before the configured head start elapsed, so it
    /// is too short to be worth flagging. Not an error; the break list is
    /// empty.
    Skipped,
}

/// Commercial-boundary detector for one recording.
///
/// Generic over the host's [`FrameSource`] and [`FrameClassifier`] seams.
/// The detector owns both for the duration of the run; nothing else may
/// seek or read the source while a run is in progress.
///
/// A detector performs a single run. [`break_list`](BoundaryDetector::break_list)
/// returns an empty mapping until a run has completed, and the same mapping
/// every time afterwards.
pub struct BoundaryDetector<S, C>
where
    S: FrameSource,
    C: FrameClassifier<S::Frame>,
{
    pub(crate) source: S,
    pub(crate) classifier: C,
    pub(crate) session: Session,
    pub(crate) config: DetectorConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) frame_map: FrameMap,
    pub(crate) tracker: ProgressTracker,
    /// Flips to `false` exactly once, when the wall clock passes the
    /// recording's stop time.
    pub(crate) still_recording: bool,
    /// Estimated while live; re-read from the source once finished.
    pub(crate) total_frames: u64,
    /// Frames visited across all scan passes of the run.
    pub(crate) frames_processed: u64,
    /// Projected workload for aggregate progress percentages.
    pub(crate) frames_to_process: u64,
    /// Last aspect ratio handed to the classifier.
    pub(crate) aspect: f64,
    candidates: BoundaryCandidates,
    completed: bool,
}

impl<S, C> BoundaryDetector<S, C>
where
    S: FrameSource,
    C: FrameClassifier<S::Frame>,
{
    /// Create a detector using the system wall clock.
    pub fn new(source: S, classifier: C, session: Session, config: DetectorConfig) -> Self {
        Self::with_clock(source, classifier, session, config, Arc::new(SystemClock))
    }

    /// Create a detector with an explicit [`Clock`].
    ///
    /// Lets tests drive the head-start wait, live pacing, and
    /// recording-finish wait deterministically.
    pub fn with_clock(
        source: S,
        classifier: C,
        session: Session,
        config: DetectorConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            classifier,
            session,
            config,
            clock,
            frame_map: FrameMap::new(),
            tracker: ProgressTracker::start(),
            still_recording: false,
            total_frames: 0,
            frames_processed: 0,
            frames_to_process: 0,
            aspect: 0.0,
            candidates: BoundaryCandidates::default(),
            completed: false,
        }
    }

    /// The session this detector was built for.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The frame source, e.g. to release it after the run.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Frames visited so far across all scan passes.
    pub fn frames_processed(&self) -> u64 {
        self.frames_processed
    }

    /// Per-frame flags recorded during the run.
    pub fn frame_map(&self) -> &FrameMap {
        &self.frame_map
    }

    /// Run the full detection sequence.
    ///
    /// Blocks until both requested boundaries are resolved (which, for a
    /// live session, means blocking until the recording finishes), the
    /// recording turns out too short to flag, or an error occurs.
    /// Cancellation surfaces as [`RollscanError::Cancelled`]; partial
    /// candidates are discarded and the break list stays empty.
    pub fn run(&mut self) -> Result<RunOutcome, RollscanError> {
        self.tracker = ProgressTracker::start();
        self.candidates = BoundaryCandidates::default();
        self.frames_processed = 0;
        self.completed = false;

        let mut now = self.clock.now();
        self.still_recording = self.session.is_live(now);
        let were_recording = self.still_recording;

        // Give a live recording a head start so the pre-roll window exists
        // before we start reading it.
        let mut secs_since = self.session.seconds_since_start(now);
        while self.still_recording && secs_since < self.config.head_start_secs {
            debug!("Waiting to pass preroll + head start ({secs_since}s elapsed)");
            self.emit_wait_progress(ScanPhase::HeadStart);
            self.check_cancelled()?;
            self.clock.sleep(self.config.poll_interval);

            now = self.clock.now();
            secs_since = self.session.seconds_since_start(now);
            self.still_recording = self.session.is_live(now);
        }

        self.source.open()?;

        // Don't bother flagging short near-realtime recordings.
        if were_recording && !self.still_recording && secs_since < self.config.head_start_secs {
            debug!("Recording ended within the head start; nothing worth flagging");
            return Ok(RunOutcome::Skipped);
        }

        if self.session.fps <= 0.0 {
            return Err(RollscanError::VideoInit(format!(
                "invalid session frame rate {}",
                self.session.fps
            )));
        }

        self.check_cancelled()?;

        now = self.clock.now();
        self.total_frames = if now > self.session.recording_stops_at {
            self.source.total_frames()
        } else {
            (self.session.fps * self.session.recording_span_secs() as f64) as u64
        };

        let aspect = self.source.video_aspect();
        self.classifier.set_video_params(aspect);
        self.aspect = aspect;

        let lookahead = (self.session.fps * self.config.lookahead_secs as f64) as u64;
        let stop_frame = self.session.pre_roll + lookahead;

        self.frames_to_process = 0;
        if self.session.pre_roll > 0 {
            self.frames_to_process += stop_frame;
        }
        if self.session.post_roll > 0 {
            // Forward span plus the mirrored backward span, at worst.
            self.frames_to_process += self.session.post_roll * 2;
        }

        if self.session.pre_roll > 0 {
            let pre_roll = self.session.pre_roll;
            debug!("Finding closest break after preroll ({pre_roll}-{stop_frame})");
            let after = scan_range(
                self,
                ScanRequest {
                    start: pre_roll,
                    stop: stop_frame,
                    find_last: false,
                    phase: ScanPhase::PreRollSearch,
                },
            )?;
            self.candidates.after_pre = after.found_frame;
            debug!("Closest after preroll: {:?}", after.found_frame);

            // Mirror the forward hit distance so the two candidates get
            // compared over symmetric windows; no hit means the backward
            // pass may sweep all the way from frame 0.
            let backward_start = match after.found_frame {
                Some(found) => pre_roll.saturating_sub(found.abs_diff(pre_roll) + 1),
                None => 0,
            };
            debug!("Finding closest break before preroll ({backward_start}-{pre_roll})");
            let before = scan_range(
                self,
                ScanRequest {
                    start: backward_start,
                    stop: pre_roll,
                    find_last: true,
                    phase: ScanPhase::PreRollSearch,
                },
            )?;
            self.candidates.before_pre = before.found_frame;
            debug!("Closest before preroll: {:?}", before.found_frame);

            if self.candidates.after_pre.is_some() || self.candidates.before_pre.is_some() {
                self.config.progress.on_break_list_updated();
            }

            // Rebase the projection on frames actually visited so the
            // aggregate percentage stays honest.
            let unvisited = stop_frame as i64 - self.frames_processed as i64;
            self.frames_to_process =
                (self.frames_to_process as i64 - unvisited).max(0) as u64;
        }

        if self.still_recording {
            while self.clock.now() <= self.session.recording_stops_at {
                debug!("Waiting for recording to finish");
                self.emit_wait_progress(ScanPhase::RecordingWait);
                self.check_cancelled()?;
                self.clock.sleep(self.config.poll_interval);
            }
            self.still_recording = false;
            self.total_frames = self.source.total_frames();
        }

        if self.session.post_roll > 0 {
            let anchor = self.total_frames.saturating_sub(self.session.post_roll);
            let total = self.total_frames;
            debug!("Finding closest break after postroll ({anchor}-{total})");
            let after = scan_range(
                self,
                ScanRequest {
                    start: anchor,
                    stop: total,
                    find_last: false,
                    phase: ScanPhase::PostRollSearch,
                },
            )?;
            self.candidates.after_post = after.found_frame;
            debug!("Closest after postroll: {:?}", after.found_frame);

            let backward_start = match after.found_frame {
                Some(found) => anchor.saturating_sub(found.abs_diff(anchor) + 1),
                None => 0,
            };
            debug!("Finding closest break before postroll ({backward_start}-{anchor})");
            let before = scan_range(
                self,
                ScanRequest {
                    start: backward_start,
                    stop: anchor,
                    find_last: true,
                    phase: ScanPhase::PostRollSearch,
                },
            )?;
            self.candidates.before_post = before.found_frame;
            debug!("Closest before postroll: {:?}", before.found_frame);

            if self.candidates.after_post.is_some() || self.candidates.before_post.is_some() {
                self.config.progress.on_break_list_updated();
            }

            self.frames_to_process = self.frames_processed;
        }

        self.completed = true;
        debug!(
            "Run complete: {} frames visited, candidates {:?}",
            self.frames_processed, self.candidates
        );
        Ok(RunOutcome::Flagged)
    }

    /// The break list resolved by the last completed run.
    ///
    /// Empty until [`run`](BoundaryDetector::run) has returned
    /// [`RunOutcome::Flagged`]; idempotent afterwards.
    pub fn break_list(&self) -> BreakList {
        if !self.completed {
            return BreakList::new();
        }
        breaks::build_break_list(
            &self.candidates,
            self.session.pre_roll,
            self.session.post_roll,
            self.total_frames,
        )
    }

    pub(crate) fn check_cancelled(&self) -> Result<(), RollscanError> {
        if self.config.is_cancelled() {
            debug!("Cancellation observed; abandoning run");
            return Err(RollscanError::Cancelled);
        }
        Ok(())
    }

    fn emit_wait_progress(&self, phase: ScanPhase) {
        let info =
            self.tracker
                .snapshot(phase, self.frames_processed, self.frames_to_process, 0);
        self.config.progress.on_progress(&info);
    }
}
