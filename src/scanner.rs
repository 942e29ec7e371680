//! Bounded directional range scan.
//!
//! [`scan_range`] walks one frame window looking for boundary evidence.
//! In first-match mode it returns as soon as a qualifying frame is seen;
//! in last-match mode it sweeps the whole window and keeps the latest
//! qualifying frame, which is what makes the backward half of a boundary
//! search yield the candidate *nearest* the guess.
//!
//! The loop is cooperative: at a fixed frame stride (finer while live) it
//! checks the cancellation token, parks while paused, and emits a progress
//! snapshot. While the session is live it also applies the
//! [`Pacer`](crate::Pacer) so the scan tracks the recorder instead of
//! racing it.

use std::time::{Duration, Instant};

use log::trace;

use crate::detector::BoundaryDetector;
use crate::error::RollscanError;
use crate::pacing::Pacer;
use crate::progress::ScanPhase;
use crate::record::FrameFlags;
use crate::source::{FrameClassifier, FrameSource};

/// One directional scan over a frame window.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanRequest {
    /// First frame of the window (inclusive).
    pub(crate) start: u64,
    /// Last frame of the window (inclusive).
    pub(crate) stop: u64,
    /// `false`: stop at the first qualifying frame. `true`: sweep the whole
    /// window and keep the last qualifying frame.
    pub(crate) find_last: bool,
    /// Phase reported in progress snapshots.
    pub(crate) phase: ScanPhase,
}

/// Result of one scan pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanOutcome {
    /// The qualifying frame, if any was found in the window. Never frame 0:
    /// the pre-roll interval already starts there, so frame 0 cannot mark
    /// an interior boundary.
    pub(crate) found_frame: Option<u64>,
}

/// Does this frame's evidence qualify it as a boundary?
fn qualifies(flags: FrameFlags, aggressive: bool) -> bool {
    if aggressive {
        flags.intersects(FrameFlags::SCENE_CHANGE | FrameFlags::BLANK)
    } else {
        flags.contains(FrameFlags::BLANK)
    }
}

/// Scan one window of the detector's frame source.
///
/// Frames visited are counted onto `detector.frames_processed` so the
/// aggregate percentage spans both passes of a boundary search. End of
/// stream and an exhausted window are both normal terminations; "nothing
/// found" is a valid outcome, not an error.
pub(crate) fn scan_range<S, C>(
    detector: &mut BoundaryDetector<S, C>,
    request: ScanRequest,
) -> Result<ScanOutcome, RollscanError>
where
    S: FrameSource,
    C: FrameClassifier<S::Frame>,
{
    // The seek is exact: the next sequential read returns the window's
    // first frame, so nothing before `start` is ever classified.
    detector.source.seek_exact(request.start)?;
    trace!("Scanning window {}-{}", request.start, request.stop);

    let pacer = Pacer::new(
        detector.source.frame_rate(),
        detector.config.scan_buffer_secs,
        detector.session.full_speed,
    );

    let mut found: Option<u64> = None;

    loop {
        let frame_started = detector.still_recording.then(Instant::now);

        let Some((frame_number, frame)) = detector.source.read_frame()? else {
            break;
        };

        if frame_number % 1000 == 0 {
            trace!("Processing frame {frame_number}");
        }

        if frame_number > request.stop || (!request.find_last && found.is_some()) {
            break;
        }

        // Classifiers with per-geometry state need to know when the
        // display aspect flips mid-stream.
        let aspect = detector.source.video_aspect();
        if aspect != detector.aspect {
            detector.classifier.set_video_params(aspect);
            detector.aspect = aspect;
        }

        let live = detector.still_recording;
        let yield_stride = if live { 100 } else { 500 };
        if frame_number % yield_stride == 0 {
            detector.check_cancelled()?;
        }

        // Park while paused without losing accumulated counts; stay
        // responsive to cancellation while parked.
        while detector.config.is_paused() {
            detector.check_cancelled()?;
            detector.clock.sleep(Duration::from_secs(1));
        }

        // Yield some CPU on finished recordings even when niced.
        if !detector.session.full_speed && !live {
            detector.clock.sleep(detector.config.idle_frame_delay);
        }

        let progress_stride = if detector.session.show_progress || live {
            100
        } else {
            500
        };
        if frame_number % progress_stride == 0 {
            let info = detector.tracker.snapshot(
                request.phase,
                detector.frames_processed,
                detector.frames_to_process,
                frame_number,
            );
            detector.config.progress.on_progress(&info);
        }

        let flags = detector.classifier.classify(&frame, frame_number);
        let combined = detector.frame_map.merge(frame_number, flags);
        if frame_number > 0 && qualifies(combined, detector.config.aggressive) {
            found = Some(frame_number);
        }

        if let Some(started) = frame_started {
            let now = detector.clock.now();
            let seconds_recorded = detector.session.seconds_recorded(now);
            let seconds_flagged =
                (detector.frames_processed as f64 / detector.session.fps) as i64;
            let seconds_behind = seconds_recorded - seconds_flagged;

            if let Some(sleep) = pacer.sleep_duration(started.elapsed(), seconds_behind) {
                detector.clock.sleep(sleep);
            }
        }

        detector.frames_processed += 1;
    }

    Ok(ScanOutcome { found_frame: found })
}
