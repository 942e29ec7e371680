//! Frame source and classifier seams.
//!
//! The detector does not decode video itself. It drives two host-provided
//! collaborators: a [`FrameSource`] that yields frames in playback order
//! (with exact seeking), and a [`FrameClassifier`] that inspects each frame
//! and reports the [`FrameFlags`] the scanner keys on.
//!
//! A source backing a recording that is still being written should report
//! its *current* frame count from [`total_frames`](FrameSource::total_frames);
//! the detector re-reads it once the recording has finished.

use crate::error::RollscanError;
use crate::record::FrameFlags;

/// Supplies decoded frames by number or sequentially.
///
/// Implementations wrap whatever decode layer the host uses. Frames are
/// returned by value and released by dropping them, so a source that pools
/// frame buffers should hand out guard types.
pub trait FrameSource {
    /// The decoded frame type handed to the classifier.
    type Frame;

    /// Open the underlying media. Called once, before any read or seek.
    fn open(&mut self) -> Result<(), RollscanError>;

    /// Position the source so the next sequential read returns exactly
    /// `frame_number` (not the nearest keyframe).
    fn seek_exact(&mut self, frame_number: u64) -> Result<(), RollscanError>;

    /// Read the next frame in playback order.
    ///
    /// Returns `Ok(None)` at end of stream. For a live recording, end of
    /// stream means "caught up with the writer", which is why scans are
    /// paced rather than run flat out.
    fn read_frame(&mut self) -> Result<Option<(u64, Self::Frame)>, RollscanError>;

    /// Total number of frames currently in the recording.
    ///
    /// May grow while the recording is in progress; only trusted as final
    /// once the wall clock has passed the recording's stop time.
    fn total_frames(&self) -> u64;

    /// Nominal frame rate of the video stream.
    fn frame_rate(&self) -> f64;

    /// Current display aspect ratio.
    fn video_aspect(&self) -> f64;
}

/// Annotates visited frames with scene-change/blank evidence.
///
/// The scan loop calls [`classify`](FrameClassifier::classify) exactly once
/// per frame visit and merges the returned flags into the detector's
/// [`FrameMap`](crate::FrameMap).
pub trait FrameClassifier<F> {
    /// Inspect one frame and report its flags.
    fn classify(&mut self, frame: &F, frame_number: u64) -> FrameFlags;

    /// Notification that the display aspect ratio changed.
    ///
    /// Called once before scanning starts and again whenever the source
    /// reports a different aspect mid-scan, so classifiers that keep
    /// per-geometry state (letterbox masks, logo regions) can reset it.
    fn set_video_params(&mut self, _aspect: f64) {}
}
