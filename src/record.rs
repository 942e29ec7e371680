//! Per-frame classification records.
//!
//! Each frame visited by a scan is annotated with a [`FrameFlags`] bitmask
//! by the host's [`FrameClassifier`](crate::FrameClassifier). The masks live
//! in a [`FrameMap`], a sparse table keyed by frame number. A frame may be
//! revisited across the two passes of one boundary search; its flags merge
//! by bitwise OR so nothing observed earlier is lost.

use std::collections::BTreeMap;
use std::ops::{BitOr, BitOrAssign};

/// Classification flags for a single video frame.
///
/// A compact bitmask rather than an enum set: classifiers typically derive
/// these from decoder-level heuristics and may flag several conditions on
/// the same frame.
///
/// # Example
///
/// ```
/// use rollscan::FrameFlags;
///
/// let flags = FrameFlags::SCENE_CHANGE | FrameFlags::BLANK;
/// assert!(flags.contains(FrameFlags::BLANK));
/// assert!(flags.intersects(FrameFlags::SCENE_CHANGE | FrameFlags::ASPECT_CHANGE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameFlags(u32);

impl FrameFlags {
    /// No flags set.
    pub const NONE: FrameFlags = FrameFlags(0);
    /// The frame is (near-)uniformly dark or bright, a likely break marker.
    pub const BLANK: FrameFlags = FrameFlags(1 << 0);
    /// The frame starts a new shot (hard cut from the previous frame).
    pub const SCENE_CHANGE: FrameFlags = FrameFlags(1 << 1);
    /// The display aspect ratio changed at this frame.
    pub const ASPECT_CHANGE: FrameFlags = FrameFlags(1 << 2);

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: FrameFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if any bit of `other` is set in `self`.
    pub fn intersects(self, other: FrameFlags) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `true` if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for FrameFlags {
    type Output = FrameFlags;

    fn bitor(self, rhs: FrameFlags) -> FrameFlags {
        FrameFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for FrameFlags {
    fn bitor_assign(&mut self, rhs: FrameFlags) {
        self.0 |= rhs.0;
    }
}

/// Sparse per-frame annotation table, keyed by frame number.
///
/// Single writer (the scan loop, via the classifier), single reader. The
/// table grows with the frames actually visited (bounded by the scan
/// windows, not by the recording length) and is discarded with the
/// detector once a run completes.
#[derive(Debug, Default)]
pub struct FrameMap {
    inner: BTreeMap<u64, FrameFlags>,
}

impl FrameMap {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `flags` into the record for `frame_number`.
    ///
    /// Returns the combined mask for the frame.
    pub fn merge(&mut self, frame_number: u64, flags: FrameFlags) -> FrameFlags {
        let entry = self.inner.entry(frame_number).or_default();
        *entry |= flags;
        *entry
    }

    /// Look up the recorded flags for a frame, if it was ever visited.
    pub fn get(&self, frame_number: u64) -> Option<FrameFlags> {
        self.inner.get(&frame_number).copied()
    }

    /// Number of distinct frames recorded.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if no frame has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
