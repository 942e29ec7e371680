//! # rollscan
//!
//! Locate commercial-break boundaries near expected pre-roll/post-roll
//! offsets in recorded video, live or completed.
//!
//! A recorder usually starts a little before the program and stops a little
//! after it. `rollscan` takes the caller's guess at those two offsets (the
//! *pre-roll* and *post-roll*, in frames) and searches a bounded window
//! around each for the nearest scene-change or blank frame, the visual
//! events that mark real commercial transitions, instead of scanning the
//! whole recording. Each boundary is resolved with two directional passes:
//! forward from the guess (first match wins), then backward over a window
//! mirroring the forward hit distance (last match wins, i.e. the frame
//! nearest the guess). The four candidates reduce to an ordered
//! [`BreakList`] of `frame → Start/End` marks.
//!
//! The detector works against a recording that is **still being written**:
//! it waits out a configurable head start, paces its frame consumption so
//! it never races the recorder, and defers the post-roll search until the
//! recording has definitively finished. Decoding and per-frame
//! classification stay on the host's side of the [`FrameSource`] and
//! [`FrameClassifier`] seams.
//!
//! ## Quick start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use rollscan::{
//!     BoundaryDetector, DetectorConfig, FrameClassifier, FrameFlags,
//!     FrameSource, RollscanError, Session,
//! };
//!
//! // A finished 5000-frame recording, served from memory.
//! struct StubSource {
//!     position: u64,
//!     total: u64,
//! }
//!
//! impl FrameSource for StubSource {
//!     type Frame = ();
//!
//!     fn open(&mut self) -> Result<(), RollscanError> {
//!         Ok(())
//!     }
//!
//!     fn seek_exact(&mut self, frame_number: u64) -> Result<(), RollscanError> {
//!         self.position = frame_number;
//!         Ok(())
//!     }
//!
//!     fn read_frame(&mut self) -> Result<Option<(u64, ())>, RollscanError> {
//!         if self.position >= self.total {
//!             return Ok(None);
//!         }
//!         let number = self.position;
//!         self.position += 1;
//!         Ok(Some((number, ())))
//!     }
//!
//!     fn total_frames(&self) -> u64 {
//!         self.total
//!     }
//!
//!     fn frame_rate(&self) -> f64 {
//!         25.0
//!     }
//!
//!     fn video_aspect(&self) -> f64 {
//!         16.0 / 9.0
//!     }
//! }
//!
//! // A classifier that flags a single blank frame at 110.
//! struct BlankAt(u64);
//!
//! impl FrameClassifier<()> for BlankAt {
//!     fn classify(&mut self, _frame: &(), frame_number: u64) -> FrameFlags {
//!         if frame_number == self.0 {
//!             FrameFlags::BLANK
//!         } else {
//!             FrameFlags::NONE
//!         }
//!     }
//! }
//!
//! let session = Session {
//!     started_at: Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap(),
//!     stops_at: Utc.with_ymd_and_hms(2024, 5, 1, 21, 0, 0).unwrap(),
//!     recording_started_at: Utc.with_ymd_and_hms(2024, 5, 1, 19, 59, 0).unwrap(),
//!     recording_stops_at: Utc.with_ymd_and_hms(2024, 5, 1, 21, 1, 0).unwrap(),
//!     pre_roll: 100,
//!     post_roll: 0,
//!     fps: 25.0,
//!     full_speed: true,
//!     show_progress: false,
//! };
//!
//! let mut detector = BoundaryDetector::new(
//!     StubSource { position: 0, total: 5_000 },
//!     BlankAt(110),
//!     session,
//!     DetectorConfig::new(),
//! );
//!
//! detector.run()?;
//! let breaks = detector.break_list();
//! assert_eq!(breaks.len(), 2); // {0: Start, 110: End}
//! # Ok::<(), RollscanError>(())
//! ```
//!
//! ## Features
//!
//! - **Bidirectional boundary search**: bounded windows around the guessed
//!   offsets; total work proportional to the guess error, not the recording
//! - **Live-session pacing**: per-frame sleeps keep the scan within a
//!   bounded lag of a recorder that is still writing
//! - **Cooperative control**: [`CancellationToken`] and [`PauseToken`]
//!   checked at fixed frame strides, even while waiting
//! - **Progress reporting**: [`ProgressCallback`] snapshots with phase,
//!   percentage (or absolute frame count), and scan throughput
//! - **Deterministic testing**: the [`Clock`] seam replaces every blocking
//!   wait in tests
//!
//! ### Optional cargo features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize`/`Deserialize` on the public data types |

pub mod breaks;
pub mod clock;
pub mod config;
pub mod detector;
pub mod error;
pub mod pacing;
pub mod progress;
pub mod record;
mod scanner;
pub mod session;
pub mod source;

pub use breaks::{BreakKind, BreakList};
pub use clock::{Clock, SystemClock};
pub use config::DetectorConfig;
pub use detector::{BoundaryDetector, RunOutcome};
pub use error::RollscanError;
pub use pacing::Pacer;
pub use progress::{CancellationToken, PauseToken, ProgressCallback, ProgressInfo, ScanPhase};
pub use record::{FrameFlags, FrameMap};
pub use session::Session;
pub use source::{FrameClassifier, FrameSource};
