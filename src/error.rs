//! Error types for the `rollscan` crate.
//!
//! This module defines [`RollscanError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context
//! (frame numbers, upstream reasons) to diagnose a failed run without extra
//! logging at the call site.

use std::io::Error as IoError;

use thiserror::Error;

/// The unified error type for all `rollscan` operations.
///
/// Every public method that can fail returns `Result<T, RollscanError>`.
/// A legitimately empty scan result (no qualifying frame found in range) is
/// **not** an error; it is represented by an absent candidate and handled by
/// the break-list fallback chain.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RollscanError {
    /// The frame source could not be opened.
    #[error("Failed to open frame source: {reason}")]
    SourceOpen {
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The frame source failed while reading a frame.
    #[error("Failed to read frame {frame_number}: {reason}")]
    SourceRead {
        /// The frame number being read when the failure occurred.
        frame_number: u64,
        /// Underlying reason the read failed.
        reason: String,
    },

    /// An exact seek to the requested frame failed.
    #[error("Failed to seek to frame {frame_number}: {reason}")]
    Seek {
        /// The frame number that was the seek target.
        frame_number: u64,
        /// Underlying reason the seek failed.
        reason: String,
    },

    /// Video parameters (frame rate, aspect) could not be established.
    #[error("Failed to initialize video: {0}")]
    VideoInit(String),

    /// The run was cancelled via a [`CancellationToken`](crate::CancellationToken).
    ///
    /// Partial boundary candidates are discarded; the break list stays empty.
    #[error("Run cancelled")]
    Cancelled,

    /// An I/O error surfaced by a frame-source implementation.
    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}
