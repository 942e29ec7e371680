//! Break-list construction.
//!
//! A completed run leaves behind up to four boundary candidates: the
//! closest qualifying frame after and before each guessed offset. This
//! module reduces them, together with the guesses themselves, into the
//! final ordered mapping of frame number to [`BreakKind`].

use std::collections::BTreeMap;

/// Whether a frame opens or closes a commercial interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BreakKind {
    /// First frame of a commercial interval.
    Start,
    /// First frame after a commercial interval.
    End,
}

/// Ordered mapping from frame number to boundary kind.
///
/// At most two intervals: `[0, end]` around the pre-roll boundary and
/// `[start, total_frames]` around the post-roll boundary.
pub type BreakList = BTreeMap<u64, BreakKind>;

/// The four optional results of the bidirectional boundary searches.
///
/// Each field is written at most once, by the scan pass that owns it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BoundaryCandidates {
    /// Closest qualifying frame at or past the pre-roll guess.
    pub(crate) after_pre: Option<u64>,
    /// Closest qualifying frame before the pre-roll guess.
    pub(crate) before_pre: Option<u64>,
    /// Closest qualifying frame at or past the post-roll anchor.
    pub(crate) after_post: Option<u64>,
    /// Closest qualifying frame before the post-roll anchor.
    pub(crate) before_post: Option<u64>,
}

/// Pick the candidate nearer to the guess by absolute frame distance.
///
/// Ties go to `before`. With only one candidate set, that one wins; with
/// neither, the caller falls back to the guess itself.
fn resolve(after: Option<u64>, before: Option<u64>, guess: u64) -> Option<u64> {
    let distance = |frame: u64| frame.abs_diff(guess);
    match (after, before) {
        (Some(a), Some(b)) => {
            if distance(a) < distance(b) {
                Some(a)
            } else {
                Some(b)
            }
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// Reduce the candidates and guesses into the final break list.
///
/// A boundary that was never requested (`pre_roll` / `post_roll` of zero)
/// contributes nothing: its candidates are unset and its fallback guess
/// resolves to a frame that cannot open an interval.
///
/// On a recording short enough that the pre-roll search window reaches past
/// the post-roll anchor, the two boundaries may resolve out of order or to
/// the same frame; the marks are emitted as resolved, and a `Start` landing
/// on an existing `End` displaces it. Callers flagging unusually short
/// recordings should sanity-check the interval ordering themselves.
pub(crate) fn build_break_list(
    candidates: &BoundaryCandidates,
    pre_roll: u64,
    post_roll: u64,
    total_frames: u64,
) -> BreakList {
    let mut marks = BreakList::new();

    let end = resolve(candidates.after_pre, candidates.before_pre, pre_roll).unwrap_or(pre_roll);
    if end > 0 {
        marks.insert(0, BreakKind::Start);
        marks.insert(end, BreakKind::End);
    }

    let anchor = total_frames.saturating_sub(post_roll);
    let start = resolve(candidates.after_post, candidates.before_post, anchor)
        .unwrap_or(if post_roll > 0 { anchor } else { 0 });
    if start > 0 {
        marks.insert(start, BreakKind::Start);
        marks.insert(total_frames, BreakKind::End);
    }

    marks
}
