//! Shared test doubles: an in-memory frame source, a scripted classifier,
//! and a simulated clock that advances on sleep instead of blocking.
#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rollscan::{Clock, FrameClassifier, FrameFlags, FrameSource, RollscanError, Session};

/// In-memory frame source: frames are just their numbers.
pub struct ScriptedSource {
    pub total: u64,
    pub fps: f64,
    pub position: u64,
    pub fail_open: bool,
    pub opened: bool,
    pub seeks: Vec<u64>,
    /// `(from_frame, aspect)` pairs, ascending; the last entry at or below
    /// the current position wins.
    pub aspects: Vec<(u64, f64)>,
}

impl ScriptedSource {
    pub fn new(total: u64, fps: f64) -> Self {
        Self {
            total,
            fps,
            position: 0,
            fail_open: false,
            opened: false,
            seeks: Vec::new(),
            aspects: vec![(0, 4.0 / 3.0)],
        }
    }
}

impl FrameSource for ScriptedSource {
    type Frame = u64;

    fn open(&mut self) -> Result<(), RollscanError> {
        if self.fail_open {
            return Err(RollscanError::SourceOpen {
                reason: "scripted failure".into(),
            });
        }
        self.opened = true;
        Ok(())
    }

    fn seek_exact(&mut self, frame_number: u64) -> Result<(), RollscanError> {
        self.seeks.push(frame_number);
        self.position = frame_number;
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<(u64, u64)>, RollscanError> {
        if self.position >= self.total {
            return Ok(None);
        }
        let number = self.position;
        self.position += 1;
        Ok(Some((number, number)))
    }

    fn total_frames(&self) -> u64 {
        self.total
    }

    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn video_aspect(&self) -> f64 {
        let current = self.position.saturating_sub(1);
        self.aspects
            .iter()
            .rev()
            .find(|(from, _)| *from <= current)
            .map(|(_, aspect)| *aspect)
            .unwrap_or(4.0 / 3.0)
    }
}

/// Classifier that returns pre-scripted flags per frame and records what
/// the detector told it.
#[derive(Default)]
pub struct ScriptedClassifier {
    pub flags: BTreeMap<u64, FrameFlags>,
    pub classified: Vec<u64>,
    pub aspects_seen: Vec<f64>,
}

impl ScriptedClassifier {
    pub fn with_flags(flags: impl IntoIterator<Item = (u64, FrameFlags)>) -> Self {
        Self {
            flags: flags.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn blank_at(frames: impl IntoIterator<Item = u64>) -> Self {
        Self::with_flags(frames.into_iter().map(|f| (f, FrameFlags::BLANK)))
    }
}

impl FrameClassifier<u64> for ScriptedClassifier {
    fn classify(&mut self, _frame: &u64, frame_number: u64) -> FrameFlags {
        self.classified.push(frame_number);
        self.flags
            .get(&frame_number)
            .copied()
            .unwrap_or(FrameFlags::NONE)
    }

    fn set_video_params(&mut self, aspect: f64) {
        self.aspects_seen.push(aspect);
    }
}

/// Clock whose `sleep` advances simulated time instead of blocking.
pub struct SimClock {
    now: Mutex<DateTime<Utc>>,
    pub sleeps: Mutex<Vec<Duration>>,
}

impl SimClock {
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(duration).unwrap_or_default();
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Fixed reference instant for session windows.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 20, 0, 0).unwrap()
}

/// A session over a recording that finished well in the past: no head-start
/// wait, no pacing, no recording-finish wait.
pub fn finished_session(pre_roll: u64, post_roll: u64, fps: f64) -> Session {
    Session {
        started_at: t0(),
        stops_at: t0() + chrono::Duration::hours(1),
        recording_started_at: t0(),
        recording_stops_at: t0() + chrono::Duration::hours(1),
        pre_roll,
        post_roll,
        fps,
        full_speed: true,
        show_progress: false,
    }
}
