//! The frame-access capability.
//!
//! The sampler never touches a decoder directly; it talks to this trait, so
//! the video path and the in-memory test script are interchangeable
//! producers of the same raw-reading stream.

use async_trait::async_trait;

use roundscope_analysis_core::gauge::PixelRegion;
use roundscope_common::error::{RoundscopeError, RoundscopeResult};
use roundscope_common::timecode::TimestampMs;
use roundscope_match_model::BarRect;

/// Outcome of one bounded seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStatus {
    /// The frame at the requested timestamp is decoded and capturable.
    Ready,
    /// The source's own wait bound expired; the caller skips this timestamp.
    TimedOut,
}

/// A lazily seekable frame source.
///
/// One seek is in flight at a time: `seek` suspends until the frame is
/// available or the source's bounded wait expires, and `capture_region`
/// reads from the most recently readied frame. Rectangles are in actual
/// frame coordinates (callers scale from reference space first).
#[async_trait]
pub trait FrameSource: Send {
    /// Total media duration in milliseconds.
    fn duration_ms(&self) -> TimestampMs;

    /// Frame dimensions in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Position on the frame at `timestamp_ms`.
    ///
    /// `Err` is terminal (decode fault, lost pipeline); `TimedOut` is the
    /// per-seek local recovery.
    async fn seek(&mut self, timestamp_ms: TimestampMs) -> RoundscopeResult<SeekStatus>;

    /// Copy one rectangle out of the current frame.
    fn capture_region(&self, rect: &BarRect) -> RoundscopeResult<PixelRegion>;
}

/// One scripted gauge state, held from its timestamp until the next entry.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedFrame {
    /// Player 1 gauge fill percent.
    pub p1_fill: u8,
    /// Player 2 gauge fill percent.
    pub p2_fill: u8,
    /// Simulate a stalled seek at this frame.
    pub stalled: bool,
}

impl ScriptedFrame {
    pub fn fill(p1_fill: u8, p2_fill: u8) -> Self {
        Self {
            p1_fill,
            p2_fill,
            stalled: false,
        }
    }

    pub fn stall() -> Self {
        Self {
            p1_fill: 0,
            p2_fill: 0,
            stalled: true,
        }
    }
}

/// In-memory frame source driven by a timestamp-keyed script.
///
/// Renders synthetic gauge pixels (filled columns from the left) so the
/// sampler, classifier, and estimator all run for real in tests.
pub struct ScriptedFrameSource {
    width: u32,
    height: u32,
    duration_ms: TimestampMs,
    /// Sorted `(timestamp_ms, frame)` entries; a frame holds until the next.
    script: Vec<(TimestampMs, ScriptedFrame)>,
    current: Option<ScriptedFrame>,
}

const FILL_RGBA: [u8; 4] = [0, 200, 0, 255];
const EMPTY_RGBA: [u8; 4] = [18, 18, 18, 255];

impl ScriptedFrameSource {
    /// Build a 1920x1080 source over the given script.
    pub fn new(duration_ms: TimestampMs, mut script: Vec<(TimestampMs, ScriptedFrame)>) -> Self {
        script.sort_by_key(|(ts, _)| *ts);
        Self {
            width: 1920,
            height: 1080,
            duration_ms,
            script,
            current: None,
        }
    }

    /// A source whose gauges hold one state for the whole duration.
    pub fn constant(duration_ms: TimestampMs, p1_fill: u8, p2_fill: u8) -> Self {
        Self::new(duration_ms, vec![(0, ScriptedFrame::fill(p1_fill, p2_fill))])
    }

    fn frame_at(&self, timestamp_ms: TimestampMs) -> ScriptedFrame {
        self.script
            .iter()
            .rev()
            .find(|(ts, _)| *ts <= timestamp_ms)
            .or_else(|| self.script.first())
            .map(|(_, frame)| *frame)
            .unwrap_or(ScriptedFrame::fill(0, 0))
    }
}

#[async_trait]
impl FrameSource for ScriptedFrameSource {
    fn duration_ms(&self) -> TimestampMs {
        self.duration_ms
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    async fn seek(&mut self, timestamp_ms: TimestampMs) -> RoundscopeResult<SeekStatus> {
        let frame = self.frame_at(timestamp_ms);
        if frame.stalled {
            self.current = None;
            return Ok(SeekStatus::TimedOut);
        }
        self.current = Some(frame);
        Ok(SeekStatus::Ready)
    }

    fn capture_region(&self, rect: &BarRect) -> RoundscopeResult<PixelRegion> {
        let frame = self
            .current
            .ok_or_else(|| RoundscopeError::source("No frame is ready"))?;

        let width = rect.width();
        let height = rect.height();
        if width == 0 || height == 0 {
            return Ok(PixelRegion::empty());
        }

        // The left half of the frame is player 1's bar.
        let fill = if rect.x1 < (self.width / 2) as i32 {
            frame.p1_fill
        } else {
            frame.p2_fill
        };
        let filled_columns = (width as f64 * fill as f64 / 100.0).round() as u32;

        let mut region = PixelRegion::solid(width, height, EMPTY_RGBA);
        for x in 0..filled_columns.min(width) {
            for y in 0..height {
                region.set_rgba(x, y, FILL_RGBA);
            }
        }
        Ok(region)
    }
}
