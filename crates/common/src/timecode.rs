//! Timecode utilities for the sampling grid.
//!
//! All readings are anchored to millisecond offsets from the start of the
//! media. This module provides:
//! - Conversions between milliseconds and seconds
//! - The human-readable time label used on exported timelines
//! - The fixed-cadence tick grid the frame sampler walks

/// Millisecond offset from the start of the media.
pub type TimestampMs = u64;

/// Convert a millisecond offset to fractional seconds.
pub fn ms_to_secs(ms: TimestampMs) -> f64 {
    ms as f64 / 1000.0
}

/// Convert fractional seconds to a millisecond offset.
pub fn secs_to_ms(secs: f64) -> TimestampMs {
    (secs * 1000.0).round().max(0.0) as TimestampMs
}

/// Format a millisecond offset as the `seconds.tenths` label carried on
/// exported timeline rows (e.g. 72_400 ms -> "72.4").
pub fn format_time_label(ms: TimestampMs) -> String {
    format!("{}.{}", ms / 1000, (ms % 1000) / 100)
}

/// A half-open `[start, end)` range walked at a fixed interval.
///
/// The frame sampler advances through this grid one tick at a time; progress
/// reporting divides by the range length, so an explicit analysis window and
/// a full-duration run report against their own denominators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRange {
    start_ms: TimestampMs,
    end_ms: TimestampMs,
    interval_ms: u64,
}

impl TickRange {
    /// Create a tick range over `[start_ms, end_ms)`.
    ///
    /// A zero interval is coerced to 1 ms so the grid always advances.
    pub fn new(start_ms: TimestampMs, end_ms: TimestampMs, interval_ms: u64) -> Self {
        Self {
            start_ms,
            end_ms: end_ms.max(start_ms),
            interval_ms: interval_ms.max(1),
        }
    }

    /// A range covering a full media duration from t=0.
    pub fn full(duration_ms: TimestampMs, interval_ms: u64) -> Self {
        Self::new(0, duration_ms, interval_ms)
    }

    pub fn start_ms(&self) -> TimestampMs {
        self.start_ms
    }

    pub fn end_ms(&self) -> TimestampMs {
        self.end_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Length of the range in milliseconds.
    pub fn span_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    /// Number of ticks in the grid.
    pub fn len(&self) -> usize {
        (self.span_ms().div_ceil(self.interval_ms)) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.span_ms() == 0
    }

    /// Iterate the tick timestamps.
    pub fn ticks(&self) -> impl Iterator<Item = TimestampMs> {
        let range = *self;
        (0..range.len() as u64).map(move |i| range.start_ms + i * range.interval_ms)
    }

    /// Integer percent of the range covered at `timestamp_ms`.
    pub fn progress_percent(&self, timestamp_ms: TimestampMs) -> u8 {
        if self.is_empty() {
            return 100;
        }
        let covered = timestamp_ms.saturating_sub(self.start_ms).min(self.span_ms());
        (covered * 100 / self.span_ms()) as u8
    }
}
