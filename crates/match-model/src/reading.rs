//! Timestamped health readings and the raw-timeline CSV layout.
//!
//! A reading is one sampled instant of both players' gauges, before any
//! smoothing. Two producers emit them: the frame sampler at a fixed
//! cadence, and CSV ingestion at whatever cadence the file provides. Both
//! feed the same smoother/extractor unmodified.

use serde::{Deserialize, Serialize};

use roundscope_common::timecode::{format_time_label, TimestampMs};

/// One sampled instant of both health gauges.
///
/// Health and pending values are percentages clamped to `[0, 100]`. The
/// pending channels carry the red not-yet-committed damage overlay; they
/// round-trip through serialization but play no part in smoothing or event
/// extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReading {
    pub timestamp_ms: TimestampMs,
    pub p1_health: u8,
    pub p1_pending: u8,
    pub p2_health: u8,
    pub p2_pending: u8,
}

impl HealthReading {
    /// A reading with no pending damage.
    pub fn new(timestamp_ms: TimestampMs, p1_health: u8, p2_health: u8) -> Self {
        Self {
            timestamp_ms,
            p1_health: p1_health.min(100),
            p1_pending: 0,
            p2_health: p2_health.min(100),
            p2_pending: 0,
        }
    }

    pub fn with_pending(
        timestamp_ms: TimestampMs,
        p1_health: u8,
        p1_pending: u8,
        p2_health: u8,
        p2_pending: u8,
    ) -> Self {
        Self {
            timestamp_ms,
            p1_health: p1_health.min(100),
            p1_pending: p1_pending.min(100),
            p2_health: p2_health.min(100),
            p2_pending: p2_pending.min(100),
        }
    }

    /// Human-readable `seconds.tenths` label.
    pub fn time_label(&self) -> String {
        format_time_label(self.timestamp_ms)
    }

    pub fn timestamp_secs(&self) -> f64 {
        self.timestamp_ms as f64 / 1000.0
    }
}

/// Clamp a raw percentage measurement into the `[0, 100]` integer range.
pub fn clamp_health(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Parse readings from CSV text in the layout
/// `timestamp_ms, p1_health, p1_pending, p2_health[, p2_pending, ...]`.
///
/// A header row is recognized by the token "timestamp" (case-insensitive)
/// anywhere in the first non-empty line. Malformed rows (non-numeric
/// timestamp, unparsable percentages, fewer than four columns) are skipped
/// without surfacing an error; zero valid rows yields an empty list, which
/// callers must treat as "no signal".
pub fn parse_readings(text: &str) -> Vec<HealthReading> {
    let mut readings = Vec::new();
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let Some(first) = lines.next() else {
        return readings;
    };
    if !first.to_ascii_lowercase().contains("timestamp") {
        if let Some(reading) = parse_row(first) {
            readings.push(reading);
        }
    }

    for line in lines {
        if let Some(reading) = parse_row(line) {
            readings.push(reading);
        }
    }

    readings
}

fn parse_row(line: &str) -> Option<HealthReading> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }

    let timestamp_ms: TimestampMs = fields[0].parse().ok()?;
    let p1_health: f64 = fields[1].parse().ok()?;
    let p1_pending: f64 = fields[2].parse().ok()?;
    let p2_health: f64 = fields[3].parse().ok()?;
    let p2_pending: f64 = fields
        .get(4)
        .and_then(|f| f.parse().ok())
        .unwrap_or(0.0);

    Some(HealthReading::with_pending(
        timestamp_ms,
        clamp_health(p1_health),
        clamp_health(p1_pending),
        clamp_health(p2_health),
        clamp_health(p2_pending),
    ))
}

/// Serialize readings to the same CSV layout `parse_readings` accepts.
pub fn serialize_readings(readings: &[HealthReading]) -> String {
    let mut output = String::from("timestamp_ms,p1_health,p1_pending,p2_health,p2_pending\n");
    for r in readings {
        output.push_str(&format!(
            "{},{},{},{},{}\n",
            r.timestamp_ms, r.p1_health, r.p1_pending, r.p2_health, r.p2_pending
        ));
    }
    output
}
