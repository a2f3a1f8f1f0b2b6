//! The gauge sampler: a cooperative seek loop over a frame source.
//!
//! One seek is in flight at a time. Each tick seeks, captures both bar
//! regions, estimates, appends a reading, and yields to the scheduler before
//! the next tick. A per-seek watchdog bounds wall-clock time on stalled or
//! unseekable frames: expiry skips that timestamp with no retry.

use std::time::Duration;

use roundscope_analysis_core::gauge::{GaugeConfig, GaugeEstimator};
use roundscope_common::error::RoundscopeResult;
use roundscope_common::timecode::{TickRange, TimestampMs};
use roundscope_match_model::geometry::{DEFAULT_P1_BAR, DEFAULT_P2_BAR};
use roundscope_match_model::{BarRect, HealthReading};

use crate::source::{FrameSource, SeekStatus};

/// Progress callback, called with an integer percent as sampling advances.
pub type ProgressFn = Box<dyn FnMut(u8) + Send>;

/// Configuration for one sampler run.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Sampling cadence in milliseconds.
    pub interval_ms: u64,

    /// Per-seek watchdog in milliseconds; expiry skips the tick.
    pub seek_timeout_ms: u64,

    /// Explicit `[start, end)` window in milliseconds. When set, sampling
    /// begins exactly at start with no discard phase; otherwise the match-
    /// start detector free-runs from t=0.
    pub window: Option<(TimestampMs, TimestampMs)>,

    /// Bar regions in 1920x1080 reference space.
    pub p1_bar: BarRect,
    pub p2_bar: BarRect,

    pub gauge: GaugeConfig,

    /// Match-start detector: both bars must read above this percent for
    /// sampling to begin recording.
    pub start_min_health: u8,

    /// Match-start detector: give up discarding after this many frames.
    pub start_max_discard: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_ms: 100,
            seek_timeout_ms: 2000,
            window: None,
            p1_bar: DEFAULT_P1_BAR,
            p2_bar: DEFAULT_P2_BAR,
            gauge: GaugeConfig::default(),
            start_min_health: 30,
            start_max_discard: 50,
        }
    }
}

/// State of a sampler run. One in-flight operation at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerState {
    /// Run not started.
    Idle,
    /// A seek is outstanding.
    Seeking,
    /// The readied frame is being measured.
    Sampling,
    /// Run completed.
    Done,
    /// Terminal media error.
    Failed,
}

/// Counters from a sampler run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplerStats {
    /// Readings recorded.
    pub sampled: u64,

    /// Pre-match frames discarded by the start detector.
    pub discarded: u64,

    /// Ticks skipped by the seek watchdog.
    pub skipped: u64,
}

/// Drives a [`FrameSource`] across a tick grid and assembles the raw
/// reading stream.
pub struct FrameSampler {
    config: SamplerConfig,
    state: SamplerState,
    stats: SamplerStats,
}

impl FrameSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            state: SamplerState::Idle,
            stats: SamplerStats::default(),
        }
    }

    pub fn state(&self) -> SamplerState {
        self.state
    }

    pub fn stats(&self) -> SamplerStats {
        self.stats
    }

    /// Run the sampler to completion over `source`.
    ///
    /// Returns the raw reading stream. Individual seek stalls are skipped;
    /// a source error is terminal and fails the run.
    pub async fn run(
        &mut self,
        source: &mut dyn FrameSource,
        mut progress: Option<ProgressFn>,
    ) -> RoundscopeResult<Vec<HealthReading>> {
        let duration_ms = source.duration_ms();
        let range = match self.config.window {
            Some((start, end)) => TickRange::new(start, end.min(duration_ms), self.config.interval_ms),
            None => TickRange::full(duration_ms, self.config.interval_ms),
        };

        let (frame_width, frame_height) = source.dimensions();
        let p1_rect = self
            .config
            .p1_bar
            .scaled_to(frame_width, frame_height)
            .clipped_to(frame_width, frame_height);
        let p2_rect = self
            .config
            .p2_bar
            .scaled_to(frame_width, frame_height)
            .clipped_to(frame_width, frame_height);

        let estimator = GaugeEstimator::new(self.config.gauge);
        let watchdog = Duration::from_millis(self.config.seek_timeout_ms);

        // With an explicit window the caller's detection step already found
        // the match; recording starts immediately.
        let mut started = self.config.window.is_some();
        let mut discarded: u32 = 0;

        let mut readings = Vec::with_capacity(range.len());
        let mut last_percent = u8::MAX;

        tracing::info!(
            start_ms = range.start_ms(),
            end_ms = range.end_ms(),
            interval_ms = range.interval_ms(),
            "Sampling gauge readings"
        );

        for tick_ms in range.ticks() {
            self.state = SamplerState::Seeking;
            let seeked = match tokio::time::timeout(watchdog, source.seek(tick_ms)).await {
                Ok(Ok(SeekStatus::Ready)) => true,
                Ok(Ok(SeekStatus::TimedOut)) => {
                    tracing::warn!(timestamp_ms = tick_ms, "Seek stalled; skipping frame");
                    self.stats.skipped += 1;
                    false
                }
                Ok(Err(e)) => {
                    self.state = SamplerState::Failed;
                    return Err(e);
                }
                Err(_) => {
                    tracing::warn!(
                        timestamp_ms = tick_ms,
                        "Seek watchdog expired; skipping frame"
                    );
                    self.stats.skipped += 1;
                    false
                }
            };

            if seeked {
                self.state = SamplerState::Sampling;
                let p1_region = match source.capture_region(&p1_rect) {
                    Ok(region) => region,
                    Err(e) => {
                        self.state = SamplerState::Failed;
                        return Err(e);
                    }
                };
                let p2_region = match source.capture_region(&p2_rect) {
                    Ok(region) => region,
                    Err(e) => {
                        self.state = SamplerState::Failed;
                        return Err(e);
                    }
                };
                let p1 = estimator.estimate(&p1_region);
                let p2 = estimator.estimate(&p2_region);

                let mut record = started;
                if !started {
                    if p1.health > self.config.start_min_health
                        && p2.health > self.config.start_min_health
                    {
                        // The triggering reading is the first trustworthy
                        // sample, so it is recorded, not discarded.
                        started = true;
                        record = true;
                        tracing::info!(timestamp_ms = tick_ms, "Match start detected");
                    } else {
                        discarded += 1;
                        self.stats.discarded += 1;
                        if discarded >= self.config.start_max_discard {
                            started = true;
                            tracing::info!(
                                discarded,
                                "Start detector budget exhausted; recording from next tick"
                            );
                        }
                    }
                }

                if record {
                    readings.push(HealthReading::with_pending(
                        tick_ms, p1.health, p1.pending, p2.health, p2.pending,
                    ));
                    self.stats.sampled += 1;
                }
            }

            let percent = range.progress_percent(tick_ms.saturating_add(range.interval_ms()));
            if percent != last_percent {
                last_percent = percent;
                tracing::debug!(percent, "Sampling progress");
                if let Some(cb) = progress.as_mut() {
                    cb(percent);
                }
            }

            // One tick per scheduler turn keeps the host responsive.
            tokio::task::yield_now().await;
        }

        self.state = SamplerState::Done;
        tracing::info!(
            sampled = self.stats.sampled,
            discarded = self.stats.discarded,
            skipped = self.stats.skipped,
            "Sampling complete"
        );
        Ok(readings)
    }
}

impl Default for FrameSampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}
