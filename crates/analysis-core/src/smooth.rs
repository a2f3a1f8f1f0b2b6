//! Reading stream smoothing.
//!
//! One-frame misclassification spikes (HUD flicker, hit-effect particles,
//! overlay glyphs) show up as isolated jumps in the raw readings. A centered
//! moving average suppresses them while bounding added latency to about two
//! sample intervals on each side.

use serde::{Deserialize, Serialize};

use roundscope_match_model::HealthReading;

/// Smoothing window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Total window size, centered on each sample; truncated at the ends of
    /// the series. The default of 5 averages `[i-2, i+2]`.
    pub window: usize,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}

/// Centered moving-average smoother for the two health channels.
///
/// Pure and deterministic: depends only on the full input slice, and a
/// constant series is a fixed point. Timestamps and pending values pass
/// through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadingSmoother {
    config: SmootherConfig,
}

impl ReadingSmoother {
    pub fn new(config: SmootherConfig) -> Self {
        Self { config }
    }

    pub fn smooth(&self, readings: &[HealthReading]) -> Vec<HealthReading> {
        if readings.is_empty() || self.config.window <= 1 {
            return readings.to_vec();
        }

        let half = self.config.window / 2;
        let n = readings.len();
        let mut smoothed = Vec::with_capacity(n);

        for i in 0..n {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let count = (end - start) as f64;

            let sum_p1: u32 = readings[start..end].iter().map(|r| r.p1_health as u32).sum();
            let sum_p2: u32 = readings[start..end].iter().map(|r| r.p2_health as u32).sum();

            let mut reading = readings[i];
            reading.p1_health = (sum_p1 as f64 / count).round() as u8;
            reading.p2_health = (sum_p2 as f64 / count).round() as u8;
            smoothed.push(reading);
        }

        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn series(values: &[(u8, u8)]) -> Vec<HealthReading> {
        values
            .iter()
            .enumerate()
            .map(|(i, &(p1, p2))| HealthReading::new(i as u64 * 100, p1, p2))
            .collect()
    }

    #[test]
    fn test_constant_series_is_fixed_point() {
        let readings = series(&[(70, 70); 8]);
        let smoothed = ReadingSmoother::default().smooth(&readings);
        assert_eq!(smoothed, readings);
    }

    #[test]
    fn test_step_edge_values() {
        let readings = series(&[(100, 50), (100, 50), (100, 50), (70, 50), (70, 50), (70, 50)]);
        let smoothed = ReadingSmoother::default().smooth(&readings);
        let p1: Vec<u8> = smoothed.iter().map(|r| r.p1_health).collect();
        assert_eq!(p1, vec![100, 93, 88, 82, 78, 70]);
        // The untouched channel stays constant.
        assert!(smoothed.iter().all(|r| r.p2_health == 50));
    }

    #[test]
    fn test_isolated_spike_suppressed() {
        let readings = series(&[
            (80, 80),
            (80, 80),
            (80, 80),
            (0, 80),
            (80, 80),
            (80, 80),
            (80, 80),
        ]);
        let smoothed = ReadingSmoother::default().smooth(&readings);
        // The one-frame dropout never reads as a real 80-point drop.
        assert!(smoothed.iter().all(|r| r.p1_health >= 60));
        assert_eq!(smoothed[3].p1_health, 64);
    }

    #[test]
    fn test_timestamps_and_pending_pass_through() {
        let readings = vec![
            HealthReading::with_pending(0, 100, 5, 100, 0),
            HealthReading::with_pending(130, 90, 10, 100, 0),
            HealthReading::with_pending(400, 80, 0, 100, 0),
        ];
        let smoothed = ReadingSmoother::default().smooth(&readings);
        for (raw, out) in readings.iter().zip(&smoothed) {
            assert_eq!(out.timestamp_ms, raw.timestamp_ms);
            assert_eq!(out.p1_pending, raw.p1_pending);
            assert_eq!(out.p2_pending, raw.p2_pending);
        }
    }

    #[test]
    fn test_window_of_one_is_identity() {
        let readings = series(&[(100, 0), (0, 100), (100, 0)]);
        let smoother = ReadingSmoother::new(SmootherConfig { window: 1 });
        assert_eq!(smoother.smooth(&readings), readings);
    }

    #[test]
    fn test_empty_input() {
        assert!(ReadingSmoother::default().smooth(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_output_bounded_by_input_extremes(
            values in prop::collection::vec((0u8..=100, 0u8..=100), 1..64)
        ) {
            let readings = series(&values);
            let smoothed = ReadingSmoother::default().smooth(&readings);
            prop_assert_eq!(smoothed.len(), readings.len());

            let min_p1 = values.iter().map(|v| v.0).min().unwrap();
            let max_p1 = values.iter().map(|v| v.0).max().unwrap();
            for r in &smoothed {
                prop_assert!(r.p1_health >= min_p1 && r.p1_health <= max_p1);
                prop_assert!(r.p2_health <= 100);
            }
        }

        #[test]
        fn prop_idempotent_on_constant(value in 0u8..=100, len in 1usize..32) {
            let readings = series(&vec![(value, value); len]);
            let smoothed = ReadingSmoother::default().smooth(&readings);
            prop_assert_eq!(smoothed, readings);
        }
    }
}
