//! Bar percentage estimation.
//!
//! A gauge region is partitioned into vertical columns, one per horizontal
//! pixel, and each column votes on whether it is filled. The column rule
//! tolerates anti-aliased edges and thin overlay glyphs that corrupt a few
//! rows without flipping a whole column.

use serde::{Deserialize, Serialize};

use crate::classify::{ClassifierConfig, PixelClassifier};

/// A tightly packed RGBA pixel buffer for one captured region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl PixelRegion {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            data,
        }
    }

    /// A zero-area region, the capture result for a degenerate rectangle.
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            data: Vec::new(),
        }
    }

    /// Fill a whole region with one RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// RGB components of the pixel at `(x, y)`.
    pub fn rgb_at(&self, x: u32, y: u32) -> (u8, u8, u8) {
        let idx = ((y * self.width + x) * 4) as usize;
        (self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Overwrite the pixel at `(x, y)` (test fixtures).
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }
}

/// One estimated gauge measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GaugeReading {
    /// Filled-health percentage, 0-100.
    pub health: u8,

    /// Pending-damage (red overlay) percentage, 0-100.
    pub pending: u8,
}

/// Thresholds for the column-majority estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaugeConfig {
    /// Fraction of a column's height that must classify positive for the
    /// column to count.
    pub column_fill_ratio: f64,

    pub classifier: ClassifierConfig,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            column_fill_ratio: 0.2,
            classifier: ClassifierConfig::default(),
        }
    }
}

/// The bar percentage estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GaugeEstimator {
    config: GaugeConfig,
    classifier: PixelClassifier,
}

impl GaugeEstimator {
    pub fn new(config: GaugeConfig) -> Self {
        Self {
            config,
            classifier: PixelClassifier::new(config.classifier),
        }
    }

    /// Estimate the gauge percentages for one captured region.
    ///
    /// Columns are scanned left to right for both players' bars; an
    /// opposite-drain second bar is not modeled. Degenerate regions yield
    /// zero without error.
    pub fn estimate(&self, region: &PixelRegion) -> GaugeReading {
        if region.width == 0 || region.height == 0 {
            return GaugeReading::default();
        }

        let fill_threshold = region.height as f64 * self.config.column_fill_ratio;

        let mut health_columns = 0u32;
        let mut pending_columns = 0u32;
        for x in 0..region.width {
            let mut health_rows = 0u32;
            let mut pending_rows = 0u32;
            for y in 0..region.height {
                let (r, g, b) = region.rgb_at(x, y);
                if self.classifier.is_health(r, g, b) {
                    health_rows += 1;
                } else if self.classifier.is_pending(r, g, b) {
                    pending_rows += 1;
                }
            }
            if health_rows as f64 > fill_threshold {
                health_columns += 1;
            }
            if pending_rows as f64 > fill_threshold {
                pending_columns += 1;
            }
        }

        GaugeReading {
            health: column_percent(health_columns, region.width),
            pending: column_percent(pending_columns, region.width),
        }
    }
}

fn column_percent(columns: u32, total: u32) -> u8 {
    (columns as f64 * 100.0 / total as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREEN: [u8; 4] = [0, 200, 0, 255];
    const RED: [u8; 4] = [220, 20, 20, 255];
    const DARK: [u8; 4] = [20, 20, 20, 255];

    /// A bar whose left `filled` columns are `fill` and the rest `rest`.
    fn bar(width: u32, height: u32, filled: u32, fill: [u8; 4], rest: [u8; 4]) -> PixelRegion {
        let mut region = PixelRegion::solid(width, height, rest);
        for x in 0..filled {
            for y in 0..height {
                region.set_rgba(x, y, fill);
            }
        }
        region
    }

    #[test]
    fn test_full_bar_reads_100() {
        let estimator = GaugeEstimator::default();
        let reading = estimator.estimate(&PixelRegion::solid(100, 10, GREEN));
        assert_eq!(reading.health, 100);
        assert_eq!(reading.pending, 0);
    }

    #[test]
    fn test_empty_bar_reads_0() {
        let estimator = GaugeEstimator::default();
        let reading = estimator.estimate(&PixelRegion::solid(100, 10, DARK));
        assert_eq!(reading.health, 0);
    }

    #[test]
    fn test_partial_fill_percentage() {
        let estimator = GaugeEstimator::default();
        let reading = estimator.estimate(&bar(100, 10, 60, GREEN, DARK));
        assert_eq!(reading.health, 60);
    }

    #[test]
    fn test_pending_overlay_measured_separately() {
        // 50 columns health, 30 columns red overlay, 20 dark.
        let mut region = bar(100, 10, 50, GREEN, DARK);
        for x in 50..80 {
            for y in 0..10 {
                region.set_rgba(x, y, RED);
            }
        }
        let reading = GaugeEstimator::default().estimate(&region);
        assert_eq!(reading.health, 50);
        assert_eq!(reading.pending, 30);
    }

    #[test]
    fn test_degenerate_region_yields_zero() {
        let estimator = GaugeEstimator::default();
        assert_eq!(estimator.estimate(&PixelRegion::empty()), GaugeReading::default());
    }

    #[test]
    fn test_thin_glyph_rows_do_not_flip_columns() {
        // Two of ten rows corrupted by a dark overlay glyph: 20% exactly,
        // which does not exceed the 20% rule for the glyph, and the
        // remaining 80% health rows keep the column filled.
        let mut region = PixelRegion::solid(100, 10, GREEN);
        for x in 0..100 {
            region.set_rgba(x, 4, DARK);
            region.set_rgba(x, 5, DARK);
        }
        let reading = GaugeEstimator::default().estimate(&region);
        assert_eq!(reading.health, 100);
    }

    #[test]
    fn test_column_needs_more_than_ratio() {
        // Exactly 20% health rows is not enough; the rule is strict.
        let mut region = PixelRegion::solid(10, 10, DARK);
        for x in 0..10 {
            region.set_rgba(x, 0, GREEN);
            region.set_rgba(x, 1, GREEN);
        }
        let reading = GaugeEstimator::default().estimate(&region);
        assert_eq!(reading.health, 0);

        // One more row tips every column over.
        for x in 0..10 {
            region.set_rgba(x, 2, GREEN);
        }
        let reading = GaugeEstimator::default().estimate(&region);
        assert_eq!(reading.health, 100);
    }

    #[test]
    fn test_rounding_to_nearest_percent() {
        // 1 of 3 columns filled: 33.3% rounds to 33.
        let region = bar(3, 10, 1, GREEN, DARK);
        assert_eq!(GaugeEstimator::default().estimate(&region).health, 33);
        // 2 of 3: 66.7% rounds to 67.
        let region = bar(3, 10, 2, GREEN, DARK);
        assert_eq!(GaugeEstimator::default().estimate(&region).health, 67);
    }
}
