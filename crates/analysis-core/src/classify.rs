//! Pixel classification for gauge fill.
//!
//! Filled-health colors vary by character palette and lighting (gold, green,
//! yellow, blue...) and are not enumerable, but the two "not filled" colors
//! are visually stable: the dark empty background and the red pending-damage
//! overlay. So classification works by exclusion: a pixel is health unless
//! it matches one of those two ranges. Every pixel yields a boolean; there
//! is no error path.

use serde::{Deserialize, Serialize};

/// HSV triple on the 8-bit OpenCV scale: H in `[0, 180)`, S and V in
/// `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

/// Convert an RGB pixel to HSV on the 8-bit scale.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64;
    let g = g as f64;
    let b = b as f64;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h_deg = if delta == 0.0 {
        0.0
    } else if max == r {
        let mut h = 60.0 * (g - b) / delta;
        if h < 0.0 {
            h += 360.0;
        }
        h
    } else if max == g {
        60.0 * (b - r) / delta + 120.0
    } else {
        60.0 * (r - g) / delta + 240.0
    };

    let s = if max == 0.0 {
        0.0
    } else {
        delta / max * 255.0
    };

    Hsv {
        // Half-degree hue keeps the full circle inside a byte.
        h: ((h_deg / 2.0).round() as u16 % 180) as u8,
        s: s.round() as u8,
        v: max.round() as u8,
    }
}

/// Exclusion thresholds for the two "not filled" ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// V below this is empty background, regardless of hue.
    pub background_value_max: u8,

    /// Width of the red hue band on each side of the 0/180 wraparound.
    pub red_hue_band: u8,

    /// Minimum saturation for the red pending-damage match.
    pub red_saturation_min: u8,

    /// Minimum value for the red pending-damage match; darker reds fall
    /// into the background range instead.
    pub red_value_min: u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            background_value_max: 60,
            red_hue_band: 10,
            red_saturation_min: 100,
            red_value_min: 50,
        }
    }
}

/// The negative-space gauge pixel classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelClassifier {
    config: ClassifierConfig,
}

impl PixelClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Whether the pixel is empty gauge background.
    pub fn is_background(&self, r: u8, g: u8, b: u8) -> bool {
        rgb_to_hsv(r, g, b).v < self.config.background_value_max
    }

    /// Whether the pixel is the red pending-damage overlay.
    ///
    /// Red straddles the hue wraparound, so both ends of the scale match.
    pub fn is_pending(&self, r: u8, g: u8, b: u8) -> bool {
        let hsv = rgb_to_hsv(r, g, b);
        let red_hue =
            hsv.h <= self.config.red_hue_band || hsv.h >= 180 - self.config.red_hue_band;
        red_hue && hsv.s >= self.config.red_saturation_min && hsv.v >= self.config.red_value_min
    }

    /// Whether the pixel counts as filled health: anything outside the two
    /// exclusion ranges.
    pub fn is_health(&self, r: u8, g: u8, b: u8) -> bool {
        !self.is_background(r, g, b) && !self.is_pending(r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), Hsv { h: 0, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv(0, 255, 0), Hsv { h: 60, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv(0, 0, 255), Hsv { h: 120, s: 255, v: 255 });
        assert_eq!(rgb_to_hsv(0, 0, 0), Hsv { h: 0, s: 0, v: 0 });
        assert_eq!(rgb_to_hsv(255, 255, 255), Hsv { h: 0, s: 0, v: 255 });
    }

    #[test]
    fn test_hsv_gold() {
        let hsv = rgb_to_hsv(255, 215, 0);
        assert_eq!(hsv.h, 25);
        assert_eq!(hsv.s, 255);
        assert_eq!(hsv.v, 255);
    }

    #[test]
    fn test_black_is_not_health() {
        let classifier = PixelClassifier::default();
        assert!(classifier.is_background(0, 0, 0));
        assert!(!classifier.is_health(0, 0, 0));
    }

    #[test]
    fn test_red_is_not_health() {
        let classifier = PixelClassifier::default();
        assert!(classifier.is_pending(255, 0, 0));
        assert!(!classifier.is_health(255, 0, 0));
    }

    #[test]
    fn test_fill_colors_are_health() {
        let classifier = PixelClassifier::default();
        assert!(classifier.is_health(0, 255, 0)); // green
        assert!(classifier.is_health(255, 215, 0)); // gold
        assert!(classifier.is_health(200, 200, 60)); // yellow
        assert!(classifier.is_health(80, 120, 255)); // blue
    }

    #[test]
    fn test_red_wraps_around_hue_scale() {
        let classifier = PixelClassifier::default();
        // Slightly blue-shifted red lands near H=180, the other side of the
        // wraparound.
        let hsv = rgb_to_hsv(255, 0, 30);
        assert!(hsv.h >= 170);
        assert!(classifier.is_pending(255, 0, 30));
        assert!(!classifier.is_health(255, 0, 30));
    }

    #[test]
    fn test_dark_red_is_background_not_pending() {
        let classifier = PixelClassifier::default();
        // V below the red floor and below the background ceiling.
        assert!(!classifier.is_pending(45, 0, 0));
        assert!(classifier.is_background(45, 0, 0));
        assert!(!classifier.is_health(45, 0, 0));
    }

    #[test]
    fn test_desaturated_red_is_health() {
        let classifier = PixelClassifier::default();
        // Red hue but washed out below the saturation floor: a hit-spark
        // highlight, not the pending overlay.
        let hsv = rgb_to_hsv(220, 160, 160);
        assert!(hsv.s < 100);
        assert!(classifier.is_health(220, 160, 160));
    }

    #[test]
    fn test_every_pixel_classifies() {
        // Coarse sweep; the classifier must partition, never reject.
        let classifier = PixelClassifier::default();
        let levels = [0u8, 51, 102, 153, 204, 255];
        for &r in &levels {
            for &g in &levels {
                for &b in &levels {
                    let health = classifier.is_health(r, g, b);
                    let excluded =
                        classifier.is_background(r, g, b) || classifier.is_pending(r, g, b);
                    assert_eq!(health, !excluded);
                }
            }
        }
    }
}
