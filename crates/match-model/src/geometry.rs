//! Bar rectangle geometry.
//!
//! Bar coordinates are authored against a 1920x1080 reference frame and
//! scaled to the actual frame size before any pixels are read.

use serde::{Deserialize, Serialize};

use roundscope_common::RoundscopeError;

/// Reference frame width the bar coordinates are authored against.
pub const REFERENCE_WIDTH: u32 = 1920;

/// Reference frame height the bar coordinates are authored against.
pub const REFERENCE_HEIGHT: u32 = 1080;

/// A health-bar rectangle in pixel space.
///
/// `(x1, y1)` is the top-left corner, `(x2, y2)` the bottom-right, both in
/// reference-frame pixels until [`BarRect::scaled_to`] maps them onto an
/// actual frame. The bounds trim the bar frame's dark border so only gauge
/// fill is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

/// Default player-1 bar region (1920x1080 reference).
pub const DEFAULT_P1_BAR: BarRect = BarRect {
    x1: 160,
    y1: 95,
    x2: 892,
    y2: 113,
};

/// Default player-2 bar region (1920x1080 reference).
pub const DEFAULT_P2_BAR: BarRect = BarRect {
    x1: 1035,
    y1: 95,
    x2: 1768,
    y2: 113,
};

impl BarRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width in pixels; zero when the bounds are inverted or collapsed.
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    /// Height in pixels; zero when the bounds are inverted or collapsed.
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    /// A rectangle with no sampleable area. Estimation yields 0, not an error.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Scale reference-frame coordinates onto an actual frame size.
    pub fn scaled_to(&self, frame_width: u32, frame_height: u32) -> BarRect {
        let sx = frame_width as f64 / REFERENCE_WIDTH as f64;
        let sy = frame_height as f64 / REFERENCE_HEIGHT as f64;
        BarRect {
            x1: (self.x1 as f64 * sx) as i32,
            y1: (self.y1 as f64 * sy) as i32,
            x2: (self.x2 as f64 * sx) as i32,
            y2: (self.y2 as f64 * sy) as i32,
        }
    }

    /// Clip to `[0, width) x [0, height)` frame bounds.
    pub fn clipped_to(&self, frame_width: u32, frame_height: u32) -> BarRect {
        BarRect {
            x1: self.x1.clamp(0, frame_width as i32),
            y1: self.y1.clamp(0, frame_height as i32),
            x2: self.x2.clamp(0, frame_width as i32),
            y2: self.y2.clamp(0, frame_height as i32),
        }
    }
}

impl std::str::FromStr for BarRect {
    type Err = RoundscopeError;

    /// Parse the `x1,y1,x2,y2` form used by the CLI bar overrides.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(RoundscopeError::config(format!(
                "Bar coordinates must be x1,y1,x2,y2: {s}"
            )));
        }
        let mut values = [0i32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.parse().map_err(|_| {
                RoundscopeError::config(format!("Bar coordinate is not an integer: {part}"))
            })?;
        }
        Ok(BarRect::new(values[0], values[1], values[2], values[3]))
    }
}

impl std::fmt::Display for BarRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}
