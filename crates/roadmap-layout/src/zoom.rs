//! Zoom controller

use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 2.5;
pub const ZOOM_STEP: f64 = 0.25;
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Bounded multiplicative scale applied to the whole timeline.
///
/// Steps clamp silently at the bounds. The level is independent of the
/// window and granularity: navigating or switching granularity keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct ZoomController {
    level: f64,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            level: DEFAULT_ZOOM,
        }
    }
}

impl ZoomController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller at `level`, clamped into range
    pub fn with_level(level: f64) -> Self {
        let mut zoom = Self::default();
        zoom.set(level);
        zoom
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn zoom_in(&mut self) -> f64 {
        self.set(self.level + ZOOM_STEP)
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.set(self.level - ZOOM_STEP)
    }

    pub fn reset(&mut self) -> f64 {
        self.level = DEFAULT_ZOOM;
        self.level
    }

    /// Set an arbitrary level. NaN resets to the default.
    pub fn set(&mut self, level: f64) -> f64 {
        self.level = if level.is_nan() {
            DEFAULT_ZOOM
        } else {
            level.clamp(MIN_ZOOM, MAX_ZOOM)
        };
        self.level
    }

    pub fn can_zoom_in(&self) -> bool {
        self.level < MAX_ZOOM
    }

    pub fn can_zoom_out(&self) -> bool {
        self.level > MIN_ZOOM
    }
}

impl From<f64> for ZoomController {
    fn from(level: f64) -> Self {
        Self::with_level(level)
    }
}

impl From<ZoomController> for f64 {
    fn from(zoom: ZoomController) -> Self {
        zoom.level
    }
}
