//! Position engine
//!
//! Maps calendar intervals to horizontal pixel geometry inside a timeline
//! window. All offsets are computed against the unscaled container width and
//! multiplied by the zoom level exactly once, so nested rows (sprint, story,
//! task) always line up.
//!
//! ```text
//! pixels_per_day = W / total_days
//! start_offset   = max(0, start − window_start)
//! end_offset     = min(total_days, start_offset + (end − start + 1))
//! left           = start_offset × pixels_per_day
//! width          = max(1 day, end_offset − start_offset) × pixels_per_day
//! ```
//!
//! Callers only pass intervals overlapping the window.

use chrono::NaiveDate;
use roadmap_core::{days_between, TimelineWindow};
use serde::{Deserialize, Serialize};

/// Horizontal placement of a bar, in pixels from the timeline's left edge
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BarGeometry {
    pub left: f64,
    pub width: f64,
}

impl BarGeometry {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Multiply both offsets by `factor`
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            left: self.left * factor,
            width: self.width * factor,
        }
    }
}

/// Position of the "today" line
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayMarker {
    pub date: NaiveDate,
    /// Offset from the window start as a percentage of the window
    pub offset_percent: f64,
    /// Offset in (zoomed) pixels
    pub offset_px: f64,
}

/// Place `[item_start, item_end]` inside `window` for a container `container_width`
/// pixels wide, without zoom.
///
/// The item's full duration is laid from its clamped start offset and cut at
/// the window's right edge. An item ending before it starts is placed as a
/// single day at its start. Bars are never narrower than one day.
pub fn bar_position(
    window: &TimelineWindow,
    container_width: f64,
    item_start: NaiveDate,
    item_end: NaiveDate,
) -> BarGeometry {
    let total_days = window.total_days.max(1);
    let px_per_day = sanitize_width(container_width) / total_days as f64;

    let start_offset = days_between(window.start_date, item_start).max(0);
    let duration = days_between(item_start, item_end) + 1;
    let end_offset = (start_offset + duration).min(total_days).max(start_offset);

    BarGeometry {
        left: start_offset as f64 * px_per_day,
        width: ((end_offset - start_offset) as f64 * px_per_day).max(px_per_day),
    }
}

/// Zoom-aware positioning context for one recompute pass
#[derive(Clone, Copy, Debug)]
pub struct PositionEngine<'w> {
    window: &'w TimelineWindow,
    container_width: f64,
    zoom: f64,
}

impl<'w> PositionEngine<'w> {
    /// `container_width` is the unscaled pixel width available to the
    /// timeline; non-finite or negative widths count as zero.
    pub fn new(window: &'w TimelineWindow, container_width: f64, zoom: f64) -> Self {
        Self {
            window,
            container_width: sanitize_width(container_width),
            zoom: if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 },
        }
    }

    pub fn window(&self) -> &TimelineWindow {
        self.window
    }

    /// Days in the window, never less than one
    pub fn total_days(&self) -> i64 {
        self.window.total_days.max(1)
    }

    /// Unscaled container width
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Unscaled day width
    pub fn pixels_per_day(&self) -> f64 {
        self.container_width / self.total_days() as f64
    }

    /// Day width after zoom
    pub fn day_width(&self) -> f64 {
        self.pixels_per_day() * self.zoom
    }

    /// Width of the whole timeline after zoom
    pub fn timeline_width(&self) -> f64 {
        self.container_width * self.zoom
    }

    /// Zoomed geometry of an interval
    pub fn place(&self, start: NaiveDate, end: NaiveDate) -> BarGeometry {
        bar_position(self.window, self.container_width, start, end).scaled(self.zoom)
    }

    /// The today line, present only when `today` lies inside the window
    pub fn today_marker(&self, today: NaiveDate) -> Option<TodayMarker> {
        if !self.window.contains(today) {
            return None;
        }
        let offset_percent =
            days_between(self.window.start_date, today) as f64 / self.total_days() as f64 * 100.0;
        Some(TodayMarker {
            date: today,
            offset_percent,
            offset_px: offset_percent / 100.0 * self.timeline_width(),
        })
    }
}

fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}
