//! Responsive layout resolution
//!
//! Maps the live viewport width to a discrete layout profile and exposes the
//! per-granularity day-width bounds used for scroll sizing.

use roadmap_core::Granularity;
use serde::{Deserialize, Serialize};

/// Widths below this use the compact profile
pub const COMPACT_MAX_WIDTH: f64 = 640.0;

/// Widths below this (and at least `COMPACT_MAX_WIDTH`) use the medium profile
pub const MEDIUM_MAX_WIDTH: f64 = 1024.0;

/// Widths below this are presented as a card list instead of a Gantt grid
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Viewport size class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Compact,
    Medium,
    Wide,
}

impl Breakpoint {
    /// Size class of a viewport. A width exactly on a boundary belongs to the
    /// wider class; NaN and negative widths are compact.
    pub fn for_width(width: f64) -> Self {
        if width.is_nan() || width < COMPACT_MAX_WIDTH {
            Breakpoint::Compact
        } else if width < MEDIUM_MAX_WIDTH {
            Breakpoint::Medium
        } else {
            Breakpoint::Wide
        }
    }

    pub fn profile(&self) -> LayoutProfile {
        let (row_heights, label_column_width, marker_height) = match self {
            Breakpoint::Compact => (RowHeights::new(56.0, 40.0, 32.0), 140.0, 24.0),
            Breakpoint::Medium => (RowHeights::new(64.0, 44.0, 36.0), 200.0, 28.0),
            Breakpoint::Wide => (RowHeights::new(72.0, 48.0, 36.0), 280.0, 32.0),
        };
        LayoutProfile {
            breakpoint: *self,
            row_heights,
            label_column_width,
            marker_height,
        }
    }
}

/// Row heights in pixels for each hierarchy level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowHeights {
    pub sprint: f64,
    pub story: f64,
    pub task: f64,
}

impl RowHeights {
    pub const fn new(sprint: f64, story: f64, task: f64) -> Self {
        Self {
            sprint,
            story,
            task,
        }
    }
}

/// Geometry constants for one breakpoint
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProfile {
    pub breakpoint: Breakpoint,
    pub row_heights: RowHeights,
    /// Width reserved for the left label column
    pub label_column_width: f64,
    /// Height of the header row carrying the day markers
    pub marker_height: f64,
}

/// Layout profile for a viewport width
pub fn resolve_layout(viewport_width: f64) -> LayoutProfile {
    Breakpoint::for_width(viewport_width).profile()
}

/// Bounds on the pixel width of one day
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DayWidthConstraints {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl DayWidthConstraints {
    pub fn clamp(&self, day_width: f64) -> f64 {
        if day_width.is_nan() {
            return self.default;
        }
        day_width.clamp(self.min, self.max)
    }
}

/// Day-width bounds per granularity. Month views allow wider days since
/// fewer of them are shown.
pub fn day_width_constraints(granularity: Granularity) -> DayWidthConstraints {
    match granularity {
        Granularity::Month => DayWidthConstraints {
            min: 24.0,
            max: 120.0,
            default: 48.0,
        },
        Granularity::Quarter => DayWidthConstraints {
            min: 8.0,
            max: 40.0,
            default: 16.0,
        },
        Granularity::Year => DayWidthConstraints {
            min: 2.0,
            max: 12.0,
            default: 4.0,
        },
    }
}

/// Width below which the timeline must scroll horizontally
pub fn minimum_timeline_width(granularity: Granularity, total_days: i64) -> f64 {
    total_days.max(0) as f64 * day_width_constraints(granularity).min
}

/// Which presentation a viewport gets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationMode {
    /// Simplified per-sprint card list
    Mobile,
    /// Full Gantt grid
    Desktop,
}

impl PresentationMode {
    pub fn for_viewport(width: f64) -> Self {
        if width.is_nan() || width < MOBILE_MAX_WIDTH {
            PresentationMode::Mobile
        } else {
            PresentationMode::Desktop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_have_no_gaps() {
        assert_eq!(Breakpoint::for_width(0.0), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(639.999), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(640.0), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(1023.5), Breakpoint::Medium);
        assert_eq!(Breakpoint::for_width(1024.0), Breakpoint::Wide);
        assert_eq!(Breakpoint::for_width(f64::INFINITY), Breakpoint::Wide);
        assert_eq!(Breakpoint::for_width(-10.0), Breakpoint::Compact);
        assert_eq!(Breakpoint::for_width(f64::NAN), Breakpoint::Compact);
    }

    #[test]
    fn profiles_are_distinct() {
        let compact = resolve_layout(320.0);
        let medium = resolve_layout(800.0);
        let wide = resolve_layout(1440.0);
        assert_ne!(compact, medium);
        assert_ne!(medium, wide);
        assert!(compact.label_column_width < medium.label_column_width);
        assert!(medium.label_column_width < wide.label_column_width);
        assert_eq!(wide.row_heights.sprint, 72.0);
    }

    #[test]
    fn month_days_are_widest() {
        let month = day_width_constraints(Granularity::Month);
        let quarter = day_width_constraints(Granularity::Quarter);
        let year = day_width_constraints(Granularity::Year);
        assert!(month.min > quarter.min && quarter.min > year.min);
        assert!(month.min <= month.default && month.default <= month.max);
        assert_eq!(quarter.clamp(100.0), 40.0);
        assert_eq!(year.clamp(f64::NAN), 4.0);
    }

    #[test]
    fn minimum_width() {
        assert_eq!(minimum_timeline_width(Granularity::Month, 31), 744.0);
        assert_eq!(minimum_timeline_width(Granularity::Year, 365), 730.0);
        assert_eq!(minimum_timeline_width(Granularity::Quarter, -4), 0.0);
    }

    #[test]
    fn presentation_switch() {
        assert_eq!(PresentationMode::for_viewport(375.0), PresentationMode::Mobile);
        assert_eq!(PresentationMode::for_viewport(768.0), PresentationMode::Desktop);
    }
}
