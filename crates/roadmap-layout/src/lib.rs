//! # roadmap-layout
//!
//! Timeline layout engine turning sprints, stories and tasks into zoomable,
//! collapsible Gantt geometry.
//!
//! This crate provides:
//! - Calendar windows per granularity and one-unit navigation
//! - Sprint overlap/status/team filtering and story assignee filtering
//! - Responsive layout profiles keyed by viewport width
//! - Interval → pixel positioning with a single zoom post-multiplication
//! - Expansion state and row-height accumulation
//! - Sprint progress rollups
//! - `recompute`, the pure pipeline producing a `RoadmapView`
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use roadmap_core::{Granularity, RoadmapData, Sprint};
//! use roadmap_layout::{recompute, InteractionState, RoadmapFilters, RoadmapInput, Viewport};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
//! let mut data = RoadmapData::default();
//! data.sprints.push(Sprint::new("s1", day(1), day(14)));
//!
//! let filters = RoadmapFilters::default();
//! let input = RoadmapInput {
//!     data: &data,
//!     reference_date: day(10),
//!     granularity: Granularity::Month,
//!     filters: &filters,
//!     viewport: Viewport::new(1280.0).with_container(620.0),
//!     today: day(10),
//! };
//!
//! let view = recompute(&input, &InteractionState::default());
//! assert_eq!(view.sprints[0].bar.width, 280.0);
//! ```

pub mod calendar;
pub mod engine;
pub mod expansion;
pub mod filter;
pub mod position;
pub mod responsive;
pub mod stats;
pub mod zoom;

pub use calendar::{get_range, navigate, range_label};
pub use engine::{
    recompute, InteractionState, RoadmapInput, RoadmapView, SprintLayout, StoryLayout, TaskLayout,
    Viewport,
};
pub use expansion::{ExpansionState, StoryRows};
pub use filter::{
    filter_sprints, filter_stories_by_assignee, AssigneeFilter, RoadmapFilters, StatusFilter,
    TeamFilter,
};
pub use position::{bar_position, BarGeometry, PositionEngine, TodayMarker};
pub use responsive::{
    day_width_constraints, minimum_timeline_width, resolve_layout, Breakpoint,
    DayWidthConstraints, LayoutProfile, PresentationMode, RowHeights,
};
pub use stats::{progress_percent, roadmap_totals, sprint_stats, RoadmapTotals, SprintStats};
pub use zoom::{ZoomController, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
