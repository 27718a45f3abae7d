//! Desktop presentation: the view flattened into Gantt rows
//!
//! Each visible sprint, story and task becomes one row carrying its vertical
//! offset, so a painter only has to draw rectangles. Story rows are emitted
//! only under expanded sprints, task rows only under expanded stories.

use roadmap_core::ExportError;
use roadmap_layout::{BarGeometry, RoadmapView, TodayMarker};
use serde::{Deserialize, Serialize};

use crate::ViewRenderer;

/// Hierarchy level of a row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Sprint,
    Story,
    Task,
}

impl RowKind {
    pub fn depth(&self) -> u8 {
        match self {
            RowKind::Sprint => 0,
            RowKind::Story => 1,
            RowKind::Task => 2,
        }
    }
}

/// One Gantt row
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttRow {
    pub kind: RowKind,
    pub id: String,
    /// Indentation level: 0 for sprints, 1 for stories, 2 for tasks
    pub depth: u8,
    pub label: String,
    /// Offset of the row's top edge from the top of the chart
    pub top: f64,
    pub height: f64,
    pub bar: BarGeometry,
    /// Expansion flag; absent on task rows
    pub expanded: Option<bool>,
    /// Wire name of the entity's status
    pub status: String,
    /// Fill colour, taken from the sprint's team
    pub color: Option<String>,
}

/// Everything needed to paint the desktop chart
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttChart {
    pub title: String,
    pub label_column_width: f64,
    pub timeline_width: f64,
    pub day_width: f64,
    pub can_scroll: bool,
    pub height: f64,
    pub today: Option<TodayMarker>,
    pub rows: Vec<GanttRow>,
}

/// Flattens a view into Gantt rows
#[derive(Clone, Debug)]
pub struct DesktopRenderer {
    /// Start the first row below the date marker row
    pub below_markers: bool,
    /// Append the product label to sprint rows
    pub show_product: bool,
}

impl Default for DesktopRenderer {
    fn default() -> Self {
        Self {
            below_markers: true,
            show_product: false,
        }
    }
}

impl DesktopRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start rows at offset zero instead of below the marker row
    pub fn no_markers(mut self) -> Self {
        self.below_markers = false;
        self
    }

    /// Label sprints as `name · [CODE] Product`
    pub fn with_product(mut self) -> Self {
        self.show_product = true;
        self
    }

    /// Build the chart for `view`
    pub fn chart(&self, view: &RoadmapView) -> GanttChart {
        let rows = self.rows(view);
        let top = self.origin(view);
        let height = top + rows.iter().map(|r| r.height).sum::<f64>();
        GanttChart {
            title: view.window.label.clone(),
            label_column_width: view.profile.label_column_width,
            timeline_width: view.timeline_width,
            day_width: view.day_width,
            can_scroll: view.can_scroll,
            height,
            today: view.today,
            rows,
        }
    }

    /// Flatten the visible hierarchy of `view`, top to bottom
    pub fn rows(&self, view: &RoadmapView) -> Vec<GanttRow> {
        let heights = view.profile.row_heights;
        let mut rows = Vec::new();
        let mut top = self.origin(view);

        for sprint in &view.sprints {
            let color = sprint.team_color.clone();
            let label = match (&sprint.product_label, self.show_product) {
                (Some(product), true) => format!("{} · {}", sprint.name, product),
                _ => sprint.name.clone(),
            };
            rows.push(GanttRow {
                kind: RowKind::Sprint,
                id: sprint.id.clone(),
                depth: RowKind::Sprint.depth(),
                label,
                top,
                height: heights.sprint,
                bar: sprint.bar,
                expanded: Some(sprint.expanded),
                status: sprint.status.as_str().to_string(),
                color: color.clone(),
            });
            top += heights.sprint;

            if !sprint.expanded {
                continue;
            }
            for story in &sprint.stories {
                rows.push(GanttRow {
                    kind: RowKind::Story,
                    id: story.id.clone(),
                    depth: RowKind::Story.depth(),
                    label: story.label.clone(),
                    top,
                    height: heights.story,
                    bar: story.bar,
                    expanded: Some(story.expanded),
                    status: story.status.as_str().to_string(),
                    color: color.clone(),
                });
                top += heights.story;

                for task in &story.tasks {
                    rows.push(GanttRow {
                        kind: RowKind::Task,
                        id: task.id.clone(),
                        depth: RowKind::Task.depth(),
                        label: task.title.clone(),
                        top,
                        height: heights.task,
                        bar: task.bar,
                        expanded: None,
                        status: task.status.as_str().to_string(),
                        color: color.clone(),
                    });
                    top += heights.task;
                }
            }
        }
        rows
    }

    fn origin(&self, view: &RoadmapView) -> f64 {
        if self.below_markers {
            view.profile.marker_height
        } else {
            0.0
        }
    }
}

impl ViewRenderer for DesktopRenderer {
    type Output = GanttChart;

    fn render(&self, view: &RoadmapView) -> Result<GanttChart, ExportError> {
        Ok(self.chart(view))
    }
}
