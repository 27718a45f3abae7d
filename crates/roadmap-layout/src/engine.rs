//! Full recompute pipeline
//!
//! `recompute` is a pure function of the current input tuple and the host's
//! interaction state. It runs window → filtered entities → layout profile →
//! positions → stats on every call and returns a fresh `RoadmapView`.

use chrono::NaiveDate;
use roadmap_core::{
    DataIssue, Granularity, IssueKind, RoadmapData, Sprint, SprintStatus, Story, StoryStatus,
    Task, TaskStatus, TimelineWindow,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calendar::get_range;
use crate::expansion::{ExpansionState, StoryRows};
use crate::filter::{filter_sprints, filter_stories_by_assignee, RoadmapFilters};
use crate::position::{BarGeometry, PositionEngine, TodayMarker};
use crate::responsive::{minimum_timeline_width, resolve_layout, LayoutProfile, PresentationMode};
use crate::stats::{roadmap_totals, sprint_stats, RoadmapTotals, SprintStats};
use crate::zoom::ZoomController;

/// Viewport measurements supplied by the host before each recompute
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    /// Full viewport width; selects the layout profile and presentation
    pub width: f64,
    /// Width available to the timeline area. Defaults to the viewport width
    /// minus the profile's label column.
    #[serde(default)]
    pub container_width: Option<f64>,
}

impl Viewport {
    pub fn new(width: f64) -> Self {
        Self {
            width,
            container_width: None,
        }
    }

    pub fn with_container(mut self, container_width: f64) -> Self {
        self.container_width = Some(container_width);
        self
    }

    fn timeline_width(&self, profile: &LayoutProfile) -> f64 {
        let width = self
            .container_width
            .unwrap_or(self.width - profile.label_column_width);
        if width.is_finite() {
            width.max(0.0)
        } else {
            0.0
        }
    }
}

/// Everything a recompute reads, borrowed from the host
#[derive(Clone, Copy, Debug)]
pub struct RoadmapInput<'a> {
    pub data: &'a RoadmapData,
    pub reference_date: NaiveDate,
    pub granularity: Granularity,
    pub filters: &'a RoadmapFilters,
    pub viewport: Viewport,
    /// Date of the "today" marker
    pub today: NaiveDate,
}

/// Mutable interaction state owned by the host and passed back on every pass
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionState {
    pub zoom: ZoomController,
    pub expansion: ExpansionState,
}

impl InteractionState {
    /// Drop expansion flags of sprints and stories absent from `view`
    pub fn reconcile(&mut self, view: &RoadmapView) {
        self.expansion.retain_visible(
            view.sprints.iter().map(|s| s.id.as_str()),
            view.sprints
                .iter()
                .flat_map(|s| s.stories.iter().map(|story| story.id.as_str())),
        );
    }
}

/// Derived output of one recompute pass
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapView {
    pub window: TimelineWindow,
    pub granularity: Granularity,
    pub profile: LayoutProfile,
    pub presentation: PresentationMode,
    pub zoom: f64,
    /// Unscaled width the positions were computed against
    pub container_width: f64,
    /// Zoomed timeline width
    pub timeline_width: f64,
    /// Zoomed width of one day
    pub day_width: f64,
    /// Width under which the timeline needs horizontal scrolling
    pub minimum_width: f64,
    pub can_scroll: bool,
    pub today: Option<TodayMarker>,
    pub sprints: Vec<SprintLayout>,
    pub totals: RoadmapTotals,
    /// Marker row plus every sprint block
    pub total_height: f64,
    pub issues: Vec<DataIssue>,
}

impl RoadmapView {
    pub fn sprint(&self, id: &str) -> Option<&SprintLayout> {
        self.sprints.iter().find(|s| s.id == id)
    }
}

/// A visible sprint with its geometry and rollups
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintLayout {
    pub id: String,
    pub name: String,
    pub goal: Option<String>,
    pub status: SprintStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i64,
    /// `[CODE] Name` of the product, absent when unresolved
    pub product_label: Option<String>,
    pub product_color: Option<String>,
    pub team_label: Option<String>,
    pub team_color: Option<String>,
    pub bar: BarGeometry,
    /// Rollup over every story of the sprint, ignoring the assignee filter
    pub stats: SprintStats,
    pub expanded: bool,
    /// Height of the sprint block under the current expansion state
    pub row_height: f64,
    /// Stories passing the assignee filter and touching the window, in
    /// sprint order
    pub stories: Vec<StoryLayout>,
}

/// A visible story. `tasks` is filled only when the story's rows are laid out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryLayout {
    pub id: String,
    pub label: String,
    pub status: StoryStatus,
    pub points: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar: BarGeometry,
    pub expanded: bool,
    /// Tasks touching the window
    pub task_count: usize,
    pub done_tasks: usize,
    pub row_height: f64,
    pub tasks: Vec<TaskLayout>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLayout {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    /// Contact display name, or the raw id when the contact is unknown
    pub assignee: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar: BarGeometry,
}

/// Recompute the whole view from scratch
pub fn recompute(input: &RoadmapInput<'_>, state: &InteractionState) -> RoadmapView {
    let data = input.data;
    let window = get_range(input.reference_date, input.granularity);
    let profile = resolve_layout(input.viewport.width);
    let container_width = input.viewport.timeline_width(&profile);
    let engine = PositionEngine::new(&window, container_width, state.zoom.level());

    let mut issues = Vec::new();
    let sprints: Vec<SprintLayout> = filter_sprints(
        &data.sprints,
        &window,
        &input.filters.status,
        &input.filters.team,
    )
    .into_iter()
    .map(|sprint| layout_sprint(sprint, input, &engine, &profile, &state.expansion, &mut issues))
    .collect();

    let minimum_width = minimum_timeline_width(input.granularity, window.total_days);
    let timeline_width = engine.timeline_width();
    let totals = roadmap_totals(sprints.iter().map(|s| &s.stats));
    let total_height = profile.marker_height + sprints.iter().map(|s| s.row_height).sum::<f64>();

    debug!(
        window = %window.label,
        sprints = sprints.len(),
        zoom = engine.zoom(),
        width = container_width,
        "recomputed roadmap view"
    );

    RoadmapView {
        granularity: input.granularity,
        presentation: PresentationMode::for_viewport(input.viewport.width),
        zoom: engine.zoom(),
        container_width,
        timeline_width,
        day_width: engine.day_width(),
        minimum_width,
        can_scroll: minimum_width.max(timeline_width) > container_width,
        today: engine.today_marker(input.today),
        totals,
        total_height,
        profile,
        sprints,
        issues,
        window,
    }
}

fn layout_sprint(
    sprint: &Sprint,
    input: &RoadmapInput<'_>,
    engine: &PositionEngine<'_>,
    profile: &LayoutProfile,
    expansion: &ExpansionState,
    issues: &mut Vec<DataIssue>,
) -> SprintLayout {
    let data = input.data;
    check_references(sprint, data, issues);
    if sprint.is_degenerate() {
        report_degenerate(issues, &sprint.id, sprint.start_date, sprint.end_date);
    }

    let product = data.sprint_product(sprint);
    let team = data.sprint_team(sprint);
    let expanded = expansion.is_sprint_expanded(&sprint.id);

    let window = engine.window();
    let stories: Vec<StoryLayout> =
        filter_stories_by_assignee(sprint, &data.stories, &data.tasks, &input.filters.assignee)
            .into_iter()
            .filter(|story| {
                let (start, end) = story_interval(story, sprint);
                window.overlaps(start, end.max(start))
            })
            .map(|story| layout_story(story, sprint, expanded, input, engine, profile, expansion, issues))
            .collect();

    let rows: Vec<StoryRows<'_>> = stories
        .iter()
        .map(|story| StoryRows {
            story_id: &story.id,
            task_count: story.task_count,
        })
        .collect();
    let row_height = expansion.sprint_height(&profile.row_heights, &sprint.id, &rows);

    SprintLayout {
        id: sprint.id.clone(),
        name: sprint.name.clone(),
        goal: sprint.goal.clone(),
        status: sprint.status,
        start_date: sprint.start_date,
        end_date: sprint.end_date,
        duration_days: sprint.duration_days(),
        product_label: product.map(|p| p.label()),
        product_color: product.and_then(|p| p.color.clone()),
        team_label: team.map(|t| t.name.clone()),
        team_color: team.and_then(|t| t.color.clone()),
        bar: engine.place(sprint.start_date, sprint.end_date),
        stats: sprint_stats(sprint, &data.stories),
        expanded,
        row_height,
        stories,
    }
}

fn layout_story(
    story: &Story,
    sprint: &Sprint,
    sprint_expanded: bool,
    input: &RoadmapInput<'_>,
    engine: &PositionEngine<'_>,
    profile: &LayoutProfile,
    expansion: &ExpansionState,
    issues: &mut Vec<DataIssue>,
) -> StoryLayout {
    let (start, end) = story_interval(story, sprint);
    if end < start && (story.start_date.is_some() || story.end_date.is_some()) {
        report_degenerate(issues, &story.id, start, end);
    }

    let window = engine.window();
    let story_tasks: Vec<&Task> = input
        .data
        .story_tasks(&story.id)
        .into_iter()
        .filter(|task| {
            let (task_start, task_end) = task_interval(task, start, end);
            window.overlaps(task_start, task_end.max(task_start))
        })
        .collect();
    let expanded = expansion.is_story_expanded(&story.id);
    let tasks = if sprint_expanded && expanded {
        story_tasks
            .iter()
            .map(|task| layout_task(task, start, end, input, engine, issues))
            .collect()
    } else {
        Vec::new()
    };

    StoryLayout {
        id: story.id.clone(),
        label: story.label(),
        status: story.status,
        points: story.points(),
        start_date: start,
        end_date: end,
        bar: engine.place(start, end),
        expanded,
        task_count: story_tasks.len(),
        done_tasks: story_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count(),
        row_height: expansion.story_height(
            &profile.row_heights,
            StoryRows {
                story_id: &story.id,
                task_count: story_tasks.len(),
            },
        ),
        tasks,
    }
}

fn layout_task(
    task: &Task,
    story_start: NaiveDate,
    story_end: NaiveDate,
    input: &RoadmapInput<'_>,
    engine: &PositionEngine<'_>,
    issues: &mut Vec<DataIssue>,
) -> TaskLayout {
    let (start, end) = task_interval(task, story_start, story_end);
    if end < start && (task.start_date.is_some() || task.end_date.is_some()) {
        report_degenerate(issues, &task.id, start, end);
    }

    TaskLayout {
        id: task.id.clone(),
        title: task.title.clone(),
        status: task.status,
        assignee: task.assignee().map(|id| {
            input
                .data
                .contact(id)
                .map(|c| c.full_name())
                .unwrap_or_else(|| id.to_string())
        }),
        start_date: start,
        end_date: end,
        bar: engine.place(start, end),
    }
}

/// Story dates, falling back to the sprint's
fn story_interval(story: &Story, sprint: &Sprint) -> (NaiveDate, NaiveDate) {
    (
        story.start_date.unwrap_or(sprint.start_date),
        story.end_date.unwrap_or(sprint.end_date),
    )
}

/// Task dates, falling back to the story's
fn task_interval(task: &Task, story_start: NaiveDate, story_end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (
        task.start_date.unwrap_or(story_start),
        task.end_date.unwrap_or(story_end),
    )
}

fn check_references(sprint: &Sprint, data: &RoadmapData, issues: &mut Vec<DataIssue>) {
    if let Some(product_id) = sprint.product_id.as_deref() {
        if data.product(product_id).is_none() {
            push_issue(
                issues,
                DataIssue::new(
                    IssueKind::MissingProduct,
                    &sprint.id,
                    format!("product '{}' not found", product_id),
                ),
            );
        }
    }
    if let Some(team_id) = sprint.team_id.as_deref() {
        if data.team(team_id).is_none() {
            push_issue(
                issues,
                DataIssue::new(
                    IssueKind::MissingTeam,
                    &sprint.id,
                    format!("team '{}' not found", team_id),
                ),
            );
        }
    }
    for story_id in &sprint.story_ids {
        if data.story(story_id).is_none() {
            push_issue(
                issues,
                DataIssue::new(
                    IssueKind::MissingStory,
                    &sprint.id,
                    format!("story '{}' not found", story_id),
                ),
            );
        }
    }
}

fn report_degenerate(issues: &mut Vec<DataIssue>, entity_id: &str, start: NaiveDate, end: NaiveDate) {
    push_issue(
        issues,
        DataIssue::new(
            IssueKind::DegenerateInterval,
            entity_id,
            format!("ends {} before it starts {}", end, start),
        ),
    );
}

fn push_issue(issues: &mut Vec<DataIssue>, issue: DataIssue) {
    warn!(kind = %issue.kind, entity = %issue.entity_id, "{}", issue.message);
    issues.push(issue);
}
