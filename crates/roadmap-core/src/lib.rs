//! # roadmap-core
//!
//! Core domain model for the roadmap timeline engine.
//!
//! This crate provides:
//! - Read-only domain records: `Sprint`, `Story`, `Task`, `Product`, `Team`, `Contact`
//! - The `RoadmapData` bundle loaded from the storage layer's JSON
//! - Timeline types shared by every consumer: `Granularity`, `TimelineWindow`, `Direction`
//! - Data-quality diagnostics and error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use roadmap_core::{RoadmapData, Sprint, SprintStatus, Story, StoryStatus};
//!
//! let mut data = RoadmapData::default();
//! data.sprints.push(
//!     Sprint::new(
//!         "s1",
//!         NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 1, 14).unwrap(),
//!     )
//!     .name("Sprint 1")
//!     .status(SprintStatus::Active)
//!     .story("us1"),
//! );
//! data.stories.push(Story::new("us1").title("Login").estimation(5.0).status(StoryStatus::Done));
//!
//! let sprint = &data.sprints[0];
//! assert_eq!(sprint.duration_days(), 14);
//! assert_eq!(data.sprint_stories(sprint).len(), 1);
//! ```

pub mod dates;
pub mod diagnostics;
pub mod timeline;

pub use dates::{days_between, parse_date};
pub use diagnostics::{DataIssue, IssueKind};
pub use timeline::{Direction, Granularity, TimelineWindow};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a sprint
pub type SprintId = String;

/// Unique identifier for a user story
pub type StoryId = String;

/// Unique identifier for a task
pub type TaskId = String;

/// Unique identifier for a product
pub type ProductId = String;

/// Unique identifier for a team
pub type TeamId = String;

/// Unique identifier for a contact
pub type ContactId = String;

// ============================================================================
// Statuses
// ============================================================================

/// Lifecycle state of a sprint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SprintStatus {
    #[default]
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl SprintStatus {
    pub const ALL: [SprintStatus; 4] = [
        SprintStatus::Planned,
        SprintStatus::Active,
        SprintStatus::Completed,
        SprintStatus::Cancelled,
    ];

    /// Wire name, as stored and exported
    pub fn as_str(&self) -> &'static str {
        match self {
            SprintStatus::Planned => "planned",
            SprintStatus::Active => "active",
            SprintStatus::Completed => "completed",
            SprintStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SprintStatus {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DataError::InvalidStatus(s.to_string()))
    }
}

/// Backlog state of a user story
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StoryStatus {
    #[default]
    Unassigned,
    Planned,
    InProgress,
    Done,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Unassigned => "unassigned",
            StoryStatus::Planned => "planned",
            StoryStatus::InProgress => "inProgress",
            StoryStatus::Done => "done",
        }
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Work state of a task
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    #[default]
    Planned,
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "planned",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Done => "done",
            TaskStatus::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Sprint
// ============================================================================

/// A time-boxed iteration holding an ordered list of stories
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    /// Unique identifier
    pub id: SprintId,
    /// Human-readable name
    #[serde(default)]
    pub name: String,
    /// Sprint goal
    #[serde(default)]
    pub goal: Option<String>,
    /// First day (inclusive)
    #[serde(deserialize_with = "dates::deserialize")]
    pub start_date: NaiveDate,
    /// Last day (inclusive)
    #[serde(deserialize_with = "dates::deserialize")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: SprintStatus,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    /// Stories planned in this sprint, in display order
    #[serde(default)]
    pub story_ids: Vec<StoryId>,
}

impl Sprint {
    /// Create a planned sprint covering `[start, end]`
    pub fn new(id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            goal: None,
            start_date: start,
            end_date: end,
            status: SprintStatus::Planned,
            product_id: None,
            team_id: None,
            story_ids: Vec::new(),
        }
    }

    /// Set the sprint name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the sprint goal
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    /// Set the status
    pub fn status(mut self, status: SprintStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach to a product
    pub fn product(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Attach to a team
    pub fn team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    /// Append a story reference
    pub fn story(mut self, story_id: impl Into<String>) -> Self {
        self.story_ids.push(story_id.into());
        self
    }

    /// `end_date` precedes `start_date`
    pub fn is_degenerate(&self) -> bool {
        self.end_date < self.start_date
    }

    /// Calendar length in days, both endpoints included (0 when degenerate)
    pub fn duration_days(&self) -> i64 {
        (days_between(self.start_date, self.end_date) + 1).max(0)
    }
}

// ============================================================================
// Story
// ============================================================================

/// A backlog item, associated to a sprint through `Sprint::story_ids`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: StoryId,
    /// Backlog number (e.g. the 12 in "US-12")
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub title: String,
    /// Estimation in story points
    #[serde(default)]
    pub estimation: Option<f64>,
    #[serde(default)]
    pub status: StoryStatus,
    /// Free-form outcome qualifier
    #[serde(default)]
    pub outcome: Option<String>,
    /// Explicit start; the story spans its sprint when absent
    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub end_date: Option<NaiveDate>,
}

impl Story {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            number: None,
            estimation: None,
            status: StoryStatus::Unassigned,
            outcome: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn number(mut self, number: u32) -> Self {
        self.number = Some(number);
        self
    }

    pub fn estimation(mut self, points: f64) -> Self {
        self.estimation = Some(points);
        self
    }

    pub fn status(mut self, status: StoryStatus) -> Self {
        self.status = status;
        self
    }

    /// Set an explicit interval
    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Story points, with missing or invalid estimations counted as zero
    pub fn points(&self) -> f64 {
        self.estimation
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(0.0)
    }

    pub fn is_done(&self) -> bool {
        self.status == StoryStatus::Done
    }

    /// Display label, prefixed with the backlog number when known
    pub fn label(&self) -> String {
        match self.number {
            Some(n) => format!("US-{} {}", n, self.title),
            None => self.title.clone(),
        }
    }
}

// ============================================================================
// Task
// ============================================================================

/// A unit of work belonging to a story
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Assignee contact id
    #[serde(default)]
    pub assigned_to: Option<ContactId>,
    /// Parent story
    #[serde(default, alias = "userStoryId")]
    pub story_id: Option<StoryId>,
    /// Explicit start; the task spans its story when absent
    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "dates::deserialize_option")]
    pub end_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            number: None,
            status: TaskStatus::Planned,
            assigned_to: None,
            story_id: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach to a parent story
    pub fn story(mut self, story_id: impl Into<String>) -> Self {
        self.story_id = Some(story_id.into());
        self
    }

    /// Assign to a contact
    pub fn assign(mut self, contact_id: impl Into<String>) -> Self {
        self.assigned_to = Some(contact_id.into());
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// An empty assignee string counts as unassigned
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to.as_deref().filter(|id| !id.is_empty())
    }

    pub fn belongs_to(&self, story_id: &str) -> bool {
        self.story_id.as_deref() == Some(story_id)
    }
}

// ============================================================================
// Lookup entities
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// Short product code, e.g. "ABC"
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Product {
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            color: None,
        }
    }

    /// `[CODE] Name`
    pub fn label(&self) -> String {
        format!("[{}] {}", self.code, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Contact {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

// ============================================================================
// RoadmapData
// ============================================================================

/// Every collection the engine reads, as handed over by the storage layer
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoadmapData {
    pub sprints: Vec<Sprint>,
    pub stories: Vec<Story>,
    pub tasks: Vec<Task>,
    pub products: Vec<Product>,
    pub teams: Vec<Team>,
    pub contacts: Vec<Contact>,
}

impl RoadmapData {
    /// Parse a dataset exported by the storage layer
    pub fn from_json(source: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn sprint(&self, id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|s| s.id == id)
    }

    pub fn story(&self, id: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Product referenced by a sprint, if it exists
    pub fn sprint_product(&self, sprint: &Sprint) -> Option<&Product> {
        sprint.product_id.as_deref().and_then(|id| self.product(id))
    }

    /// Team referenced by a sprint, if it exists
    pub fn sprint_team(&self, sprint: &Sprint) -> Option<&Team> {
        sprint.team_id.as_deref().and_then(|id| self.team(id))
    }

    /// Stories referenced by `sprint.story_ids`, in that order.
    /// Dangling ids are skipped.
    pub fn sprint_stories(&self, sprint: &Sprint) -> Vec<&Story> {
        sprint
            .story_ids
            .iter()
            .filter_map(|id| self.story(id))
            .collect()
    }

    /// Tasks whose parent is `story_id`, in storage order
    pub fn story_tasks(&self, story_id: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.belongs_to(story_id)).collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Input decoding error
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Malformed dataset: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown granularity: {0} (expected month, quarter or year)")]
    InvalidGranularity(String),

    #[error("Unknown direction: {0} (expected previous or next)")]
    InvalidDirection(String),

    #[error("Unknown status: {0}")]
    InvalidStatus(String),
}

/// Export error
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sprint_builder() {
        let sprint = Sprint::new("s1", date(2025, 1, 1), date(2025, 1, 14))
            .name("Sprint 1")
            .goal("Ship login")
            .status(SprintStatus::Active)
            .product("p1")
            .team("t1")
            .story("a")
            .story("b");

        assert_eq!(sprint.name, "Sprint 1");
        assert_eq!(sprint.goal.as_deref(), Some("Ship login"));
        assert_eq!(sprint.product_id.as_deref(), Some("p1"));
        assert_eq!(sprint.story_ids, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(sprint.duration_days(), 14);
        assert!(!sprint.is_degenerate());
    }

    #[test]
    fn degenerate_sprint_has_zero_duration() {
        let sprint = Sprint::new("s1", date(2025, 1, 10), date(2025, 1, 5));
        assert!(sprint.is_degenerate());
        assert_eq!(sprint.duration_days(), 0);
    }

    #[test]
    fn story_points_ignore_invalid_estimations() {
        assert_eq!(Story::new("a").points(), 0.0);
        assert_eq!(Story::new("a").estimation(-3.0).points(), 0.0);
        assert_eq!(Story::new("a").estimation(f64::NAN).points(), 0.0);
        assert_eq!(Story::new("a").estimation(5.0).points(), 5.0);
    }

    #[test]
    fn story_label_uses_number() {
        let story = Story::new("a").title("Login").number(12);
        assert_eq!(story.label(), "US-12 Login");
        assert_eq!(Story::new("b").title("Logout").label(), "Logout");
    }

    #[test]
    fn empty_assignee_is_unassigned() {
        let task = Task::new("t").assign("");
        assert_eq!(task.assignee(), None);
        assert_eq!(Task::new("t").assign("c1").assignee(), Some("c1"));
    }

    #[test]
    fn status_wire_names() {
        assert_eq!(SprintStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(StoryStatus::InProgress.to_string(), "inProgress");
        assert_eq!(TaskStatus::Blocked.to_string(), "blocked");
        assert_eq!("Active".parse::<SprintStatus>().unwrap(), SprintStatus::Active);
        assert!("archived".parse::<SprintStatus>().is_err());
    }

    #[test]
    fn product_label() {
        let product = Product::new("p1", "ABC", "Alpha Banking Core");
        assert_eq!(product.label(), "[ABC] Alpha Banking Core");
    }

    #[test]
    fn contact_full_name_trims_missing_parts() {
        assert_eq!(Contact::new("c", "Ada", "").full_name(), "Ada");
        assert_eq!(Contact::new("c", "Ada", "Lovelace").full_name(), "Ada Lovelace");
    }

    #[test]
    fn dataset_from_storage_json() {
        let json = r#"{
            "sprints": [{
                "id": "s1",
                "name": "Sprint 1",
                "startDate": "2025-01-01",
                "endDate": "2025-01-14T23:59:59.999Z",
                "status": "active",
                "productId": "p1",
                "teamId": "t1",
                "storyIds": ["us1", "missing"]
            }],
            "stories": [{"id": "us1", "title": "Login", "estimation": 3, "status": "inProgress"}],
            "tasks": [
                {"id": "t1", "title": "Form", "status": "done", "userStoryId": "us1", "assignedTo": "c1"},
                {"id": "t2", "title": "API", "storyId": "us1"}
            ],
            "products": [{"id": "p1", "code": "ABC", "name": "Alpha"}]
        }"#;

        let data = RoadmapData::from_json(json).unwrap();
        let sprint = &data.sprints[0];
        assert_eq!(sprint.end_date, date(2025, 1, 14));
        assert_eq!(sprint.status, SprintStatus::Active);
        assert_eq!(data.sprint_stories(sprint).len(), 1);
        assert_eq!(data.story_tasks("us1").len(), 2);
        assert_eq!(data.stories[0].status, StoryStatus::InProgress);
        assert_eq!(data.sprint_product(sprint).map(Product::label).as_deref(), Some("[ABC] Alpha"));
        assert!(data.sprint_team(sprint).is_none());
        assert!(data.teams.is_empty());
    }

    #[test]
    fn malformed_dataset_is_an_error() {
        let err = RoadmapData::from_json(r#"{"sprints": [{"id": "s1"}]}"#).unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
