//! Entity filtering
//!
//! Selects the sprints shown in a window and, per sprint, the stories that
//! match the assignee filter.

use roadmap_core::{ContactId, Sprint, SprintStatus, Story, Task, TeamId, TimelineWindow};
use serde::{Deserialize, Serialize};

/// Keyword meaning "no filtering" in every filter's string form
pub const ALL: &str = "all";

/// Keyword selecting stories without any assigned task
pub const UNASSIGNED: &str = "unassigned";

/// Sprint status filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    #[default]
    All,
    Only(SprintStatus),
}

impl StatusFilter {
    pub fn matches(&self, sprint: &Sprint) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => sprint.status == *status,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = roadmap_core::DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = roadmap_core::DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::All => ALL.to_string(),
            StatusFilter::Only(status) => status.as_str().to_string(),
        }
    }
}

/// Team filter
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TeamFilter {
    #[default]
    All,
    Team(TeamId),
}

impl TeamFilter {
    pub fn matches(&self, sprint: &Sprint) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Team(id) => sprint.team_id.as_deref() == Some(id.as_str()),
        }
    }
}

impl From<String> for TeamFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            TeamFilter::All
        } else {
            TeamFilter::Team(trimmed.to_string())
        }
    }
}

impl From<&str> for TeamFilter {
    fn from(value: &str) -> Self {
        TeamFilter::from(value.to_string())
    }
}

impl From<TeamFilter> for String {
    fn from(filter: TeamFilter) -> Self {
        match filter {
            TeamFilter::All => ALL.to_string(),
            TeamFilter::Team(id) => id,
        }
    }
}

/// Story filter over the assignees of a story's tasks
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssigneeFilter {
    #[default]
    All,
    /// Stories with no task, or whose tasks are all unassigned
    Unassigned,
    /// Stories with at least one task assigned to this contact
    Contact(ContactId),
}

impl From<String> for AssigneeFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            AssigneeFilter::All
        } else if trimmed.eq_ignore_ascii_case(UNASSIGNED) {
            AssigneeFilter::Unassigned
        } else {
            AssigneeFilter::Contact(trimmed.to_string())
        }
    }
}

impl From<&str> for AssigneeFilter {
    fn from(value: &str) -> Self {
        AssigneeFilter::from(value.to_string())
    }
}

impl From<AssigneeFilter> for String {
    fn from(filter: AssigneeFilter) -> Self {
        match filter {
            AssigneeFilter::All => ALL.to_string(),
            AssigneeFilter::Unassigned => UNASSIGNED.to_string(),
            AssigneeFilter::Contact(id) => id,
        }
    }
}

/// The complete filter selection of a roadmap view
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapFilters {
    pub status: StatusFilter,
    pub team: TeamFilter,
    pub assignee: AssigneeFilter,
}

/// Sprints overlapping `window` that pass the status and team filters.
///
/// Boundaries are inclusive: a sprint ending on the window's first day is in.
/// A sprint ending before it starts is treated as the single day `start_date`.
/// The result is sorted by `start_date`, ties keeping input order.
pub fn filter_sprints<'a>(
    sprints: &'a [Sprint],
    window: &TimelineWindow,
    status: &StatusFilter,
    team: &TeamFilter,
) -> Vec<&'a Sprint> {
    let mut selected: Vec<&Sprint> = sprints
        .iter()
        .filter(|s| window.overlaps(s.start_date, s.end_date.max(s.start_date)))
        .filter(|s| status.matches(s))
        .filter(|s| team.matches(s))
        .collect();
    // stable
    selected.sort_by_key(|s| s.start_date);
    selected
}

/// Stories of `sprint`, in `story_ids` order, that pass the assignee filter.
/// Ids that resolve to no story are skipped.
pub fn filter_stories_by_assignee<'a>(
    sprint: &Sprint,
    stories: &'a [Story],
    tasks: &[Task],
    filter: &AssigneeFilter,
) -> Vec<&'a Story> {
    sprint
        .story_ids
        .iter()
        .filter_map(|id| stories.iter().find(|story| &story.id == id))
        .filter(|story| story_matches(story, tasks, filter))
        .collect()
}

fn story_matches(story: &Story, tasks: &[Task], filter: &AssigneeFilter) -> bool {
    let mut story_tasks = tasks.iter().filter(|t| t.belongs_to(&story.id));
    match filter {
        AssigneeFilter::All => true,
        AssigneeFilter::Unassigned => story_tasks.all(|t| t.assignee().is_none()),
        AssigneeFilter::Contact(id) => story_tasks.any(|t| t.assignee() == Some(id.as_str())),
    }
}
