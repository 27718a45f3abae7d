//! Hierarchical expansion state
//!
//! Two independent levels of collapse flags: sprints are expanded unless
//! collapsed, stories are collapsed unless expanded. A story's task rows are
//! laid out only when both its sprint and the story itself are expanded.

use std::collections::BTreeSet;

use roadmap_core::{SprintId, StoryId};
use serde::{Deserialize, Serialize};

use crate::responsive::RowHeights;

/// Story id with the number of task rows it would reveal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoryRows<'a> {
    pub story_id: &'a str,
    pub task_count: usize,
}

/// User-driven expand/collapse flags, kept by the host across recomputes
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpansionState {
    collapsed_sprints: BTreeSet<SprintId>,
    expanded_stories: BTreeSet<StoryId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_sprint_expanded(&self, sprint_id: &str) -> bool {
        !self.collapsed_sprints.contains(sprint_id)
    }

    /// The story's own flag, regardless of its sprint
    pub fn is_story_expanded(&self, story_id: &str) -> bool {
        self.expanded_stories.contains(story_id)
    }

    /// Flip a sprint and return its new state
    pub fn toggle_sprint(&mut self, sprint_id: &str) -> bool {
        let expanded = !self.is_sprint_expanded(sprint_id);
        self.set_sprint_expanded(sprint_id, expanded);
        expanded
    }

    /// Flip a story and return its new state
    pub fn toggle_story(&mut self, story_id: &str) -> bool {
        let expanded = !self.is_story_expanded(story_id);
        self.set_story_expanded(story_id, expanded);
        expanded
    }

    pub fn set_sprint_expanded(&mut self, sprint_id: &str, expanded: bool) {
        if expanded {
            self.collapsed_sprints.remove(sprint_id);
        } else {
            self.collapsed_sprints.insert(sprint_id.to_string());
        }
    }

    pub fn set_story_expanded(&mut self, story_id: &str, expanded: bool) {
        if expanded {
            self.expanded_stories.insert(story_id.to_string());
        } else {
            self.expanded_stories.remove(story_id);
        }
    }

    pub fn expand_all_stories<'a>(&mut self, story_ids: impl IntoIterator<Item = &'a str>) {
        self.expanded_stories
            .extend(story_ids.into_iter().map(str::to_string));
    }

    pub fn collapse_all_stories(&mut self) {
        self.expanded_stories.clear();
    }

    /// Forget flags of entities that left the filtered set, so they come back
    /// in their default state.
    pub fn retain_visible<'a>(
        &mut self,
        sprint_ids: impl IntoIterator<Item = &'a str>,
        story_ids: impl IntoIterator<Item = &'a str>,
    ) {
        let sprints: BTreeSet<&str> = sprint_ids.into_iter().collect();
        let stories: BTreeSet<&str> = story_ids.into_iter().collect();
        self.collapsed_sprints.retain(|id| sprints.contains(id.as_str()));
        self.expanded_stories.retain(|id| stories.contains(id.as_str()));
    }

    /// Height of a story block: its own row plus, when expanded, its tasks
    pub fn story_height(&self, rows: &RowHeights, story: StoryRows<'_>) -> f64 {
        if self.is_story_expanded(story.story_id) {
            rows.story + story.task_count as f64 * rows.task
        } else {
            rows.story
        }
    }

    /// Height of a sprint block: the sprint row plus, when expanded, every
    /// visible story block
    pub fn sprint_height(&self, rows: &RowHeights, sprint_id: &str, stories: &[StoryRows<'_>]) -> f64 {
        if !self.is_sprint_expanded(sprint_id) {
            return rows.sprint;
        }
        rows.sprint
            + stories
                .iter()
                .map(|story| self.story_height(rows, *story))
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROWS: RowHeights = RowHeights::new(72.0, 48.0, 36.0);

    fn stories() -> Vec<StoryRows<'static>> {
        vec![
            StoryRows {
                story_id: "a",
                task_count: 3,
            },
            StoryRows {
                story_id: "b",
                task_count: 0,
            },
        ]
    }

    #[test]
    fn defaults() {
        let state = ExpansionState::new();
        assert!(state.is_sprint_expanded("s1"));
        assert!(!state.is_story_expanded("a"));
        assert_eq!(state.sprint_height(&ROWS, "s1", &stories()), 72.0 + 48.0 * 2.0);
    }

    #[test]
    fn story_expansion_adds_task_rows() {
        let mut state = ExpansionState::new();
        assert!(state.toggle_story("a"));
        assert_eq!(
            state.sprint_height(&ROWS, "s1", &stories()),
            72.0 + 48.0 + 3.0 * 36.0 + 48.0
        );
    }

    #[test]
    fn collapse_then_expand_restores_height() {
        let mut state = ExpansionState::new();
        state.toggle_story("a");
        let before = state.sprint_height(&ROWS, "s1", &stories());

        assert!(!state.toggle_sprint("s1"));
        assert_eq!(state.sprint_height(&ROWS, "s1", &stories()), ROWS.sprint);
        // story flag survives the sprint collapse
        assert!(state.is_story_expanded("a"));

        assert!(state.toggle_sprint("s1"));
        assert_eq!(state.sprint_height(&ROWS, "s1", &stories()), before);
    }

    #[test]
    fn retain_visible_drops_stale_flags() {
        let mut state = ExpansionState::new();
        state.toggle_sprint("gone");
        state.toggle_sprint("kept");
        state.expand_all_stories(["x", "y"]);

        state.retain_visible(["kept"], ["y"]);

        assert!(state.is_sprint_expanded("gone"));
        assert!(!state.is_sprint_expanded("kept"));
        assert!(!state.is_story_expanded("x"));
        assert!(state.is_story_expanded("y"));
    }

    #[test]
    fn collapse_all_stories() {
        let mut state = ExpansionState::new();
        state.expand_all_stories(["a", "b"]);
        state.collapse_all_stories();
        assert!(!state.is_story_expanded("a"));
        assert!(!state.is_story_expanded("b"));
    }
}
