//! Sprint progress rollups

use roadmap_core::{Sprint, Story};
use serde::{Deserialize, Serialize};

/// Story and point counts of one sprint
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintStats {
    pub total_stories: usize,
    pub completed_stories: usize,
    pub total_points: f64,
    pub completed_points: f64,
    /// Completed points over total points, rounded; 0 when there are no points
    pub progress_percent: u8,
}

/// Aggregate of the sprints in a view
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapTotals {
    pub sprints: usize,
    pub total_stories: usize,
    pub completed_stories: usize,
    pub total_points: f64,
    pub completed_points: f64,
    pub progress_percent: u8,
}

/// Roll up the stories referenced by `sprint`. A story counts as completed
/// when its status is `done`; missing estimations weigh zero points.
pub fn sprint_stats(sprint: &Sprint, stories: &[Story]) -> SprintStats {
    let sprint_stories = sprint
        .story_ids
        .iter()
        .filter_map(|id| stories.iter().find(|story| &story.id == id));
    stats_for(sprint_stories)
}

/// Roll up an arbitrary set of stories
pub fn stats_for<'a>(stories: impl IntoIterator<Item = &'a Story>) -> SprintStats {
    let mut stats = SprintStats::default();
    for story in stories {
        let points = story.points();
        stats.total_stories += 1;
        stats.total_points += points;
        if story.is_done() {
            stats.completed_stories += 1;
            stats.completed_points += points;
        }
    }
    stats.progress_percent = progress_percent(stats.completed_points, stats.total_points);
    stats
}

/// Sum the per-sprint stats of a view
pub fn roadmap_totals<'a>(stats: impl IntoIterator<Item = &'a SprintStats>) -> RoadmapTotals {
    let mut totals = RoadmapTotals::default();
    for s in stats {
        totals.sprints += 1;
        totals.total_stories += s.total_stories;
        totals.completed_stories += s.completed_stories;
        totals.total_points += s.total_points;
        totals.completed_points += s.completed_points;
    }
    totals.progress_percent = progress_percent(totals.completed_points, totals.total_points);
    totals
}

/// `round(completed / total × 100)`, 0 when `total` is zero
pub fn progress_percent(completed: f64, total: f64) -> u8 {
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }
    (completed / total * 100.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use roadmap_core::StoryStatus;

    fn sprint(ids: &[&str]) -> Sprint {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        ids.iter()
            .fold(Sprint::new("s1", day, day), |sprint, id| sprint.story(*id))
    }

    #[test]
    fn counts_done_stories_and_points() {
        let stories = vec![
            Story::new("a").estimation(3.0).status(StoryStatus::Done),
            Story::new("b").estimation(5.0).status(StoryStatus::InProgress),
            Story::new("c").status(StoryStatus::Done),
            Story::new("unrelated").estimation(40.0).status(StoryStatus::Done),
        ];
        let stats = sprint_stats(&sprint(&["a", "b", "c", "missing"]), &stories);

        assert_eq!(stats.total_stories, 3);
        assert_eq!(stats.completed_stories, 2);
        assert_eq!(stats.total_points, 8.0);
        assert_eq!(stats.completed_points, 3.0);
        assert_eq!(stats.progress_percent, 38);
    }

    #[test]
    fn zero_points_means_zero_progress() {
        let stories = vec![
            Story::new("a").status(StoryStatus::Done),
            Story::new("b").estimation(0.0).status(StoryStatus::Done),
        ];
        let stats = sprint_stats(&sprint(&["a", "b"]), &stories);
        assert_eq!(stats.completed_stories, 2);
        assert_eq!(stats.progress_percent, 0);

        let empty = sprint_stats(&sprint(&[]), &stories);
        assert_eq!(empty, SprintStats::default());
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(progress_percent(1.0, 8.0), 13);
        assert_eq!(progress_percent(4.0, 8.0), 50);
        assert_eq!(progress_percent(8.0, 8.0), 100);
        assert_eq!(progress_percent(1.0, 0.0), 0);
    }

    #[test]
    fn totals_aggregate_points_not_percentages() {
        let a = SprintStats {
            total_stories: 2,
            completed_stories: 2,
            total_points: 2.0,
            completed_points: 2.0,
            progress_percent: 100,
        };
        let b = SprintStats {
            total_stories: 1,
            completed_stories: 0,
            total_points: 6.0,
            completed_points: 0.0,
            progress_percent: 0,
        };
        let totals = roadmap_totals([&a, &b]);
        assert_eq!(totals.sprints, 2);
        assert_eq!(totals.total_stories, 3);
        assert_eq!(totals.total_points, 8.0);
        assert_eq!(totals.progress_percent, 25);
    }
}
