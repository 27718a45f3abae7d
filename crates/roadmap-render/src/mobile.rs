//! Mobile presentation: one summary card per visible sprint

use chrono::NaiveDate;
use roadmap_core::{ExportError, SprintStatus};
use roadmap_layout::{RoadmapView, SprintLayout, SprintStats};
use serde::{Deserialize, Serialize};

use crate::ViewRenderer;

/// Summary of one sprint for narrow screens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintCard {
    pub id: String,
    pub name: String,
    pub product_label: Option<String>,
    pub team_label: Option<String>,
    pub color: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// `dd/mm/yyyy – dd/mm/yyyy`
    pub period: String,
    pub status: SprintStatus,
    pub stats: SprintStats,
    /// Labels of the stories passing the filters, in sprint order
    pub stories: Vec<String>,
    /// Visible stories left off the card by `max_stories`
    pub hidden_stories: usize,
}

/// Builds sprint cards from a view
#[derive(Clone, Debug, Default)]
pub struct MobileRenderer {
    /// Cap on story labels per card
    pub max_stories: Option<usize>,
}

impl MobileRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// List at most `limit` stories per card
    pub fn max_stories(mut self, limit: usize) -> Self {
        self.max_stories = Some(limit);
        self
    }

    pub fn cards(&self, view: &RoadmapView) -> Vec<SprintCard> {
        view.sprints.iter().map(|sprint| self.card(sprint)).collect()
    }

    fn card(&self, sprint: &SprintLayout) -> SprintCard {
        let limit = self.max_stories.unwrap_or(usize::MAX);
        let stories: Vec<String> = sprint
            .stories
            .iter()
            .take(limit)
            .map(|story| story.label.clone())
            .collect();
        SprintCard {
            id: sprint.id.clone(),
            name: sprint.name.clone(),
            product_label: sprint.product_label.clone(),
            team_label: sprint.team_label.clone(),
            color: sprint.team_color.clone(),
            start_date: sprint.start_date,
            end_date: sprint.end_date,
            period: format!(
                "{} – {}",
                sprint.start_date.format("%d/%m/%Y"),
                sprint.end_date.format("%d/%m/%Y")
            ),
            status: sprint.status,
            stats: sprint.stats,
            hidden_stories: sprint.stories.len() - stories.len(),
            stories,
        }
    }
}

impl ViewRenderer for MobileRenderer {
    type Output = Vec<SprintCard>;

    fn render(&self, view: &RoadmapView) -> Result<Vec<SprintCard>, ExportError> {
        Ok(self.cards(view))
    }
}
