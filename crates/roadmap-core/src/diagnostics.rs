//! Data-quality diagnostics
//!
//! The engine never fails on bad records. Instead it lays out what it can and
//! reports each problem as a `DataIssue` next to the derived output, so the
//! host can surface or log it.

use serde::{Deserialize, Serialize};

/// Kind of data-quality problem
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// An entity ends before it starts; drawn as a one-day bar at its start
    DegenerateInterval,
    /// A sprint references a product that does not exist
    MissingProduct,
    /// A sprint references a team that does not exist
    MissingTeam,
    /// A sprint lists a story id that does not exist
    MissingStory,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::DegenerateInterval => "degenerate-interval",
            IssueKind::MissingProduct => "missing-product",
            IssueKind::MissingTeam => "missing-team",
            IssueKind::MissingStory => "missing-story",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single data-quality finding
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIssue {
    pub kind: IssueKind,
    /// Id of the entity carrying the bad data
    pub entity_id: String,
    pub message: String,
}

impl DataIssue {
    pub fn new(kind: IssueKind, entity_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.entity_id, self.message)
    }
}
