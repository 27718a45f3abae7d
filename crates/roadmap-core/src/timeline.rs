//! Timeline framing types shared by the engine and its consumers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DataError;

/// Calendar unit framing the visible window
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Month,
    Quarter,
    Year,
}

impl Granularity {
    /// Number of calendar months in one unit
    pub fn months(&self) -> u32 {
        match self {
            Granularity::Month => 1,
            Granularity::Quarter => 3,
            Granularity::Year => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Granularity {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" | "mois" => Ok(Granularity::Month),
            "quarter" | "trimestre" => Ok(Granularity::Quarter),
            "year" | "annee" | "année" => Ok(Granularity::Year),
            _ => Err(DataError::InvalidGranularity(s.to_string())),
        }
    }
}

/// Navigation direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Previous,
    Next,
}

impl std::str::FromStr for Direction {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" | "prev" => Ok(Direction::Previous),
            "next" => Ok(Direction::Next),
            _ => Err(DataError::InvalidDirection(s.to_string())),
        }
    }
}

/// The concrete interval currently displayed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    /// First visible day
    pub start_date: NaiveDate,
    /// Last visible day (inclusive)
    pub end_date: NaiveDate,
    /// Visible days, both endpoints included
    pub total_days: i64,
    /// Human label, e.g. "Janvier 2025"
    pub label: String,
}

impl TimelineWindow {
    /// `date` falls inside the window, boundaries included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// `[start, end]` touches the window by at least one day
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        end >= self.start_date && start <= self.end_date
    }
}
