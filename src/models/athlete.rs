//! Athlete identity and the category context that banded formulas depend on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for an athlete (used in brackets, scores and events).
pub type AthleteId = Uuid;

/// Unique identifier for a competition event (one bracket slot per event and phase).
pub type EventId = Uuid;

/// Unique identifier for a competition group (the scope of a score change).
pub type CompetitionGroupId = Uuid;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Age category, youngest first. `Senior` is the oldest category and the only one that rides.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    U11,
    U13,
    U15,
    U17,
    Senior,
}

impl AgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeCategory::U11 => "u11",
            AgeCategory::U13 => "u13",
            AgeCategory::U15 => "u15",
            AgeCategory::U17 => "u17",
            AgeCategory::Senior => "senior",
        }
    }

    pub fn is_oldest(&self) -> bool {
        *self == AgeCategory::Senior
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u11" => Ok(AgeCategory::U11),
            "u13" => Ok(AgeCategory::U13),
            "u15" => Ok(AgeCategory::U15),
            "u17" => Ok(AgeCategory::U17),
            "senior" => Ok(AgeCategory::Senior),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// A gender or age category string that matches no known value.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

/// One athlete's ranking-phase tally, as handed over by the results store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub athlete_id: AthleteId,
    pub athlete_name: String,
    pub victories: u32,
    /// Ranking-phase MP points (from `fencing_ranking_points`).
    pub points: i32,
}

impl RankingResult {
    pub fn new(athlete_name: impl Into<String>, victories: u32, points: i32) -> Self {
        Self {
            athlete_id: Uuid::new_v4(),
            athlete_name: athlete_name.into(),
            victories,
            points,
        }
    }
}
