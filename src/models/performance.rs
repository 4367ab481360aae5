//! Raw performance submissions and the scores computed from them.

use crate::models::athlete::{AgeCategory, AthleteId, Gender};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scored discipline (fencing is split by phase).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    FencingRanking,
    FencingDe,
    Obstacle,
    Swimming,
    LaserRun,
    Riding,
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Discipline::FencingRanking => "fencing_ranking",
            Discipline::FencingDe => "fencing_de",
            Discipline::Obstacle => "obstacle",
            Discipline::Swimming => "swimming",
            Discipline::LaserRun => "laser_run",
            Discipline::Riding => "riding",
        };
        f.write_str(s)
    }
}

/// Fault counts for one riding round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RidingFaults {
    pub knockdowns: u32,
    /// Disobediences (refusals, run-outs); the cost escalates with each repeat.
    pub disobediences: u32,
    /// Whole seconds over the time allowed.
    pub seconds_over: u32,
    pub other_infringements: u32,
}

/// Discipline-specific raw measurement.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "discipline", rename_all = "snake_case")]
pub enum Measurement {
    FencingRanking { victories: u32, total_bouts: u32 },
    /// `None` when the athlete has no placement (eliminated in the initial bout).
    FencingDe { placement: Option<u32> },
    /// `failures` holds one entry per obstacle failed at least once: the number of failures there.
    Obstacle { time_hundredths: u32, failures: Vec<u8> },
    Swimming { time_hundredths: u32 },
    LaserRun { finish_seconds: u32 },
    Riding(RidingFaults),
}

impl Measurement {
    pub fn discipline(&self) -> Discipline {
        match self {
            Measurement::FencingRanking { .. } => Discipline::FencingRanking,
            Measurement::FencingDe { .. } => Discipline::FencingDe,
            Measurement::Obstacle { .. } => Discipline::Obstacle,
            Measurement::Swimming { .. } => Discipline::Swimming,
            Measurement::LaserRun { .. } => Discipline::LaserRun,
            Measurement::Riding(_) => Discipline::Riding,
        }
    }
}

/// One scoring submission: a measurement plus the athlete context banded formulas need.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PerformanceInput {
    pub athlete_id: AthleteId,
    pub gender: Gender,
    pub age_category: AgeCategory,
    pub measurement: Measurement,
}

/// Output of a calculator. Recompute from a new input rather than editing.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CalculatedScore {
    pub athlete_id: AthleteId,
    pub discipline: Discipline,
    pub points: i32,
    /// The raw fields the points were computed from.
    pub input: Measurement,
}
