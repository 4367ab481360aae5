//! Domain models: athletes, performances and brackets.

mod athlete;
mod bracket;
mod performance;

pub use athlete::{
    AgeCategory, AthleteId, CompetitionGroupId, EventId, Gender, RankingResult, UnknownCategory,
};
pub use bracket::{
    BracketEntrant, BracketError, BracketKey, DEBracket, DEBracketSeed, DEMatch, MatchId,
    MatchResult,
};
pub use performance::{CalculatedScore, Discipline, Measurement, PerformanceInput, RidingFaults};
