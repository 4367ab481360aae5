//! Modern pentathlon scoring engine: discipline calculators, ranking-round bout orders,
//! direct-elimination brackets and score change notifications.

pub mod logic;
pub mod models;
pub mod notify;
pub mod scoring;

pub use logic::{
    advance_winner, calculate_final_placements, deserialize_bracket, generate_bout_order,
    generate_de_bracket, is_bracket_complete, retract_result, seeds_from_ranking,
    serialize_bracket, BoutOrder, BoutPair, BracketBook,
};
pub use models::{
    AgeCategory, AthleteId, BracketEntrant, BracketError, BracketKey, CalculatedScore,
    CompetitionGroupId, DEBracket, DEBracketSeed, DEMatch, Discipline, EventId, Gender, MatchId,
    MatchResult, Measurement, PerformanceInput, RankingResult, RidingFaults,
};
pub use notify::{ScoreChangeEvent, ScoreNotifier, SubscriberId};
pub use scoring::{calculate, calculate_with, RidingPenaltySchedule};
