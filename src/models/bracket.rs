//! Direct-elimination bracket: seeds, matches, the bracket itself and its errors.

use crate::models::athlete::{
    AgeCategory, AthleteId, CompetitionGroupId, EventId, Gender, UnknownCategory,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a bracket match.
pub type MatchId = Uuid;

/// Errors raised by bracket operations. None of them are retried by the engine.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BracketError {
    #[error("Need at least 2 competitors for a bracket (got {0})")]
    NotEnoughCompetitors(usize),
    #[error("Match {0} not found")]
    MatchNotFound(MatchId),
    #[error("Match {0} is a bye and cannot take a result")]
    ByeMatch(MatchId),
    #[error("Match {0} does not have two athletes yet")]
    MissingAthletes(MatchId),
    #[error("Athlete {winner_id} is not in match {match_id}")]
    WinnerNotInMatch {
        match_id: MatchId,
        winner_id: AthleteId,
    },
    #[error("Scores are tied at {0}; a bout needs a strict winner")]
    TiedScore(u32),
    #[error("Bracket is not complete")]
    Incomplete,
    #[error("Malformed bracket: {0}")]
    Malformed(String),
}

/// A seeded qualifier for the elimination phase. Seed 1 is the best.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DEBracketSeed {
    pub athlete_id: AthleteId,
    pub seed: u32,
    pub athlete_name: String,
}

/// An athlete occupying a bracket slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketEntrant {
    pub athlete_id: AthleteId,
    pub seed: u32,
    pub name: String,
}

impl From<&DEBracketSeed> for BracketEntrant {
    fn from(s: &DEBracketSeed) -> Self {
        Self {
            athlete_id: s.athlete_id,
            seed: s.seed,
            name: s.athlete_name.clone(),
        }
    }
}

/// A single bout in the tableau. Scores are `None` until played (and stay `None` for byes).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DEMatch {
    pub id: MatchId,
    pub athlete_1: Option<BracketEntrant>,
    pub athlete_2: Option<BracketEntrant>,
    pub score_1: Option<u32>,
    pub score_2: Option<u32>,
    pub winner_id: Option<AthleteId>,
    pub is_bye: bool,
}

impl DEMatch {
    /// A match whose slots are filled later by winners of the previous round.
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            athlete_1: None,
            athlete_2: None,
            score_1: None,
            score_2: None,
            winner_id: None,
            is_bye: false,
        }
    }

    /// Round-0 match between two entrants.
    pub fn new(athlete_1: BracketEntrant, athlete_2: BracketEntrant) -> Self {
        Self {
            athlete_1: Some(athlete_1),
            athlete_2: Some(athlete_2),
            ..Self::empty()
        }
    }

    /// Bye: the lone entrant is already the winner.
    pub fn bye(athlete: BracketEntrant) -> Self {
        Self {
            winner_id: Some(athlete.athlete_id),
            athlete_1: Some(athlete),
            is_bye: true,
            ..Self::empty()
        }
    }

    pub fn has_athlete(&self, id: AthleteId) -> bool {
        self.athletes().any(|a| a.athlete_id == id)
    }

    pub fn athletes(&self) -> impl Iterator<Item = &BracketEntrant> {
        self.athlete_1.iter().chain(self.athlete_2.iter())
    }

    pub fn winner(&self) -> Option<&BracketEntrant> {
        let id = self.winner_id?;
        self.athletes().find(|a| a.athlete_id == id)
    }

    /// Has a winner who is still one of its athletes.
    pub fn is_decided(&self) -> bool {
        self.winner().is_some()
    }

    /// The beaten athlete of a decided, non-bye match.
    pub fn loser(&self) -> Option<&BracketEntrant> {
        if self.is_bye {
            return None;
        }
        let id = self.winner()?.athlete_id;
        self.athletes().find(|a| a.athlete_id != id)
    }
}

/// One submitted bout result.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_id: MatchId,
    pub winner_id: AthleteId,
    pub score_1: u32,
    pub score_2: u32,
}

/// Full single-elimination state for one (phase, gender, age category) group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DEBracket {
    pub event_id: EventId,
    /// Smallest power of two >= `num_competitors`.
    pub tableau_size: u32,
    pub num_competitors: u32,
    /// `rounds[r]` holds `tableau_size / 2^(r+1)` matches; the last round is the final.
    pub rounds: Vec<Vec<DEMatch>>,
    /// Empty until the bracket is complete.
    pub placements: BTreeMap<AthleteId, u32>,
}

impl DEBracket {
    pub fn final_match(&self) -> Option<&DEMatch> {
        self.rounds.last().and_then(|r| r.first())
    }

    /// (round, index) of a match.
    pub fn find_match(&self, match_id: MatchId) -> Option<(usize, usize)> {
        self.rounds.iter().enumerate().find_map(|(r, round)| {
            round
                .iter()
                .position(|m| m.id == match_id)
                .map(|i| (r, i))
        })
    }

    pub fn get_match(&self, match_id: MatchId) -> Option<&DEMatch> {
        let (r, i) = self.find_match(match_id)?;
        Some(&self.rounds[r][i])
    }

    /// Every athlete seeded into this bracket.
    pub fn athlete_ids(&self) -> BTreeSet<AthleteId> {
        self.rounds
            .first()
            .into_iter()
            .flatten()
            .flat_map(|m| m.athletes())
            .map(|a| a.athlete_id)
            .collect()
    }
}

/// Which bracket of an event a group owns: gender and age category.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct BracketKey {
    pub gender: Gender,
    pub age_category: AgeCategory,
}

impl BracketKey {
    pub fn new(gender: Gender, age_category: AgeCategory) -> Self {
        Self {
            gender,
            age_category,
        }
    }

    /// Stable id of this group within an event (name-based uuid under the event id).
    pub fn group_id(&self, event_id: EventId) -> CompetitionGroupId {
        Uuid::new_v5(&event_id, self.to_string().as_bytes())
    }
}

/// Storage form: `"gender:age_category"`.
impl fmt::Display for BracketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.gender, self.age_category)
    }
}

impl FromStr for BracketKey {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (gender, age) = s
            .split_once(':')
            .ok_or_else(|| UnknownCategory(s.to_string()))?;
        Ok(Self::new(gender.parse()?, age.parse()?))
    }
}
