//! Fencing: ranking-round victories and direct-elimination placements.

use crate::logic::is_bracket_complete;
use crate::models::{AthleteId, BracketError, DEBracket, DEMatch};
use std::collections::{BTreeMap, BTreeSet};

/// Points for exactly hitting the victory threshold.
const RANKING_BASE_POINTS: i32 = 250;

/// Value of one victory above or below the threshold, by total bouts fenced:
/// `(min bouts, max bouts, points per victory)`. Ranges are contiguous and ascending.
const VICTORY_VALUES: [(u32, u32, i32); 6] = [
    (0, 12, 8),
    (13, 23, 7),
    (24, 29, 6),
    (30, 35, 5),
    (36, 43, 4),
    (44, u32::MAX, 3),
];

/// Direct-elimination points by final placement (index 0 is 1st place).
const DE_PLACEMENT_POINTS: [i32; 18] = [
    250, 244, 238, 236, 230, 228, 226, 224, 218, 216, 214, 212, 210, 208, 206, 204, 198, 196,
];

/// Points per victory for a ranking round of `total_bouts` bouts.
pub fn victory_value(total_bouts: u32) -> i32 {
    VICTORY_VALUES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&total_bouts))
        .map(|&(_, _, v)| v)
        .unwrap_or(3)
}

/// 70% of the bouts, rounded half-up.
pub fn victory_threshold(total_bouts: u32) -> i32 {
    ((u64::from(total_bouts) * 7 + 5) / 10) as i32
}

/// `250 + (victories - threshold) * value`. Not clamped: a weak round can go below zero.
pub fn fencing_ranking_points(victories: u32, total_bouts: u32) -> i32 {
    let diff = victories as i32 - victory_threshold(total_bouts);
    RANKING_BASE_POINTS + diff * victory_value(total_bouts)
}

/// Points for a direct-elimination placement; `None` or a placement past the table scores 0.
pub fn fencing_de_points(placement: Option<u32>) -> i32 {
    placement
        .and_then(|p| p.checked_sub(1))
        .and_then(|i| DE_PLACEMENT_POINTS.get(i as usize))
        .copied()
        .unwrap_or(0)
}

/// DE points for every athlete of a finished bracket.
///
/// An athlete knocked out in their first real bout (a bye does not count) scores 0 whatever
/// their placement. The final is exempt: its loser always takes the runner-up points.
pub fn de_scores(bracket: &DEBracket) -> Result<BTreeMap<AthleteId, i32>, BracketError> {
    if !is_bracket_complete(bracket) {
        return Err(BracketError::Incomplete);
    }
    let first_bout_losers = first_bout_losers(bracket);
    Ok(bracket
        .placements
        .iter()
        .map(|(&id, &place)| {
            let points = if first_bout_losers.contains(&id) {
                0
            } else {
                fencing_de_points(Some(place))
            };
            (id, points)
        })
        .collect())
}

/// Athletes who lost the first non-bye bout they fenced, outside the final.
fn first_bout_losers(bracket: &DEBracket) -> BTreeSet<AthleteId> {
    let mut fenced = BTreeSet::new();
    let mut losers = BTreeSet::new();
    let before_final = bracket.rounds.len().saturating_sub(1);
    for round in &bracket.rounds[..before_final] {
        let bouts = || round.iter().filter(|m| !m.is_bye);
        for loser in bouts().filter_map(DEMatch::loser) {
            if !fenced.contains(&loser.athlete_id) {
                losers.insert(loser.athlete_id);
            }
        }
        fenced.extend(bouts().flat_map(|m| m.athletes()).map(|a| a.athlete_id));
    }
    losers
}
