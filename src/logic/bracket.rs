//! Direct elimination: seeded single-elimination bracket, bout results and final placements.

use crate::models::{
    AthleteId, BracketEntrant, BracketError, DEBracket, DEBracketSeed, DEMatch, EventId, MatchId,
    MatchResult,
};
use std::collections::BTreeMap;

/// Seed ranks (1-based) in bracket slot order for a tableau of `size` (a power of two).
///
/// Each adjacent pair sums to `size + 1`, so 1 meets the weakest qualifier, and seeds 1 and 2
/// sit in opposite halves (1-4 in different quarters, and so on).
pub fn seeding_order(size: usize) -> Vec<usize> {
    let mut order = vec![1];
    while order.len() < size {
        let n = order.len() * 2;
        order = order.iter().flat_map(|&s| [s, n + 1 - s]).collect();
    }
    order
}

/// Build a bracket from seeds (any order; ranked by seed number).
///
/// Missing slots become byes for the best seeds. Byes are resolved straight away and their
/// athletes already sit in round 1.
pub fn generate_de_bracket(
    event_id: EventId,
    seeds: &[DEBracketSeed],
) -> Result<DEBracket, BracketError> {
    if seeds.len() < 2 {
        return Err(BracketError::NotEnoughCompetitors(seeds.len()));
    }
    let mut ranked: Vec<&DEBracketSeed> = seeds.iter().collect();
    ranked.sort_by_key(|s| s.seed);

    let size = ranked.len().next_power_of_two();
    let entrant = |rank: usize| ranked.get(rank - 1).map(|s| BracketEntrant::from(*s));

    let first_round: Vec<DEMatch> = seeding_order(size)
        .chunks_exact(2)
        .map(|pair| {
            // pair[0] <= size / 2 < competitors, so the upper slot is always filled.
            let top = BracketEntrant::from(ranked[pair[0] - 1]);
            match entrant(pair[1]) {
                Some(other) => DEMatch::new(top, other),
                None => DEMatch::bye(top),
            }
        })
        .collect();

    let mut rounds = vec![first_round];
    let mut len = size / 4;
    while len >= 1 {
        rounds.push((0..len).map(|_| DEMatch::empty()).collect());
        len /= 2;
    }

    let mut bracket = DEBracket {
        event_id,
        tableau_size: size as u32,
        num_competitors: ranked.len() as u32,
        rounds,
        placements: BTreeMap::new(),
    };

    let byes: Vec<usize> = bracket.rounds[0]
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_bye)
        .map(|(i, _)| i)
        .collect();
    for &i in &byes {
        propagate_winner(&mut bracket, 0, i);
    }

    log::debug!(
        "Generated bracket for event {}: {} competitors, tableau {}, {} byes",
        event_id,
        bracket.num_competitors,
        size,
        byes.len()
    );
    Ok(bracket)
}

/// Copy a decided match's winner into its slot in the next round (slot 1 for even indexes).
fn propagate_winner(bracket: &mut DEBracket, round: usize, index: usize) {
    let Some(winner) = bracket.rounds[round][index].winner().cloned() else {
        return;
    };
    let next = bracket
        .rounds
        .get_mut(round + 1)
        .and_then(|r| r.get_mut(index / 2));
    if let Some(next) = next {
        if index % 2 == 0 {
            next.athlete_1 = Some(winner);
        } else {
            next.athlete_2 = Some(winner);
        }
    }
}

/// Record a bout result and move the winner on.
///
/// Re-submitting a decided match overwrites it and re-propagates the (possibly new) winner, but
/// results already entered further down the bracket are left alone; use [`retract_result`] to
/// clear them.
pub fn advance_winner(bracket: &mut DEBracket, result: &MatchResult) -> Result<(), BracketError> {
    let (round, index) = bracket
        .find_match(result.match_id)
        .ok_or(BracketError::MatchNotFound(result.match_id))?;
    let m = &mut bracket.rounds[round][index];
    if m.is_bye {
        return Err(BracketError::ByeMatch(m.id));
    }
    if m.athlete_1.is_none() || m.athlete_2.is_none() {
        return Err(BracketError::MissingAthletes(m.id));
    }
    if !m.has_athlete(result.winner_id) {
        return Err(BracketError::WinnerNotInMatch {
            match_id: m.id,
            winner_id: result.winner_id,
        });
    }
    if result.score_1 == result.score_2 {
        return Err(BracketError::TiedScore(result.score_1));
    }

    m.score_1 = Some(result.score_1);
    m.score_2 = Some(result.score_2);
    m.winner_id = Some(result.winner_id);
    log::debug!(
        "Round {} match {}: {} won {}-{}",
        round,
        m.id,
        result.winner_id,
        result.score_1,
        result.score_2
    );

    propagate_winner(bracket, round, index);
    refresh_placements(bracket);
    Ok(())
}

/// Clear a match's result, take its winner out of the next round, and clear every result that
/// depended on it.
pub fn retract_result(bracket: &mut DEBracket, match_id: MatchId) -> Result<(), BracketError> {
    let (round, index) = bracket
        .find_match(match_id)
        .ok_or(BracketError::MatchNotFound(match_id))?;
    if bracket.rounds[round][index].is_bye {
        return Err(BracketError::ByeMatch(match_id));
    }
    clear_from(bracket, round, index);
    refresh_placements(bracket);
    log::debug!("Retracted result of match {} and its dependents", match_id);
    Ok(())
}

fn clear_from(bracket: &mut DEBracket, round: usize, index: usize) {
    let m = &mut bracket.rounds[round][index];
    m.score_1 = None;
    m.score_2 = None;
    if m.winner_id.take().is_none() {
        return;
    }
    let next_round = round + 1;
    let Some(next) = bracket
        .rounds
        .get_mut(next_round)
        .and_then(|r| r.get_mut(index / 2))
    else {
        return;
    };
    if index % 2 == 0 {
        next.athlete_1 = None;
    } else {
        next.athlete_2 = None;
    }
    clear_from(bracket, next_round, index / 2);
}

/// Keep `placements` in step with completion: filled when complete, empty otherwise.
fn refresh_placements(bracket: &mut DEBracket) {
    bracket.placements = match calculate_final_placements(bracket) {
        Ok(placements) => {
            if let Some(champion) = bracket.final_match().and_then(DEMatch::winner) {
                log::info!(
                    "Bracket for event {} complete, champion {}",
                    bracket.event_id,
                    champion.name
                );
            }
            placements
        }
        Err(_) => BTreeMap::new(),
    };
}

/// True once every match, the final included, is decided by one of its own athletes.
///
/// A match whose recorded winner was displaced by a re-submitted earlier result counts as open
/// again until it is re-entered.
pub fn is_bracket_complete(bracket: &DEBracket) -> bool {
    bracket.final_match().is_some() && bracket.rounds.iter().flatten().all(DEMatch::is_decided)
}

/// Placements of a finished bracket.
///
/// Champion 1, runner-up 2. Losers of a round with `m` matches share places `m+1..=2m`, better
/// seed first; with byes the band is only partly used, so places stay contiguous.
pub fn calculate_final_placements(
    bracket: &DEBracket,
) -> Result<BTreeMap<AthleteId, u32>, BracketError> {
    if !is_bracket_complete(bracket) {
        return Err(BracketError::Incomplete);
    }
    let mut placements = BTreeMap::new();
    if let Some(champion) = bracket.final_match().and_then(DEMatch::winner) {
        placements.insert(champion.athlete_id, 1);
    }
    for round in bracket.rounds.iter().rev() {
        let band_start = round.len() as u32 + 1;
        let mut losers: Vec<&BracketEntrant> = round.iter().filter_map(DEMatch::loser).collect();
        losers.sort_by_key(|a| a.seed);
        for (k, a) in losers.into_iter().enumerate() {
            placements
                .entry(a.athlete_id)
                .or_insert(band_start + k as u32);
        }
    }
    Ok(placements)
}

/// Bracket as JSON text, for storage in a generic text slot.
pub fn serialize_bracket(bracket: &DEBracket) -> Result<String, BracketError> {
    serde_json::to_string(bracket).map_err(|e| BracketError::Malformed(e.to_string()))
}

/// Parse and shape-check a stored bracket. Callers should treat an error as "no bracket".
pub fn deserialize_bracket(text: &str) -> Result<DEBracket, BracketError> {
    let bracket: DEBracket =
        serde_json::from_str(text).map_err(|e| BracketError::Malformed(e.to_string()))?;
    check_shape(&bracket)?;
    Ok(bracket)
}

pub(crate) fn check_shape(bracket: &DEBracket) -> Result<(), BracketError> {
    let malformed = |msg: String| Err(BracketError::Malformed(msg));
    let size = bracket.tableau_size as usize;
    let n = bracket.num_competitors as usize;
    if n < 2 || n.next_power_of_two() != size {
        return malformed(format!("tableau {size} does not fit {n} competitors"));
    }
    let expected_rounds = size.trailing_zeros() as usize;
    if bracket.rounds.len() != expected_rounds {
        return malformed(format!(
            "{} rounds, expected {expected_rounds}",
            bracket.rounds.len()
        ));
    }
    for (r, round) in bracket.rounds.iter().enumerate() {
        if round.len() != size >> (r + 1) {
            return malformed(format!("round {r} has {} matches", round.len()));
        }
        if r > 0 && round.iter().any(|m| m.is_bye) {
            return malformed(format!("bye in round {r}"));
        }
    }
    let byes = bracket.rounds[0].iter().filter(|m| m.is_bye).count();
    if byes != size - n {
        return malformed(format!("{byes} byes, expected {}", size - n));
    }
    Ok(())
}
