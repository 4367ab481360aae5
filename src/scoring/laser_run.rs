//! Laser run: one point per second against a target time, and the handicap start.

use crate::models::{AgeCategory, AthleteId};
use serde::{Deserialize, Serialize};

const BASE_POINTS: i32 = 500;

/// Finish time worth exactly 500 points, by category.
pub fn target_seconds(category: AgeCategory) -> u32 {
    match category {
        AgeCategory::U11 => 8 * 60,
        AgeCategory::U13 => 10 * 60,
        AgeCategory::U15 => 11 * 60,
        AgeCategory::U17 => 12 * 60,
        AgeCategory::Senior => 12 * 60 + 30,
    }
}

/// `500 + (target - finish)`.
pub fn laser_run_points(finish_seconds: u32, category: AgeCategory) -> i32 {
    BASE_POINTS + target_seconds(category) as i32 - finish_seconds as i32
}

/// Start slot for one athlete in a handicap start.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandicapStart {
    pub athlete_id: AthleteId,
    /// 1-based position in the start list.
    pub start_order: u32,
    /// Seconds after the leader's start; one second per point behind.
    pub start_delay_seconds: u32,
    /// 1-based start gate.
    pub gate: u32,
}

/// Start list from cumulative totals before the laser run.
///
/// The leader starts at 0 and every other athlete starts one second later per point of deficit,
/// so the first across the line leads overall. Ties keep input order. Athletes are spread over
/// `gates` start gates in start order (at least one gate).
pub fn handicap_starts(totals: &[(AthleteId, i32)], gates: u32) -> Vec<HandicapStart> {
    let mut order: Vec<&(AthleteId, i32)> = totals.iter().collect();
    order.sort_by(|a, b| b.1.cmp(&a.1));
    let leader = match order.first() {
        Some(&&(_, total)) => total,
        None => return Vec::new(),
    };
    let gates = gates.max(1);
    order
        .into_iter()
        .enumerate()
        .map(|(i, &(athlete_id, total))| HandicapStart {
            athlete_id,
            start_order: i as u32 + 1,
            start_delay_seconds: (leader - total).unsigned_abs(),
            gate: i as u32 % gates + 1,
        })
        .collect()
}
