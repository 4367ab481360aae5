//! Riding (senior category only): 300 points minus fault penalties.

use crate::models::RidingFaults;
use serde::{Deserialize, Serialize};

const BASE_POINTS: i32 = 300;

/// Cost of each fault type on the 300-point scale.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RidingPenaltySchedule {
    pub knockdown: i32,
    /// Cost of the 1st, 2nd, and every further disobedience.
    pub disobedience: [i32; 3],
    pub per_second_over: i32,
    pub other_infringement: i32,
}

impl Default for RidingPenaltySchedule {
    fn default() -> Self {
        Self {
            knockdown: 7,
            disobedience: [10, 15, 25],
            per_second_over: 1,
            other_infringement: 10,
        }
    }
}

impl RidingPenaltySchedule {
    /// Sum of all penalties for a round.
    pub fn total_penalty(&self, faults: &RidingFaults) -> i32 {
        let disobedience: i32 = (0..faults.disobediences as usize)
            .map(|k| self.disobedience[k.min(2)])
            .sum();
        faults.knockdowns as i32 * self.knockdown
            + disobedience
            + faults.seconds_over as i32 * self.per_second_over
            + faults.other_infringements as i32 * self.other_infringement
    }
}

/// `300 - total penalty`, not clamped.
pub fn riding_points(faults: &RidingFaults, schedule: &RidingPenaltySchedule) -> i32 {
    BASE_POINTS - schedule.total_penalty(faults)
}
