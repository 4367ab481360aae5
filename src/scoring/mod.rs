//! Discipline score calculators. All pure; none of them validate or clamp their inputs.

mod fencing;
mod laser_run;
mod obstacle;
mod riding;
mod swimming;

pub use fencing::{
    de_scores, fencing_de_points, fencing_ranking_points, victory_threshold, victory_value,
};
pub use laser_run::{handicap_starts, laser_run_points, target_seconds, HandicapStart};
pub use obstacle::{is_eliminated, obstacle_points};
pub use riding::{riding_points, RidingPenaltySchedule};
pub use swimming::{swim_standard, swimming_points, SwimStandard};

use crate::models::{CalculatedScore, Measurement, PerformanceInput};

/// Score one submission with the default riding schedule.
pub fn calculate(input: &PerformanceInput) -> CalculatedScore {
    calculate_with(input, &RidingPenaltySchedule::default())
}

/// Score one submission. Riding outside the senior category scores 0.
pub fn calculate_with(input: &PerformanceInput, riding: &RidingPenaltySchedule) -> CalculatedScore {
    let points = match &input.measurement {
        Measurement::FencingRanking {
            victories,
            total_bouts,
        } => fencing_ranking_points(*victories, *total_bouts),
        Measurement::FencingDe { placement } => fencing_de_points(*placement),
        Measurement::Obstacle {
            time_hundredths,
            failures,
        } => obstacle_points(*time_hundredths, failures),
        Measurement::Swimming { time_hundredths } => {
            swimming_points(*time_hundredths, input.age_category, input.gender)
        }
        Measurement::LaserRun { finish_seconds } => {
            laser_run_points(*finish_seconds, input.age_category)
        }
        Measurement::Riding(faults) if input.age_category.is_oldest() => {
            riding_points(faults, riding)
        }
        Measurement::Riding(_) => 0,
    };
    CalculatedScore {
        athlete_id: input.athlete_id,
        discipline: input.measurement.discipline(),
        points,
        input: input.measurement.clone(),
    }
}
