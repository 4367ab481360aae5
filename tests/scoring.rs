//! Integration tests for the discipline calculators.

use pentathlon_scoring::scoring::{
    fencing_de_points, fencing_ranking_points, handicap_starts, laser_run_points, obstacle_points,
    riding_points, swimming_points, victory_value,
};
use pentathlon_scoring::{
    calculate, AgeCategory, Discipline, Gender, Measurement, PerformanceInput, RidingFaults,
    RidingPenaltySchedule,
};
use uuid::Uuid;

fn input(age_category: AgeCategory, gender: Gender, measurement: Measurement) -> PerformanceInput {
    PerformanceInput {
        athlete_id: Uuid::new_v4(),
        gender,
        age_category,
        measurement,
    }
}

#[test]
fn ranking_round_example() {
    // threshold round(23 * 0.7) = 16, 7 points per victory
    assert_eq!(victory_value(23), 7);
    assert_eq!(fencing_ranking_points(20, 23), 278);
    assert_eq!(fencing_ranking_points(16, 23), 250);
    assert_eq!(fencing_ranking_points(0, 23), 250 - 16 * 7);
}

#[test]
fn ranking_values_shrink_with_more_bouts() {
    assert_eq!(victory_value(5), 8);
    assert_eq!(victory_value(24), 6);
    assert_eq!(victory_value(35), 5);
    assert_eq!(victory_value(40), 4);
    assert_eq!(victory_value(60), 3);
}

#[test]
fn ranking_points_are_not_clamped() {
    // 200 bouts: threshold 140, 3 points each
    assert_eq!(fencing_ranking_points(0, 200), 250 - 420);
}

#[test]
fn de_placement_table() {
    assert_eq!(fencing_de_points(Some(1)), 250);
    assert_eq!(fencing_de_points(Some(2)), 244);
    assert_eq!(fencing_de_points(Some(4)), 236);
    assert_eq!(fencing_de_points(Some(9)), 218);
    assert_eq!(fencing_de_points(Some(16)), 204);
    assert_eq!(fencing_de_points(Some(18)), 196);
    assert_eq!(fencing_de_points(Some(19)), 0);
    assert_eq!(fencing_de_points(Some(0)), 0);
    assert_eq!(fencing_de_points(None), 0);
}

#[test]
fn obstacle_example_and_penalties() {
    assert_eq!(obstacle_points(1_850, &[]), 389);
    assert_eq!(obstacle_points(1_850, &[1]), 379);
    assert_eq!(obstacle_points(1_850, &[1, 0, 1]), 369);
    // Second failure on one obstacle ends the attempt.
    assert_eq!(obstacle_points(1_850, &[1, 2]), 0);
}

#[test]
fn swimming_bands_by_category() {
    // Times in hundredths: 15_000 is 2:30.00.
    let senior = |t| swimming_points(t, AgeCategory::Senior, Gender::Male);
    assert_eq!(senior(15_000), 250);
    assert_eq!(senior(15_049), 250);
    assert_eq!(senior(15_050), 249);
    assert_eq!(senior(15_100), 248);
    // Any fraction under the base earns the next point.
    assert_eq!(senior(14_999), 251);

    assert_eq!(swimming_points(16_000, AgeCategory::Senior, Gender::Female), 250);
    assert_eq!(swimming_points(16_000, AgeCategory::Senior, Gender::Male), 230);

    // Younger: 50 m, one point per full second.
    assert_eq!(swimming_points(4_500, AgeCategory::U11, Gender::Female), 250);
    assert_eq!(swimming_points(4_650, AgeCategory::U11, Gender::Male), 249);
    assert_eq!(
        swimming_points(4_650, AgeCategory::U11, Gender::Male),
        swimming_points(4_650, AgeCategory::U11, Gender::Female)
    );
}

#[test]
fn laser_run_one_point_per_second() {
    assert_eq!(laser_run_points(12 * 60 + 30, AgeCategory::Senior), 500);
    assert_eq!(laser_run_points(12 * 60, AgeCategory::Senior), 530);
    assert_eq!(laser_run_points(8 * 60 + 10, AgeCategory::U11), 490);
}

#[test]
fn handicap_start_orders_by_total() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let starts = handicap_starts(&[(a, 800), (b, 790), (c, 812)], 2);
    let got: Vec<_> = starts
        .iter()
        .map(|s| (s.athlete_id, s.start_order, s.start_delay_seconds, s.gate))
        .collect();
    assert_eq!(got, vec![(c, 1, 0, 1), (a, 2, 12, 2), (b, 3, 22, 1)]);
    assert!(handicap_starts(&[], 3).is_empty());
}

#[test]
fn handicap_ties_keep_input_order_and_zero_gates_means_one() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let starts = handicap_starts(&[(a, 700), (b, 700)], 0);
    assert_eq!(starts[0].athlete_id, a);
    assert_eq!(starts[1].start_delay_seconds, 0);
    assert!(starts.iter().all(|s| s.gate == 1));
}

#[test]
fn riding_penalties() {
    let schedule = RidingPenaltySchedule::default();
    assert_eq!(riding_points(&RidingFaults::default(), &schedule), 300);
    let faults = RidingFaults {
        knockdowns: 2,
        disobediences: 1,
        seconds_over: 3,
        other_infringements: 1,
    };
    assert_eq!(riding_points(&faults, &schedule), 300 - 14 - 10 - 3 - 10);
}

#[test]
fn calculate_dispatches_and_keeps_raw_fields() {
    let i = input(
        AgeCategory::Senior,
        Gender::Female,
        Measurement::FencingRanking {
            victories: 20,
            total_bouts: 23,
        },
    );
    let score = calculate(&i);
    assert_eq!(score.athlete_id, i.athlete_id);
    assert_eq!(score.discipline, Discipline::FencingRanking);
    assert_eq!(score.points, 278);
    assert_eq!(score.input, i.measurement);

    let obstacle = input(
        AgeCategory::U15,
        Gender::Male,
        Measurement::Obstacle {
            time_hundredths: 1_850,
            failures: vec![],
        },
    );
    assert_eq!(calculate(&obstacle).points, 389);
}

#[test]
fn riding_only_scores_for_seniors() {
    let faults = Measurement::Riding(RidingFaults {
        knockdowns: 1,
        ..Default::default()
    });
    let senior = input(AgeCategory::Senior, Gender::Male, faults.clone());
    let junior = input(AgeCategory::U17, Gender::Male, faults);
    assert_eq!(calculate(&senior).points, 293);
    assert_eq!(calculate(&junior).points, 0);
    assert_eq!(calculate(&junior).discipline, Discipline::Riding);
}

#[test]
fn measurement_json_is_tagged_by_discipline() {
    let m = Measurement::LaserRun { finish_seconds: 700 };
    let json = serde_json::to_value(&m).unwrap();
    assert_eq!(json["discipline"], "laser_run");
    assert_eq!(json["finish_seconds"], 700);
    let back: Measurement = serde_json::from_value(json).unwrap();
    assert_eq!(back, m);
}
