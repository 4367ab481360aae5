//! Obstacle discipline: time against a 15.00 s par, minus failure penalties.

const BASE_POINTS: i32 = 400;
const PAR_HUNDREDTHS: i64 = 1_500;
/// One point per 0.33 s.
const BAND_HUNDREDTHS: i64 = 33;
const FAILURE_PENALTY: i32 = 10;

/// A second failure on the same obstacle ends the attempt.
pub fn is_eliminated(failures: &[u8]) -> bool {
    failures.iter().any(|&f| f >= 2)
}

/// `400 - round((t - 15.00) / 0.33) - 10 * obstacles failed once`, or 0 if eliminated.
pub fn obstacle_points(time_hundredths: u32, failures: &[u8]) -> i32 {
    if is_eliminated(failures) {
        return 0;
    }
    let d = i64::from(time_hundredths) - PAR_HUNDREDTHS;
    // Nearest integer of d / 33; 33 is odd so there are no ties.
    let bands = (2 * d + BAND_HUNDREDTHS).div_euclid(2 * BAND_HUNDREDTHS) as i32;
    let failed_once = failures.iter().filter(|&&f| f == 1).count() as i32;
    BASE_POINTS - bands - FAILURE_PENALTY * failed_once
}
