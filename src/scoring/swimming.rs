//! Swimming: time against a per-category base, scored in fixed time bands.

use crate::models::{AgeCategory, Gender};

const BASE_POINTS: i32 = 250;

/// Distance, base time and band width for one category.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SwimStandard {
    pub distance_m: u32,
    /// Time worth exactly 250 points.
    pub base_hundredths: u32,
    /// Width of one point band.
    pub band_hundredths: u32,
}

impl SwimStandard {
    const fn new(distance_m: u32, base_hundredths: u32, band_hundredths: u32) -> Self {
        Self {
            distance_m,
            base_hundredths,
            band_hundredths,
        }
    }
}

const fn hundredths(minutes: u32, seconds: u32) -> u32 {
    (minutes * 60 + seconds) * 100
}

const U11: SwimStandard = SwimStandard::new(50, hundredths(0, 45), 100);
const U13: SwimStandard = SwimStandard::new(100, hundredths(1, 25), 100);
const U15: SwimStandard = SwimStandard::new(100, hundredths(1, 15), 50);
const U17: SwimStandard = SwimStandard::new(200, hundredths(2, 30), 50);
const SENIOR_MALE: SwimStandard = SwimStandard::new(200, hundredths(2, 30), 50);
const SENIOR_FEMALE: SwimStandard = SwimStandard::new(200, hundredths(2, 40), 50);

/// Standard for a category; gender only matters for seniors.
pub fn swim_standard(category: AgeCategory, gender: Gender) -> SwimStandard {
    match (category, gender) {
        (AgeCategory::U11, _) => U11,
        (AgeCategory::U13, _) => U13,
        (AgeCategory::U15, _) => U15,
        (AgeCategory::U17, _) => U17,
        (AgeCategory::Senior, Gender::Male) => SENIOR_MALE,
        (AgeCategory::Senior, Gender::Female) => SENIOR_FEMALE,
    }
}

/// `250 - floor((t - base) / band)`. Beating the base by any fraction of a band earns a point.
pub fn swimming_points(time_hundredths: u32, category: AgeCategory, gender: Gender) -> i32 {
    let std = swim_standard(category, gender);
    let d = i64::from(time_hundredths) - i64::from(std.base_hundredths);
    BASE_POINTS - d.div_euclid(i64::from(std.band_hundredths)) as i32
}
