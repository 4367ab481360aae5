//! Seeding: turn ranking-round tallies into the elimination seed list.

use crate::models::{DEBracketSeed, RankingResult};

/// Sort by points, then victories (both descending) and number seeds from 1.
/// Athletes level on both keep the order they were given in.
pub fn seeds_from_ranking(results: &[RankingResult]) -> Vec<DEBracketSeed> {
    let mut ranked: Vec<&RankingResult> = results.iter().collect();
    ranked.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.victories.cmp(&a.victories))
    });
    ranked
        .into_iter()
        .enumerate()
        .map(|(i, r)| DEBracketSeed {
            athlete_id: r.athlete_id,
            seed: i as u32 + 1,
            athlete_name: r.athlete_name.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_by_points_then_victories() {
        let results = vec![
            RankingResult::new("C", 10, 250),
            RankingResult::new("A", 14, 278),
            RankingResult::new("B", 12, 250),
            RankingResult::new("D", 10, 250),
        ];
        let seeds = seeds_from_ranking(&results);
        let names: Vec<_> = seeds.iter().map(|s| s.athlete_name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        let numbers: Vec<_> = seeds.iter().map(|s| s.seed).collect();
        assert_eq!(numbers, [1, 2, 3, 4]);
    }
}
