//! Ranking-round bout order: who fences whom, and in which sequence.

/// One scheduled bout between two 1-indexed pool positions.
pub type BoutPair = (usize, usize);

/// Every pairing of a pool, in fencing order.
pub type BoutOrder = Vec<BoutPair>;

const POOL_3: &[BoutPair] = &[(1, 2), (3, 1), (2, 3)];
const POOL_4: &[BoutPair] = &[(1, 4), (2, 3), (1, 3), (2, 4), (3, 4), (1, 2)];
#[rustfmt::skip]
const POOL_5: &[BoutPair] = &[
    (1, 2), (3, 4), (5, 1), (2, 3), (5, 4),
    (1, 3), (2, 5), (4, 1), (3, 5), (4, 2),
];
#[rustfmt::skip]
const POOL_6: &[BoutPair] = &[
    (1, 2), (4, 5), (2, 3), (5, 6), (3, 1),
    (6, 4), (2, 5), (1, 4), (5, 3), (1, 6),
    (4, 2), (3, 6), (5, 1), (3, 4), (6, 2),
];
#[rustfmt::skip]
const POOL_7: &[BoutPair] = &[
    (1, 4), (2, 5), (3, 6), (7, 1), (5, 4), (2, 3), (6, 7),
    (5, 1), (4, 3), (6, 2), (5, 7), (3, 1), (4, 6), (7, 2),
    (3, 5), (1, 6), (2, 4), (7, 3), (6, 5), (1, 2), (4, 7),
];
#[rustfmt::skip]
const POOL_8: &[BoutPair] = &[
    (2, 3), (1, 5), (7, 4), (6, 8), (1, 2), (3, 4), (5, 6),
    (8, 7), (4, 1), (5, 2), (8, 3), (6, 7), (4, 2), (8, 1),
    (7, 5), (3, 6), (2, 8), (5, 4), (6, 1), (3, 7), (4, 8),
    (2, 6), (3, 5), (1, 7), (4, 6), (8, 5), (7, 2), (1, 3),
];

/// Smallest pool size with a curated order.
pub const MIN_CURATED_POOL: usize = 3;

/// Curated orders for pools of `MIN_CURATED_POOL..=MAX_CURATED_POOL`, indexed by size minus the minimum.
/// From five fencers up nobody fences twice in a row.
const CURATED_ORDERS: [&[BoutPair]; 6] = [POOL_3, POOL_4, POOL_5, POOL_6, POOL_7, POOL_8];

/// Largest pool size with a curated order.
pub const MAX_CURATED_POOL: usize = MIN_CURATED_POOL + CURATED_ORDERS.len() - 1;

/// Curated order for a pool of `n`, if there is one.
pub fn curated_bout_order(n: usize) -> Option<&'static [BoutPair]> {
    n.checked_sub(MIN_CURATED_POOL)
        .and_then(|i| CURATED_ORDERS.get(i))
        .copied()
}

/// All pairs in ascending order: (1,2), (1,3), ..., (n-1,n).
pub fn exhaustive_bout_order(n: usize) -> BoutOrder {
    (1..=n)
        .flat_map(|a| (a + 1..=n).map(move |b| (a, b)))
        .collect()
}

/// Bout order for a pool of `n`: the curated table when one exists, otherwise every pair ascending.
/// Always `n(n-1)/2` bouts covering each pair once.
pub fn generate_bout_order(n: usize) -> BoutOrder {
    match curated_bout_order(n) {
        Some(order) => order.to_vec(),
        None => exhaustive_bout_order(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustive_order_is_ascending() {
        assert_eq!(exhaustive_bout_order(3), vec![(1, 2), (1, 3), (2, 3)]);
        assert!(exhaustive_bout_order(1).is_empty());
        assert!(exhaustive_bout_order(0).is_empty());
    }

    #[test]
    fn curated_range_bounds() {
        assert_eq!(MAX_CURATED_POOL, 8);
        assert!(curated_bout_order(2).is_none());
        assert!(curated_bout_order(9).is_none());
        assert_eq!(curated_bout_order(5).map(<[_]>::len), Some(10));
    }
}
