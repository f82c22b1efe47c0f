//! Property tests for apportionment, range construction, and selection.

use dt_algo::{apportion, select_best};
use dt_core::{Ratio, WeightedSet};
use proptest::prelude::*;

fn weighted_set(weights: &[(u32, u32)]) -> WeightedSet {
    WeightedSet::from_pairs(weights.iter().enumerate().map(|(i, &(n, d))| {
        (
            Ratio::new(i128::from(n), i128::from(d)).unwrap(),
            format!("outcome-{i}"),
        )
    }))
    .unwrap()
}

fn weights_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    prop::collection::vec((1u32..=1000, 1u32..=20), 1..40)
}

/// Primes spread from 2 to just under 2^32; products of a few already pass
/// 2^128.
const WIDE_PRIMES: &[u32] = &[
    2, 3, 53, 97, 7919, 65_537, 104_729, 1_299_709, 15_485_863, 179_424_673,
    982_451_653, 2_147_483_647, 4_294_967_291,
];

/// Fractional weights whose denominators are pairwise coprime or arbitrary
/// 32-bit values.
fn wide_weights_strategy() -> impl Strategy<Value = Vec<(u32, u32)>> {
    let den = prop_oneof![prop::sample::select(WIDE_PRIMES), 1u32..=u32::MAX];
    prop::collection::vec((1u32..=u32::MAX, den), 1..40)
}

proptest! {
    #[test]
    fn feasible_results_conserve_faces(
        weights in weights_strategy(),
        die_size in 1u32..=200,
        drop_rows in any::<bool>(),
    ) {
        let ws = weighted_set(&weights);
        if let Some(res) = apportion(&ws, die_size, drop_rows).unwrap() {
            let total: u32 = res.rows.iter().map(|r| r.count).sum();
            prop_assert_eq!(total, die_size);
            prop_assert!(res.rows.iter().all(|r| r.count > 0));
        }
    }

    #[test]
    fn ranges_partition_the_die(
        weights in weights_strategy(),
        die_size in 1u32..=200,
    ) {
        let ws = weighted_set(&weights);
        if let Some(res) = apportion(&ws, die_size, true).unwrap() {
            let ranges = res.ranges();
            prop_assert!(!ranges.is_empty());
            prop_assert_eq!(ranges[0].lo, 1);
            prop_assert_eq!(ranges[ranges.len() - 1].hi, die_size);
            for pair in ranges.windows(2) {
                prop_assert_eq!(pair[0].hi + 1, pair[1].lo);
            }
            for r in &ranges {
                prop_assert!(r.lo <= r.hi);
            }
        }
    }

    #[test]
    fn every_entry_gets_a_face_without_dropping(
        weights in weights_strategy(),
        die_size in 1u32..=200,
    ) {
        let ws = weighted_set(&weights);
        if let Some(res) = apportion(&ws, die_size, false).unwrap() {
            prop_assert_eq!(res.rows.len(), ws.len());
            prop_assert!(res.dropped.is_empty());
        }
    }

    #[test]
    fn dropping_never_keeps_more_rows_than_faces(
        weights in weights_strategy(),
        die_size in 1u32..=50,
    ) {
        let ws = weighted_set(&weights);
        let res = apportion(&ws, die_size, true).unwrap();
        let res = res.expect("dropping rows always yields a table");
        prop_assert!(res.rows.len() <= die_size as usize);
        prop_assert_eq!(res.dropped.len(), ws.len().saturating_sub(die_size as usize));
    }

    #[test]
    fn selection_has_minimal_mse(
        weights in weights_strategy(),
        candidates in prop::collection::vec(1u32..=120, 1..8),
        drop_rows in any::<bool>(),
    ) {
        let ws = weighted_set(&weights);
        let best = select_best(&ws, &candidates, drop_rows).unwrap();
        let feasible: Vec<_> = candidates
            .iter()
            .filter_map(|&c| apportion(&ws, c, drop_rows).unwrap())
            .collect();
        match best {
            None => prop_assert!(feasible.is_empty()),
            Some(best) => {
                for other in &feasible {
                    prop_assert!(best.error.mean_squared_error <= other.error.mean_squared_error);
                }
            }
        }
    }

    #[test]
    fn wide_denominators_never_fail(
        weights in wide_weights_strategy(),
        candidates in prop::collection::vec(1u32..=1000, 1..6),
        drop_rows in any::<bool>(),
    ) {
        let ws = weighted_set(&weights);
        for &die_size in &candidates {
            if let Some(res) = apportion(&ws, die_size, drop_rows).unwrap() {
                prop_assert_eq!(res.counts().iter().sum::<u32>(), die_size);
                if !drop_rows {
                    prop_assert_eq!(res.rows.len(), ws.len());
                }
            }
        }
        prop_assert!(select_best(&ws, &candidates, drop_rows).is_ok());
    }

    #[test]
    fn apportionment_is_deterministic(
        weights in weights_strategy(),
        die_size in 1u32..=200,
        drop_rows in any::<bool>(),
    ) {
        let ws = weighted_set(&weights);
        let a = apportion(&ws, die_size, drop_rows).unwrap();
        let b = apportion(&ws, die_size, drop_rows).unwrap();
        prop_assert_eq!(a, b);
    }
}

// ----------------------------- Worked scenarios -------------------------------------

fn unit_set(labels: &[&str]) -> WeightedSet {
    WeightedSet::from_pairs(labels.iter().map(|l| (Ratio::one(), *l))).unwrap()
}

fn spans(res: &dt_algo::ApportionmentResult) -> Vec<(u32, u32, String)> {
    res.ranges().into_iter().map(|r| (r.lo, r.hi, r.label)).collect()
}

#[test]
fn four_equal_outcomes_on_d4() {
    let res = apportion(&unit_set(&["a", "b", "c", "d"]), 4, false).unwrap().unwrap();
    assert_eq!(res.counts(), vec![1, 1, 1, 1]);
    assert_eq!(
        spans(&res),
        vec![
            (1, 1, "a".into()),
            (2, 2, "b".into()),
            (3, 3, "c".into()),
            (4, 4, "d".into()),
        ]
    );
}

#[test]
fn three_to_one_on_d4() {
    let ws = WeightedSet::from_pairs([(Ratio::from_integer(3), "a"), (Ratio::one(), "b")]).unwrap();
    let res = apportion(&ws, 4, false).unwrap().unwrap();
    assert_eq!(res.counts(), vec![3, 1]);
    assert_eq!(spans(&res), vec![(1, 3, "a".into()), (4, 4, "b".into())]);
}

#[test]
fn three_equal_outcomes_on_d4_favour_the_first() {
    let res = apportion(&unit_set(&["a", "b", "c"]), 4, false).unwrap().unwrap();
    assert_eq!(res.counts(), vec![2, 1, 1]);
    assert_eq!(
        spans(&res),
        vec![(1, 2, "a".into()), (3, 3, "b".into()), (4, 4, "c".into())]
    );
}

#[test]
fn five_outcomes_on_d3() {
    let ws = unit_set(&["a", "b", "c", "d", "e"]);
    assert_eq!(apportion(&ws, 3, false).unwrap(), None);
    assert_eq!(select_best(&ws, &[3], false).unwrap(), None);

    let res = apportion(&ws, 3, true).unwrap().unwrap();
    assert_eq!(res.rows.len(), 3);
    assert_eq!(res.counts(), vec![1, 1, 1]);
    assert_eq!(spans(&res)[2], (3, 3, "c".into()));
}

fn prime_reciprocals(count: usize) -> WeightedSet {
    let mut primes: Vec<i128> = Vec::new();
    let mut k = 2;
    while primes.len() < count {
        if primes.iter().all(|p| k % p != 0) {
            primes.push(k);
        }
        k += 1;
    }
    WeightedSet::from_pairs(primes.iter().map(|&p| (Ratio::new(1, p).unwrap(), format!("p{p}"))))
        .unwrap()
}

#[test]
fn prime_reciprocal_weights_on_d30() {
    // 1/2, 1/3, ..., 1/53: squared remainders need denominators past 2^128.
    let ws = prime_reciprocals(16);
    let res = apportion(&ws, 30, false).unwrap().unwrap();
    assert_eq!(res.counts(), vec![8, 5, 3, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
    assert_eq!(res.counts().iter().sum::<u32>(), 30);
    assert!(res.error.mean_squared_error.denom().bits() > 128);

    assert_eq!(apportion(&ws, 20, false).unwrap(), None);
    let best = select_best(&ws, &[20, 30, 100], false).unwrap().unwrap();
    assert_eq!(best.die_size, 100);
    assert_eq!(
        best.counts(),
        vec![30, 20, 12, 9, 5, 5, 3, 3, 3, 2, 2, 2, 1, 1, 1, 1]
    );
}

#[test]
fn thirty_prime_reciprocal_weights() {
    // The total weight alone has a 155-bit denominator.
    let ws = prime_reciprocals(30);
    assert!(ws.total_weight().denom().bits() > 150);
    let res = apportion(&ws, 100, false).unwrap().unwrap();
    assert_eq!(
        res.counts(),
        vec![
            27, 18, 10, 7, 5, 4, 3, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
            1, 1, 1
        ]
    );
}
