//! Multi-die selection: apportion every candidate die size and keep the one
//! with the lowest mean squared error.
//!
//! - Infeasible candidates are skipped silently.
//! - Equal MSE: the first candidate in input order wins.
//! - An internal-consistency error in any candidate aborts the selection.

use dt_core::WeightedSet;
use tracing::debug;

use crate::largest_remainder::apportion;
use crate::{AllocError, ApportionmentResult};

/// Best apportionment over `candidates`, or `None` if none is feasible.
pub fn select_best(
    weights: &WeightedSet,
    candidates: &[u32],
    drop_rows: bool,
) -> Result<Option<ApportionmentResult>, AllocError> {
    let best = select_best_by(weights, candidates.iter().map(|&size| (size, size)), drop_rows)?;
    Ok(best.map(|(_, result)| result))
}

/// Keyed variant: each candidate carries a caller key (e.g. the die name),
/// returned alongside the winning result.
pub fn select_best_by<K, I>(
    weights: &WeightedSet,
    candidates: I,
    drop_rows: bool,
) -> Result<Option<(K, ApportionmentResult)>, AllocError>
where
    I: IntoIterator<Item = (K, u32)>,
{
    let mut best: Option<(K, ApportionmentResult)> = None;

    for (key, die_size) in candidates {
        let Some(result) = apportion(weights, die_size, drop_rows)? else {
            continue;
        };
        debug!(
            die_size,
            mse = %result.error.mean_squared_error,
            "feasible candidate"
        );

        let better = match &best {
            None => true,
            Some((_, incumbent)) => {
                result.error.mean_squared_error < incumbent.error.mean_squared_error
            }
        };
        if better {
            best = Some((key, result));
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dt_core::Ratio;

    fn set(weights: &[i128]) -> WeightedSet {
        WeightedSet::from_pairs(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (Ratio::from_integer(w), format!("row{i}"))),
        )
        .unwrap()
    }

    #[test]
    fn picks_exact_fit() {
        // 1:2:3 fits d6 exactly, not d4 or d8.
        let ws = set(&[1, 2, 3]);
        let best = select_best(&ws, &[4, 6, 8], false).unwrap().unwrap();
        assert_eq!(best.die_size, 6);
        assert_eq!(best.counts(), vec![1, 2, 3]);
    }

    #[test]
    fn equal_mse_keeps_first_candidate() {
        let ws = set(&[1, 1]);
        let best = select_best(&ws, &[4, 2, 6], false).unwrap().unwrap();
        assert_eq!(best.die_size, 4);
    }

    #[test]
    fn none_when_nothing_is_feasible() {
        let ws = set(&[1, 1, 1, 1, 1]);
        assert_eq!(select_best(&ws, &[3], false).unwrap(), None);
        assert_eq!(select_best(&ws, &[], false).unwrap(), None);
    }

    #[test]
    fn infeasible_candidates_are_skipped() {
        let ws = set(&[1, 1, 1, 1, 1]);
        let best = select_best(&ws, &[3, 4, 10], false).unwrap().unwrap();
        assert_eq!(best.die_size, 10);
    }

    #[test]
    fn keyed_selection_returns_key() {
        let ws = set(&[1, 2, 3]);
        let cands = vec![("d4", 4), ("d6", 6)];
        let (key, res) = select_best_by(&ws, cands, false).unwrap().unwrap();
        assert_eq!(key, "d6");
        assert_eq!(res.die_size, 6);
    }
}
