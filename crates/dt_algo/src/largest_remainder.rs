//! Largest Remainder (Hamilton) apportionment of die faces.
//!
//! Contract:
//! - More entries than faces: infeasible unless dropping is allowed, in which
//!   case only the `die_size` heaviest entries survive (ties keep the earlier
//!   entry; survivors keep input order).
//! - Targets are `weight * die_size / total`, exact; floors truncate toward 0.
//! - Without dropping, a zero floor is raised to 1 so every entry gets a face.
//!   If that pushes the floor sum above `die_size` the candidate is infeasible.
//! - Leftover faces go one each to the largest remainders
//!   (tie keys: remainder ↓, then input order).
//!
//! Determinism:
//! - No RNG; exact arbitrary-precision rational arithmetic only, so large
//!   denominators from fractional weights never overflow.

use dt_core::determinism::rank_desc_stable;
use dt_core::{Ratio, WeightedEntry, WeightedSet};
use tracing::debug;

use crate::error_report::compute_error;
use crate::{AllocError, AllocatedRow, ApportionmentResult};

/// Apportion `die_size` faces across `weights`.
///
/// Returns `Ok(None)` when no valid table exists for this die size under the
/// drop policy.
pub fn apportion(
    weights: &WeightedSet,
    die_size: u32,
    drop_rows: bool,
) -> Result<Option<ApportionmentResult>, AllocError> {
    if die_size == 0 {
        return Ok(None);
    }

    let faces = die_size as usize;
    let (kept, dropped) = if weights.len() > faces {
        if !drop_rows {
            debug!(die_size, entries = weights.len(), "infeasible: more entries than faces");
            return Ok(None);
        }
        keep_heaviest(weights, faces)
    } else {
        (weights.iter().collect(), Vec::new())
    };
    if !dropped.is_empty() {
        debug!(die_size, dropped = dropped.len(), "dropped lowest-weight entries");
    }

    // Normalize to the die size (exact).
    let total: Ratio = kept.iter().map(|e| &e.weight).sum();
    let scale = Ratio::from(die_size).checked_div(&total)?;
    let targets: Vec<Ratio> = kept.iter().map(|e| &e.weight * &scale).collect();

    // Floors, with the one-face minimum when every entry must appear.
    let mut counts = targets
        .iter()
        .map(|t| {
            t.trunc().map(|f| match f {
                0 if !drop_rows => 1,
                f => f,
            })
        })
        .collect::<Result<Vec<i128>, _>>()?;

    let sum: i128 = counts.iter().sum();
    if sum > i128::from(die_size) {
        debug!(die_size, sum = %sum, "infeasible: one-face minimum exceeds die size");
        return Ok(None);
    }

    let mut remainders: Vec<Ratio> = targets
        .iter()
        .zip(&counts)
        .map(|(t, &c)| t - &Ratio::from_integer(c))
        .collect();
    for (index, r) in remainders.iter().enumerate() {
        if r.abs() >= Ratio::one() {
            return Err(AllocError::RemainderOutOfRange { index, remainder: r.clone() });
        }
    }

    // Hand out the leftovers by largest remainder.
    let deficit = usize::try_from(i128::from(die_size) - sum).unwrap_or(0);
    if deficit > 0 {
        for ix in rank_desc_stable(&remainders).into_iter().take(deficit) {
            remainders[ix] = &remainders[ix] - &Ratio::one();
            counts[ix] += 1;
        }
    }

    let final_sum: i128 = counts.iter().sum();
    if final_sum != i128::from(die_size) {
        return Err(AllocError::SumMismatch { die_size, sum: final_sum });
    }

    // Every count is within 0..=die_size here, so the conversion is lossless.
    let counts: Vec<u32> = counts.into_iter().map(|c| c as u32).collect();
    let error = compute_error(die_size, &counts, &remainders)?;

    let rows = kept
        .iter()
        .zip(&counts)
        .filter(|(_, &c)| c > 0)
        .map(|(e, &c)| AllocatedRow { label: e.label.clone(), count: c })
        .collect();

    Ok(Some(ApportionmentResult { die_size, rows, error, dropped }))
}

/// Keep the `keep` heaviest entries in input order; return dropped labels.
fn keep_heaviest(weights: &WeightedSet, keep: usize) -> (Vec<&WeightedEntry>, Vec<String>) {
    let keys: Vec<&Ratio> = weights.iter().map(|e| &e.weight).collect();
    let mut survives = vec![false; keys.len()];
    for ix in rank_desc_stable(&keys).into_iter().take(keep) {
        survives[ix] = true;
    }

    let mut kept = Vec::with_capacity(keep);
    let mut dropped = Vec::new();
    for (entry, alive) in weights.iter().zip(survives) {
        if alive {
            kept.push(entry);
        } else {
            dropped.push(entry.label.clone());
        }
    }
    (kept, dropped)
}
