//! Error metrics for one apportionment (descriptive; ranking only).
//!
//! - absolute error  = remainder / die_size
//! - relative error  = |remainder / (remainder + final_count)|, i.e. the
//!   deviation as a share of the entry's exact normalized target, which is
//!   always > 0 because weights are strictly positive
//! - mean_squared_error = mean of absolute error²
//!
//! All metrics are exact. Squares and means of remainders with large
//! denominators grow without bound instead of failing.

use dt_core::{CoreError, ErrorReport, Ratio};

/// Compute the error report from final counts and post-redistribution
/// remainders (same length, same order).
pub fn compute_error(
    die_size: u32,
    counts: &[u32],
    remainders: &[Ratio],
) -> Result<ErrorReport, CoreError> {
    if die_size == 0 || counts.is_empty() || counts.len() != remainders.len() {
        return Err(CoreError::DomainOutOfRange("error report inputs"));
    }
    let size = Ratio::from(die_size);

    let squared = remainders
        .iter()
        .map(|r| {
            let abs = r.checked_div(&size)?;
            Ok(&abs * &abs)
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    let relative = remainders
        .iter()
        .zip(counts)
        .map(|(r, &c)| {
            let target = r + &Ratio::from(c);
            Ok(r.checked_div(&target)?.abs())
        })
        .collect::<Result<Vec<_>, CoreError>>()?;

    Ok(ErrorReport {
        mean_relative_error: mean(&relative),
        highest_relative_error: relative.iter().max().cloned().unwrap_or_default(),
        mean_squared_error: mean(&squared),
    })
}

/// Mean of a non-empty slice.
fn mean(xs: &[Ratio]) -> Ratio {
    let n = Ratio::from(xs.len() as u64);
    let sum: Ratio = xs.iter().sum();
    sum.checked_div(&n).unwrap_or_default()
}
