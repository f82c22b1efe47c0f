//! dt_pipeline: die names + weighted outcomes → one relabeled die table.
//!
//! Stages: expand aliases → parse dice (fail fast) → select best apportionment
//! → relabel face ranges for the winning die.
//! The crate is I/O-free; loading lives in `dt_io`, rendering in `dt_report`.

#![forbid(unsafe_code)]

use dt_algo::{select_best_by, AllocError, ApportionmentResult};
use dt_core::{ErrorReport, WeightedSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod dice;

pub use dice::{expand_aliases, parse_dice, Die, DieError, DieSpec};

/// Runtime knobs for `generate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateOptions {
    /// Allow low-weight entries to be dropped (or to round to zero faces).
    pub drop_rows: bool,
}

/// One printed row: the face labels bounding the range and the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DieTableRow {
    pub low: String,
    pub high: String,
    pub result: String,
}

impl DieTableRow {
    pub fn is_single(&self) -> bool {
        self.low == self.high
    }
}

/// Final table for the selected die.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DieTable {
    pub die: String,
    pub rows: Vec<DieTableRow>,
    pub error: ErrorReport,
    pub dropped: Vec<String>,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Die(#[from] DieError),

    #[error("internal consistency failure: {0}")]
    Alloc(#[from] AllocError),
}

/// Generate the best die table for `weights` over the named `dice`.
///
/// Aliases (`standard`, `extended`, `all`) are expanded in place. Every name
/// is parsed before any apportionment runs, so one unsupported name fails
/// the call. `Ok(None)` means no candidate die can hold the table.
pub fn generate<S: AsRef<str>>(
    weights: &WeightedSet,
    dice: &[S],
    opts: GenerateOptions,
) -> Result<Option<DieTable>, PipelineError> {
    let dice = parse_dice(dice)?;
    debug!(candidates = dice.len(), drop_rows = opts.drop_rows, "generating die table");

    let best = select_best_by(weights, dice.iter().map(|d| (d, d.size)), opts.drop_rows)?;
    let Some((die, result)) = best else {
        debug!("no feasible die among candidates");
        return Ok(None);
    };

    info!(die = %die, mse = %result.error.mean_squared_error, "selected die");
    if !result.dropped.is_empty() {
        warn!(die = %die, dropped = result.dropped.len(), "low-weight rows dropped");
    }
    Ok(Some(relabel(die, result)))
}

/// Turn face ranges of `result` into the labels printed on `die`.
pub fn relabel(die: &Die, result: ApportionmentResult) -> DieTable {
    let rows = result
        .ranges()
        .into_iter()
        .map(|r| DieTableRow {
            low: die.face_label(r.lo),
            high: die.face_label(r.hi),
            result: r.label,
        })
        .collect();

    DieTable {
        die: die.name.clone(),
        rows,
        error: result.error,
        dropped: result.dropped,
    }
}
