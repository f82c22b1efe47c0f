// crates/dt_algo/src/lib.rs
//! Algorithm layer: weights → integer face counts → contiguous ranges.
//!
//! - `largest_remainder`: Hamilton apportionment with a floor policy
//! - `error_report`: descriptive error metrics used to rank candidates
//! - `ranges`: (label, count) rows → inclusive ranges starting at 1
//! - `select`: run several die sizes, keep the lowest mean squared error
//!
//! Everything here is pure and deterministic. Infeasible candidates are a
//! normal `Ok(None)`; `Err` means an internal-consistency defect.

#![forbid(unsafe_code)]

use dt_core::{CoreError, ErrorReport, RangeRow, Ratio};

pub mod largest_remainder;
pub mod error_report;
pub mod ranges;
pub mod select;

pub use error_report::compute_error;
pub use largest_remainder::apportion;
pub use ranges::build_ranges;
pub use select::{select_best, select_best_by};

// ----------------------------- Result types -----------------------------------------

/// One surviving row of an apportionment: input label and its face count (> 0).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocatedRow {
    pub label: String,
    pub count: u32,
}

/// Feasible apportionment for one die size.
///
/// `rows` keep input order and omit zero-count entries; their counts sum to
/// `die_size` exactly. `dropped` lists labels removed before normalization
/// when dropping was allowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApportionmentResult {
    pub die_size: u32,
    pub rows: Vec<AllocatedRow>,
    pub error: ErrorReport,
    pub dropped: Vec<String>,
}

impl ApportionmentResult {
    /// Contiguous ranges `1..=die_size`, one per row.
    pub fn ranges(&self) -> Vec<RangeRow> {
        build_ranges(self.rows.iter().map(|r| (r.label.as_str(), r.count)))
    }

    pub fn counts(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.count).collect()
    }
}

// ----------------------------- Errors ------------------------------------------------

/// Internal-consistency failures. These indicate a defect, never bad input,
/// and abort the whole generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    #[error("remainder is not less than 1 in magnitude: row {index}, remainder {remainder}")]
    RemainderOutOfRange { index: usize, remainder: Ratio },

    #[error("integer weight sum is {sum}, expected {die_size}")]
    SumMismatch { die_size: u32, sum: i128 },

    #[error("arithmetic: {0}")]
    Arithmetic(#[from] CoreError),
}
