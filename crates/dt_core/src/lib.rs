//! dt_core: core value types, exact ratios, and ordering helpers.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! workspace (`dt_algo`, `dt_io`, `dt_pipeline`, `dt_report`, `dt_cli`).
//!
//! - Exact rational arithmetic (`Ratio`, arbitrary precision, always reduced)
//! - Input model: `WeightedEntry` / `WeightedSet` (validated at construction)
//! - Output values: `RangeRow`, `ErrorReport`
//! - Deterministic ordering helpers (stable sorted insertion)
//!
//! Serialization derives are gated behind `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod errors {
    use alloc::string::String;
    use core::fmt;

    /// Minimal error set for core-domain validation & arithmetic.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// Zero denominator or unparsable ratio text.
        InvalidRatio,
        /// A value does not fit the requested integer or exponent range.
        Overflow,
        /// A weighted set must contain at least one entry.
        EmptySet,
        /// Weights must be strictly positive; `index` is the 0-based input row.
        NonPositiveWeight { index: usize, label: String },
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidRatio => write!(f, "invalid ratio"),
                CoreError::Overflow => write!(f, "value out of range"),
                CoreError::EmptySet => write!(f, "empty weighted set"),
                CoreError::NonPositiveWeight { index, label } => {
                    write!(f, "weight must be > 0 (row {index}, {label:?})")
                }
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod rational;
pub mod entities;
pub mod determinism;

pub use entities::{ErrorReport, RangeRow, WeightedEntry, WeightedSet};
pub use errors::CoreError;
pub use rational::Ratio;
