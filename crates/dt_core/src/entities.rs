//! Input model (`WeightedEntry`, `WeightedSet`) and output values
//! (`RangeRow`, `ErrorReport`). All are immutable once built.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::slice;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::CoreError;
use crate::rational::Ratio;

/// One weighted outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WeightedEntry {
    pub weight: Ratio,
    pub label: String,
}

impl WeightedEntry {
    pub fn new(weight: Ratio, label: impl Into<String>) -> Self {
        Self { weight, label: label.into() }
    }
}

/// Ordered, non-empty sequence of strictly positive weighted entries.
///
/// Order is significant: it fixes the order of ranges in the output and is
/// the final tie-break key everywhere. Labels need not be unique.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeightedSet {
    entries: Vec<WeightedEntry>,
}

impl WeightedSet {
    pub fn new(entries: Vec<WeightedEntry>) -> Result<Self, CoreError> {
        if entries.is_empty() {
            return Err(CoreError::EmptySet);
        }
        if let Some(index) = entries.iter().position(|e| !e.weight.is_positive()) {
            let label = entries[index].label.clone();
            return Err(CoreError::NonPositiveWeight { index, label });
        }
        Ok(Self { entries })
    }

    /// Convenience constructor from `(weight, label)` pairs.
    pub fn from_pairs<I, L>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (Ratio, L)>,
        L: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(w, l)| WeightedEntry::new(w, l))
                .collect(),
        )
    }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[inline]
    pub fn entries(&self) -> &[WeightedEntry] { &self.entries }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, WeightedEntry> { self.entries.iter() }

    /// Exact sum of all weights.
    pub fn total_weight(&self) -> Ratio {
        self.entries.iter().map(|e| &e.weight).sum()
    }
}

impl<'a> IntoIterator for &'a WeightedSet {
    type Item = &'a WeightedEntry;
    type IntoIter = slice::Iter<'a, WeightedEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// Inclusive face interval `[lo, hi]` mapped to one outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RangeRow {
    pub lo: u32,
    pub hi: u32,
    pub label: String,
}

impl RangeRow {
    /// Number of faces covered.
    #[inline]
    pub fn faces(&self) -> u32 { self.hi - self.lo + 1 }

    #[inline]
    pub fn is_single(&self) -> bool { self.lo == self.hi }
}

impl fmt::Display for RangeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} {}", self.lo, self.hi, self.label)
    }
}

/// Descriptive error metrics of one apportionment. Never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ErrorReport {
    pub mean_relative_error: Ratio,
    pub highest_relative_error: Ratio,
    pub mean_squared_error: Ratio,
}
