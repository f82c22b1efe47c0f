//! crates/dt_io/src/lib.rs
//! I/O edge of the die-table generator.
//!
//! - `loader`: YAML (or JSON) weight tables → `dt_core::WeightedSet`
//! - `canonical_json`: sorted-key compact JSON with atomic file writes
//!
//! The core crates never touch the filesystem; everything that does lives here.

#![forbid(unsafe_code)]

use dt_core::CoreError;
use thiserror::Error;

pub mod canonical_json;
pub mod loader;

pub use loader::{load_weight_table, parse_weight_table};

/// Unified error for dt_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// The input file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Output could not be written (create_dir_all, rename, fsync, etc.)
    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A row has the wrong shape, an unreadable weight, or no label.
    #[error("row {index}: {msg}")]
    Row { index: usize, msg: String },

    /// Rows parsed but do not form a valid weighted set.
    #[error("invalid weight table: {0}")]
    Core(#[from] CoreError),
}

pub type IoResult<T> = Result<T, IoError>;
