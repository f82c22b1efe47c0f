//! dt_report: pure renderers for a `DieTable`.
//!
//! Rules:
//! - No I/O here; callers print or write the returned text/value.
//! - Row order is face order. Field names are stable.
//! - Ratios print as rounded decimals next to their exact fraction.

#![deny(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use dt_pipeline::DieTable;
use thiserror::Error;

pub mod render_json;
pub mod render_text;

pub use render_json::render_json;
pub use render_text::render_text;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("unknown output format `{0}` (expected text or json)")]
    UnknownFormat(String),
}

/// Output format for a die table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportFormat::Text => "text",
            ReportFormat::Json => "json",
        })
    }
}

/// Render `table` in `format`. JSON comes out pretty-printed with a newline.
pub fn render(table: &DieTable, format: ReportFormat) -> String {
    match format {
        ReportFormat::Text => render_text(table),
        ReportFormat::Json => {
            let mut out = serde_json::to_string_pretty(&render_json(table))
                .unwrap_or_else(|_| render_json(table).to_string());
            out.push('\n');
            out
        }
    }
}
