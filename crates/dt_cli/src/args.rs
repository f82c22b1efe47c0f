// crates/dt_cli/src/args.rs
//
// CLI argument surface for `dietable`.
//
// Rules:
// - One positional input: a local YAML (or JSON) weight table
// - --dice takes die names and aliases (standard, extended, all); default: standard
// - --format text|json, --out PATH (stdout when absent)
// - No networked paths (reject any scheme:// for input and --out)

use clap::{ArgAction, Parser};
use dt_report::ReportFormat;
use std::fs;
use std::path::{Path, PathBuf};

const DICE_HELP: &str = "\
Dice to consider when creating the table.

Supported:
  dX        regular dice (d6, d20, d100, ...)
  d0        a ten-sided die where 10 shows as 0
  dXX...    digit dice, one die per digit (d66, d666, d00)
  d%, d%%   other names for d00, d000, ...
  standard  d4 d6 d8 d10 d12 d20
  extended  d3 d4 d5 d6 d7 d8 d10 d12 d14 d16 d20 d24 d30
  all       d3 d4 d5 d6 d7 d8 d9 d10 d11 d12 d13 d14 d15 d16 d18 d20 d22 d24 d30";

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dietable",
    version,
    disable_help_subcommand = true,
    about = "Generate a roll-table from weighted outcomes"
)]
pub struct Args {
    /// Weight table: a YAML list of `weight: result` rows.
    pub input: PathBuf,

    /// Dice to consider (names or aliases); see --help.
    #[arg(long, num_args = 1.., default_value = "standard", long_help = DICE_HELP)]
    pub dice: Vec<String>,

    /// Drop low probability rows.
    #[arg(long)]
    pub drop_rows: bool,

    /// Output format.
    #[arg(long, value_parser = ["text", "json"], default_value = "text")]
    pub format: String,

    /// Write the table to this file instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Only print errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// More diagnostics on stderr (-v info, -vv debug).
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Validated invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub args: Args,
    pub format: ReportFormat,
}

impl Invocation {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match (self.args.quiet, self.args.verbose) {
            (true, _) => "error",
            (false, 0) => "warn",
            (false, 1) => "info",
            (false, _) => "debug",
        }
    }
}

/// Errors surfaced by argument validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    BadFormat(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadFormat(s) => write!(f, "{s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Invocation, CliError> {
    validate(Args::parse())
}

pub fn validate(args: Args) -> Result<Invocation, CliError> {
    ensure_local_exists(&args.input, "input")?;
    if let Some(out) = &args.out {
        ensure_local_path(out)?;
    }
    let format = args
        .format
        .parse::<ReportFormat>()
        .map_err(|e| CliError::BadFormat(e.to_string()))?;
    Ok(Invocation { args, format })
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://") || lower.starts_with("http:") || lower.starts_with("https:") || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    match p.to_str() {
        Some(s) if has_scheme(s) => Err(CliError::NonLocalPath(s.to_string())),
        _ => Ok(()),
    }
}

/// Ensure a path is local (no scheme) and exists as a regular file.
fn ensure_local_exists(p: &Path, label: &'static str) -> Result<(), CliError> {
    ensure_local_path(p)?;
    match fs::metadata(p) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::NotFound(format!("{label} {}", p.display()))),
    }
}
