// crates/dt_cli/src/main.rs
//
// Wires up exit codes, typed error mapping, logging, and the run path:
// load weight table → generate (best die) → render → stdout or --out.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// Bad arguments, unsupported die, malformed input table.
    pub const VALIDATION: i32 = 2;
    /// No candidate die can hold the table.
    pub const NO_TABLE: i32 = 3;
    pub const IO: i32 = 4;
    /// Internal consistency failure in the apportionment.
    pub const INTERNAL: i32 = 5;
}

use std::io::Write;
use std::process::ExitCode;

use args::{parse_and_validate as parse_cli, Invocation};
use dt_io::{canonical_json, load_weight_table, IoError};
use dt_pipeline::{generate, GenerateOptions, PipelineError};
use dt_report::{render, render_json, ReportFormat};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const NO_TABLE_MSG: &str = "Unable to generate table for the given die/dice";

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// Input table shape / weights / unsupported die names
    Validation(String),
    /// No feasible die among the candidates
    NoTable,
    /// Read/write failures
    Io(String),
    /// Apportionment invariant broken (a defect, never bad input)
    Internal(String),
}

impl std::fmt::Display for MainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MainError::Validation(m) | MainError::Io(m) | MainError::Internal(m) => f.write_str(m),
            MainError::NoTable => f.write_str(NO_TABLE_MSG),
        }
    }
}

fn main() -> ExitCode {
    let inv = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("dietable: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };
    init_logging(&inv);

    let rc = match run_once(&inv) {
        Ok(()) => exitcodes::OK,
        Err(e) => {
            eprintln!("dietable: error: {e}");
            map_error(&e)
        }
    };
    ExitCode::from(rc as u8)
}

/// stderr subscriber; `RUST_LOG` wins over -q/-v.
fn init_logging(inv: &Invocation) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(inv.log_level()));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

fn run_once(inv: &Invocation) -> Result<(), MainError> {
    let args = &inv.args;
    info!(
        engine = env!("CARGO_PKG_NAME"),
        version = option_env!("DIETABLE_BUILD_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
        input = %args.input.display(),
        "starting"
    );

    let weights = load_weight_table(&args.input).map_err(map_io_err)?;
    let opts = GenerateOptions { drop_rows: args.drop_rows };
    let table = generate(&weights, &args.dice, opts)
        .map_err(map_pipeline_err)?
        .ok_or(MainError::NoTable)?;

    match &args.out {
        Some(path) => {
            match inv.format {
                ReportFormat::Json => canonical_json::write_canonical_file(path, &render_json(&table)),
                ReportFormat::Text => canonical_json::write_file_atomic(path, render(&table, inv.format).as_bytes()),
            }
            .map_err(map_io_err)?;
            debug!(path = %path.display(), format = %inv.format, "table written");
        }
        None => {
            let text = render(&table, inv.format);
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| MainError::Io(format!("write stdout: {e}")))?;
        }
    }
    Ok(())
}

/// Map our typed errors to the exit-code table.
fn map_error(e: &MainError) -> i32 {
    use exitcodes::*;
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::NoTable => NO_TABLE,
        MainError::Io(_) => IO,
        MainError::Internal(_) => INTERNAL,
    }
}

/// Translate dt_io::IoError into MainError buckets.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Read { .. } | IoError::Write { .. } => MainError::Io(e.to_string()),
        IoError::Yaml(_) | IoError::Row { .. } | IoError::Core(_) => MainError::Validation(e.to_string()),
    }
}

/// Translate dt_pipeline::PipelineError into MainError buckets.
fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::Die(_) => MainError::Validation(e.to_string()),
        PipelineError::Alloc(_) => MainError::Internal(e.to_string()),
    }
}
