//! # Estimator CLI
//!
//! Command-line front end for the pricing engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           estimator (CLI)                               │
//! │                                                                         │
//! │  FILE / stdin ───► JSON ───► commands ───► estimator-core               │
//! │                                  │                                      │
//! │                                  ▼                                      │
//! │                   stdout (results)   stderr (logs, rejections)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod commands;
mod config;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use estimator_core::{CalculationInput, Project, WorkingWeek};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::commands::Outcome;
use crate::config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "estimator", version, about = "Project cost estimation and pricing")]
struct Cli {
    /// Log at debug level (overrides ESTIMATOR_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON on a single line (overrides ESTIMATOR_PRETTY)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price a calculation input
    Totals {
        /// JSON file, `-` or omitted for stdin
        file: Option<PathBuf>,
    },
    /// Summarize a project document
    Summary {
        /// JSON file, `-` or omitted for stdin
        file: Option<PathBuf>,

        /// Print formatted currency instead of JSON
        #[arg(long)]
        human: bool,
    },
    /// Count business days in an inclusive date range
    Days {
        #[arg(long)]
        start: NaiveDate,

        #[arg(long)]
        end: NaiveDate,

        /// MON_FRI, MON_SAT or SUN_THU (overrides ESTIMATOR_WORKING_WEEK)
        #[arg(long)]
        week: Option<WorkingWeek>,

        /// Date to skip, may be repeated
        #[arg(long = "holiday")]
        holidays: Vec<NaiveDate>,
    },
    /// Check a calculation input without pricing it
    Validate {
        /// JSON file, `-` or omitted for stdin
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load()?;

    init_logger(&config, cli.verbose);
    debug!(?config, "Configuration loaded");

    let outcome = match cli.command {
        Command::Totals { file } => {
            let input: CalculationInput = commands::read_json(file.as_deref())?;
            commands::totals(&input)?
        }
        Command::Summary { file, human } => {
            let project: Project = commands::read_json(file.as_deref())?;
            commands::summary(&project, human)?
        }
        Command::Days {
            start,
            end,
            week,
            holidays,
        } => commands::days(start, end, week.unwrap_or(config.working_week), &holidays),
        Command::Validate { file } => {
            let input: CalculationInput = commands::read_json(file.as_deref())?;
            commands::validate(&input)
        }
    };

    let pretty = config.pretty && !cli.compact;
    emit(outcome, pretty)
}

fn init_logger(config: &CliConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn emit(outcome: Outcome, pretty: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    match outcome {
        Outcome::Json(value) => {
            let rendered = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            writeln!(stdout, "{rendered}")?;
        }
        Outcome::Text(text) => writeln!(stdout, "{text}")?,
        Outcome::Rejected(errors) => {
            info!(count = errors.len(), "Input rejected");
            let mut stderr = io::stderr().lock();
            for error in &errors {
                writeln!(stderr, "{error}")?;
            }
            drop(stderr);
            drop(stdout);
            process::exit(1);
        }
    }
    Ok(())
}
