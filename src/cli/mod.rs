//! Command-line interface for workout-log.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **filter**: Filter the log by exercise and/or workout
//! - **score**: Show how two names score against each other
//! - **stats**: Summarize (optionally filtered) log records
//! - **log**: Append a set to the log
//!
//! ## Usage
//!
//! ```text
//! # Fuzzy exercise filter
//! workout-log filter --exercise Bench
//!
//! # Exercise within a workout, exact exercise name
//! workout-log filter --exercise "Bench Press" --workout "Push Day" --exact-match
//!
//! # Read the query from a parameter block
//! printf 'exercise: Squat\nworkout: Leg Day\n' | workout-log filter --params -
//!
//! # JSON output for scripting
//! workout-log --format json stats --exercise Squat
//!
//! # Log a set
//! workout-log log --exercise Squat --reps 5 --weight 120 --origin "[[Leg Day]]"
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::core::params::FilterParams;
use crate::parsing::code_block::parse_code_block_params;

pub mod filter;
pub mod log;
pub mod score;
pub mod stats;

/// Log file used when neither `--csv` nor `WORKOUT_LOG_CSV` is given
pub const DEFAULT_CSV_PATH: &str = "theGYM/Log/workout_logs.csv";

#[derive(Parser)]
#[command(name = "workout-log")]
#[command(version)]
#[command(about = "Filter, match and summarize workout logs stored as CSV")]
#[command(
    long_about = "workout-log reads a CSV workout log and selects the sets matching a free-text exercise or workout query.\n\nExercise queries are matched against both the exercise names in the log and the names of the files the records came from, and the best-scoring source decides how the log is filtered."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter log records by exercise and/or workout
    Filter(filter::FilterCommandArgs),

    /// Score a query against a candidate name
    Score(score::ScoreArgs),

    /// Summarize log records
    Stats(stats::StatsArgs),

    /// Append a set to the log
    Log(log::LogArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Location of the workout log
#[derive(Args, Debug, Clone)]
pub struct CsvArgs {
    /// Path to the workout log CSV
    #[arg(long, env = "WORKOUT_LOG_CSV", default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,
}

/// Query options shared by commands that filter the log
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Exercise to match (fuzzy unless --exact-match)
    #[arg(short, long)]
    pub exercise: Option<String>,

    /// Workout to match against each record's origin
    #[arg(short, long)]
    pub workout: Option<String>,

    /// Keep only sets logged with one of these protocols
    /// (repeatable or comma-separated; unset means `standard`)
    #[arg(short, long, value_delimiter = ',')]
    pub protocol: Vec<String>,

    /// Require the exercise to match exactly (case-insensitive)
    #[arg(long, overrides_with = "no_exact_match")]
    pub exact_match: bool,

    /// Fuzzy exercise matching, even if the parameters ask for exact
    #[arg(long, overrides_with = "exact_match")]
    pub no_exact_match: bool,

    /// Log match candidates and the chosen strategy
    #[arg(long)]
    pub debug: bool,

    /// Read `key: value` parameters from a file ('-' for stdin);
    /// explicit flags take precedence
    #[arg(long)]
    pub params: Option<PathBuf>,
}

impl FilterArgs {
    /// Merge the parameter block (if any) with explicit flags
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter file cannot be read.
    pub fn to_filter_params(&self) -> anyhow::Result<FilterParams> {
        let mut params = match &self.params {
            Some(path) => {
                let text = read_params_source(path)?;
                FilterParams::from_code_block(&parse_code_block_params(&text))
            }
            None => FilterParams::default(),
        };

        if self.exercise.is_some() {
            params.exercise.clone_from(&self.exercise);
        }
        if self.workout.is_some() {
            params.workout.clone_from(&self.workout);
        }
        if !self.protocol.is_empty() {
            params.protocol.clone_from(&self.protocol);
        }
        if self.exact_match {
            params.exact_match = true;
        } else if self.no_exact_match {
            params.exact_match = false;
        }
        params.debug |= self.debug;

        Ok(params)
    }
}

/// Make a value safe for a TSV cell: tabs and line breaks are escaped
#[must_use]
pub fn tsv_field(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}

fn read_params_source(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read parameters from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read parameters from {}", path.display()))
    }
}
