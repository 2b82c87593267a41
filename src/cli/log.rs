//! Log command - append a set to the workout log.

use chrono::{SecondsFormat, Utc};
use clap::Args;

use crate::cli::{tsv_field, CsvArgs, OutputFormat};
use crate::core::record::LogRecord;
use crate::store::LogStore;

/// Arguments for the log command
#[derive(Args)]
pub struct LogArgs {
    #[command(flatten)]
    pub csv: CsvArgs,

    /// Exercise name
    #[arg(short, long)]
    pub exercise: String,

    /// Repetitions in the set
    #[arg(short, long)]
    pub reps: u32,

    /// Weight lifted
    #[arg(long)]
    pub weight: f64,

    /// Note the set was logged from, usually a `[[wiki link]]`
    #[arg(long)]
    pub origin: Option<String>,

    /// Workout name
    #[arg(short, long)]
    pub workout: Option<String>,

    /// Set protocol, e.g. `drop_set` or `rest_pause` (default `standard`)
    #[arg(short, long)]
    pub protocol: Option<String>,

    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Date of the set (defaults to now, RFC 3339)
    #[arg(long)]
    pub date: Option<String>,
}

impl LogArgs {
    fn to_record(&self) -> LogRecord {
        let now = Utc::now();
        let date = self
            .date
            .clone()
            .unwrap_or_else(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

        let mut record = LogRecord::new(date, self.exercise.trim(), self.reps, self.weight)
            .with_timestamp(now.timestamp_millis());
        if let Some(origin) = non_blank(self.origin.as_deref()) {
            record = record.with_origin(origin);
        }
        if let Some(workout) = non_blank(self.workout.as_deref()) {
            record = record.with_workout(workout);
        }
        if let Some(notes) = non_blank(self.notes.as_deref()) {
            record = record.with_notes(notes);
        }
        if let Some(protocol) = non_blank(self.protocol.as_deref()) {
            record = record.with_protocol(protocol);
        }
        record
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Execute the log command
///
/// # Errors
///
/// Returns an error if the entry is invalid or the log cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: LogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let record = args.to_record();
    let store = LogStore::new(&args.csv.csv);
    store.append(&record)?;

    match format {
        OutputFormat::Text => {
            println!(
                "Logged {} {} x {} (volume {})",
                record.exercise, record.reps, record.weight, record.volume
            );
            if verbose {
                println!("Log: {}", store.path().display());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Tsv => {
            println!("date\texercise\treps\tweight\tvolume");
            println!(
                "{}\t{}\t{}\t{}\t{}",
                tsv_field(&record.date),
                tsv_field(&record.exercise),
                record.reps,
                record.weight,
                record.volume
            );
        }
    }

    Ok(())
}
