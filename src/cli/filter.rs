//! Filter command - select log records by exercise and/or workout.

use clap::Args;

use crate::cli::{tsv_field, CsvArgs, FilterArgs, OutputFormat};
use crate::core::record::LogRecord;
use crate::matching::data_filter::FilterResult;
use crate::matching::strategy::FilterStrategy;
use crate::store::LogStore;

/// Arguments for the filter command
#[derive(Args)]
pub struct FilterCommandArgs {
    #[command(flatten)]
    pub csv: CsvArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Print at most this many records (text output only)
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Execute the filter command
///
/// An empty result is not an error: the "no data" message is printed and
/// the command succeeds.
///
/// # Errors
///
/// Returns an error if the parameter file or the log cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: FilterCommandArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = args.filter.to_filter_params()?;
    let store = LogStore::new(&args.csv.csv);

    if verbose {
        eprintln!("Reading {}", store.path().display());
    }

    let result = store.filter(&params)?;

    match format {
        OutputFormat::Text => print_text(&result, args.limit, verbose),
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Tsv => print_tsv(&result),
    }

    Ok(())
}

fn print_text(result: &FilterResult, limit: Option<usize>, verbose: bool) {
    if result.is_empty() {
        println!("{}", result.no_data_message());
        return;
    }

    println!("{}", result.title_prefix);
    println!("{}", "=".repeat(result.title_prefix.chars().count().max(20)));
    println!("Method:  {}", result.filter_method_used);
    println!("Records: {}", result.filtered_data.len());
    if verbose {
        if let Some(strategy) = &result.exercise_strategy {
            match strategy.source() {
                Some(source) => println!(
                    "Strategy: {} (best {source} match: {})",
                    strategy.tag(),
                    strategy.tier()
                ),
                None => println!("Strategy: {}", strategy.tag()),
            }
        }
    }
    println!();

    let shown = limit.unwrap_or(result.filtered_data.len());
    for record in result.filtered_data.iter().take(shown) {
        println!("{}", format_record_line(record));
    }

    let hidden = result.filtered_data.len().saturating_sub(shown);
    if hidden > 0 {
        println!("... and {hidden} more");
    }
}

fn format_record_line(record: &LogRecord) -> String {
    let mut line = format!(
        "{}  {:<24} {:>3} x {:>7.1}  vol {:>8.1}",
        record.date_only(),
        record.exercise,
        record.reps,
        record.weight,
        record.volume
    );
    let workout = record.workout_source();
    if !workout.is_empty() {
        line.push_str("  ");
        line.push_str(workout);
    }
    line
}

fn print_json(result: &FilterResult) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "title": result.title_prefix,
        "method": result.filter_method_used,
        "strategy": result.exercise_strategy.as_ref().map(FilterStrategy::tag),
        "source": result.exercise_strategy.as_ref().and_then(FilterStrategy::source),
        "score": result.exercise_strategy.as_ref().and_then(FilterStrategy::score),
        "count": result.filtered_data.len(),
        "records": result.filtered_data,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(result: &FilterResult) {
    println!("date\texercise\treps\tweight\tvolume\torigin\tworkout\tnotes\tprotocol");
    for record in &result.filtered_data {
        println!("{}", format_tsv_row(record));
    }
}

fn format_tsv_row(record: &LogRecord) -> String {
    let optional = |value: &Option<String>| tsv_field(value.as_deref().unwrap_or(""));
    [
        tsv_field(&record.date),
        tsv_field(&record.exercise),
        record.reps.to_string(),
        record.weight.to_string(),
        record.volume.to_string(),
        optional(&record.origin),
        optional(&record.workout),
        optional(&record.notes),
        tsv_field(record.protocol_or_default()),
    ]
    .join("\t")
}
