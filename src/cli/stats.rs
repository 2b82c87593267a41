//! Stats command - summarize (optionally filtered) log records.

use std::collections::BTreeMap;

use clap::Args;

use crate::analysis::aggregate::{
    count_unique_workouts, daily_volumes, exercise_volumes, max_weights_by_exercise, top_n,
    total_volume, workout_volumes,
};
use crate::analysis::trend::{trend_direction, trend_line, TrendDirection, TrendLine};
use crate::cli::{tsv_field, CsvArgs, FilterArgs, OutputFormat};
use crate::store::LogStore;

/// Arguments for the stats command
#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub csv: CsvArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Number of exercises to list by volume
    #[arg(long, default_value = "5")]
    pub top: usize,
}

/// Summary of a set of records
struct Summary {
    title: String,
    method: String,
    record_count: usize,
    total_volume: f64,
    unique_workouts: usize,
    top_exercises: Vec<(String, f64)>,
    max_weights: BTreeMap<String, f64>,
    by_workout: BTreeMap<String, f64>,
    daily: BTreeMap<String, f64>,
    trend: TrendLine,
    direction: TrendDirection,
}

/// Execute the stats command
///
/// # Errors
///
/// Returns an error if the parameter file or the log cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: StatsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let params = args.filter.to_filter_params()?;
    let store = LogStore::new(&args.csv.csv);
    let result = store.filter(&params)?;

    if result.is_empty() {
        match format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "title": result.title_prefix,
                    "method": result.filter_method_used,
                    "records": 0,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text | OutputFormat::Tsv => println!("{}", result.no_data_message()),
        }
        return Ok(());
    }

    let records = &result.filtered_data;
    let daily = daily_volumes(records);
    let series: Vec<f64> = daily.values().copied().collect();
    let trend = trend_line(&series);

    let summary = Summary {
        title: result.title_prefix.clone(),
        method: result.filter_method_used.clone(),
        record_count: records.len(),
        total_volume: total_volume(records),
        unique_workouts: count_unique_workouts(records),
        top_exercises: top_n(&exercise_volumes(records), args.top),
        max_weights: max_weights_by_exercise(records),
        by_workout: workout_volumes(records),
        direction: trend_direction(trend.slope, &series),
        daily,
        trend,
    };

    match format {
        OutputFormat::Text => print_text(&summary, verbose),
        OutputFormat::Json => print_json(&summary)?,
        OutputFormat::Tsv => print_tsv(&summary),
    }

    Ok(())
}

fn print_text(summary: &Summary, verbose: bool) {
    println!("{}", summary.title);
    println!("{}", "=".repeat(summary.title.chars().count().max(20)));
    println!("Method:          {}", summary.method);
    println!("Records:         {}", summary.record_count);
    println!("Total volume:    {:.1}", summary.total_volume);
    println!("Workouts:        {}", summary.unique_workouts);
    println!("Volume trend:    {}", summary.direction);
    if verbose {
        println!(
            "                 slope {:.2}/day over {} days",
            summary.trend.slope,
            summary.daily.len()
        );
    }

    println!();
    println!("Top exercises by volume:");
    for (i, (exercise, volume)) in summary.top_exercises.iter().enumerate() {
        let max = summary.max_weights.get(exercise).copied().unwrap_or(0.0);
        println!("  {}. {exercise:<24} {volume:>10.1}  (max {max:.1})", i + 1);
    }

    if verbose {
        println!();
        println!("Volume by workout:");
        for (workout, volume) in &summary.by_workout {
            println!("  {workout:<26} {volume:>10.1}");
        }

        println!();
        println!("Daily volume:");
        for (day, volume) in &summary.daily {
            println!("  {day}  {volume:>10.1}");
        }
    }
}

fn print_json(summary: &Summary) -> anyhow::Result<()> {
    let top: Vec<_> = summary
        .top_exercises
        .iter()
        .map(|(exercise, volume)| {
            serde_json::json!({
                "exercise": exercise,
                "volume": volume,
                "max_weight": summary.max_weights.get(exercise),
            })
        })
        .collect();

    let output = serde_json::json!({
        "title": summary.title,
        "method": summary.method,
        "records": summary.record_count,
        "total_volume": summary.total_volume,
        "unique_workouts": summary.unique_workouts,
        "top_exercises": top,
        "max_weights": summary.max_weights,
        "workout_volumes": summary.by_workout,
        "daily_volumes": summary.daily,
        "trend": {
            "slope": summary.trend.slope,
            "intercept": summary.trend.intercept,
            "direction": summary.direction,
        },
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(summary: &Summary) {
    println!("exercise\tvolume\tmax_weight");
    for (exercise, volume) in &summary.top_exercises {
        let max = summary.max_weights.get(exercise).copied().unwrap_or(0.0);
        println!("{}\t{volume}\t{max}", tsv_field(exercise));
    }
}
