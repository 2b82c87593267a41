//! Score command - show how a query scores against candidate names.
//!
//! Useful for checking why a query picked (or missed) an exercise without
//! touching the log.

use clap::Args;

use crate::cli::{tsv_field, OutputFormat};
use crate::core::types::MatchTier;
use crate::matching::scoring::match_tier;
use crate::matching::strategy::PATH_MATCH_THRESHOLD;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Query (what the user typed)
    #[arg(required = true)]
    pub query: String,

    /// Candidate names to score the query against
    #[arg(required = true, num_args = 1..)]
    pub candidates: Vec<String>,
}

/// Score of one candidate
struct ScoreResult {
    candidate: String,
    tier: MatchTier,
}

impl ScoreResult {
    fn usable(&self) -> bool {
        self.tier.score() >= PATH_MATCH_THRESHOLD
    }
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let results: Vec<ScoreResult> = args
        .candidates
        .iter()
        .map(|candidate| ScoreResult {
            candidate: candidate.clone(),
            tier: match_tier(&args.query, candidate),
        })
        .collect();

    match format {
        OutputFormat::Text => print_text(&args.query, &results, verbose),
        OutputFormat::Json => print_json(&args.query, &results)?,
        OutputFormat::Tsv => print_tsv(&args.query, &results),
    }

    Ok(())
}

fn print_text(query: &str, results: &[ScoreResult], verbose: bool) {
    println!("Query: {query}");
    println!();

    for result in results {
        let marker = if result.usable() { "" } else { "  (below threshold)" };
        println!(
            "{:>3}  {:<12} {}{}",
            result.tier.score(),
            result.tier.to_string(),
            result.candidate,
            marker
        );
    }

    if verbose {
        println!();
        println!("Scores of {PATH_MATCH_THRESHOLD} or more are used for fuzzy filtering.");
    }
}

fn print_json(query: &str, results: &[ScoreResult]) -> anyhow::Result<()> {
    let scores: Vec<_> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "candidate": r.candidate,
                "score": r.tier.score(),
                "tier": r.tier,
                "usable": r.usable(),
            })
        })
        .collect();

    let output = serde_json::json!({
        "query": query,
        "threshold": PATH_MATCH_THRESHOLD,
        "scores": scores,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(query: &str, results: &[ScoreResult]) {
    println!("query\tcandidate\tscore\ttier");
    for result in results {
        println!(
            "{}\t{}\t{}\t{}",
            tsv_field(query),
            tsv_field(&result.candidate),
            result.tier.score(),
            result.tier
        );
    }
}
