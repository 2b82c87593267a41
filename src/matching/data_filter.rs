use serde::Serialize;
use tracing::{debug, info};

use crate::core::params::FilterParams;
use crate::core::record::LogRecord;
use crate::matching::engine::{find_exercise_matches, MatchResult};
use crate::matching::filter::apply_filter;
use crate::matching::strategy::{select_strategy, FilterStrategy};
use crate::utils::validation::normalize_query;

/// Title used when no query narrows the log
pub const DEFAULT_TITLE: &str = "Workout Data";

/// Method description when no filter applies
const NO_FILTER: &str = "none";

/// Result of filtering a log
#[derive(Debug, Clone, Serialize)]
pub struct FilterResult {
    /// Records that passed every filter, in log order
    pub filtered_data: Vec<LogRecord>,

    /// Human-readable description of how the records were selected
    pub filter_method_used: String,

    /// The query value(s), for display
    pub title_prefix: String,

    /// Strategy chosen for the exercise query, if there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_strategy: Option<FilterStrategy>,
}

impl FilterResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered_data.is_empty()
    }

    /// Message shown when nothing matched
    #[must_use]
    pub fn no_data_message(&self) -> String {
        format!(
            "No data found for {} ({}).",
            self.title_prefix, self.filter_method_used
        )
    }
}

/// Filters workout log records by exercise, workout and protocol.
///
/// When both queries are given the exercise filter runs first and the
/// workout filter only sees its output (logical AND). An exercise query that
/// matches nothing short-circuits the workout filter. A protocol filter, if
/// any, is applied last.
pub struct DataFilter;

impl DataFilter {
    /// Filter `records` according to `params`. Never fails: a query that
    /// matches nothing yields an empty result with a description saying so.
    #[must_use]
    pub fn filter_data(records: &[LogRecord], params: &FilterParams) -> FilterResult {
        let result = Self::filter_by_queries(records, params);

        let protocols = params.protocol_query();
        if protocols.is_empty() {
            result
        } else {
            Self::filter_by_protocol(result, &protocols)
        }
    }

    fn filter_by_queries(records: &[LogRecord], params: &FilterParams) -> FilterResult {
        match (params.exercise_query(), params.workout_query()) {
            (Some(exercise), Some(workout)) => {
                let by_exercise = Self::filter_by_exercise(records, exercise, params);
                if by_exercise.is_empty() {
                    return FilterResult {
                        filtered_data: Vec::new(),
                        filter_method_used: format!(
                            "No data found for exercise \"{exercise}\" with workout \"{workout}\""
                        ),
                        title_prefix: format!("{exercise} + {workout}"),
                        exercise_strategy: by_exercise.exercise_strategy,
                    };
                }

                let by_workout = Self::filter_by_workout(&by_exercise.filtered_data, workout);
                FilterResult {
                    filtered_data: by_workout.filtered_data,
                    filter_method_used: format!(
                        "{} AND {}",
                        by_exercise.filter_method_used, by_workout.filter_method_used
                    ),
                    title_prefix: format!(
                        "{} + {}",
                        by_exercise.title_prefix, by_workout.title_prefix
                    ),
                    exercise_strategy: by_exercise.exercise_strategy,
                }
            }
            (Some(exercise), None) => Self::filter_by_exercise(records, exercise, params),
            (None, Some(workout)) => Self::filter_by_workout(records, workout),
            (None, None) => FilterResult {
                filtered_data: records.to_vec(),
                filter_method_used: NO_FILTER.to_string(),
                title_prefix: DEFAULT_TITLE.to_string(),
                exercise_strategy: None,
            },
        }
    }

    /// Keep records whose protocol (`standard` when unset) is one of
    /// `protocols`. The description is appended to the earlier one.
    fn filter_by_protocol(mut result: FilterResult, protocols: &[String]) -> FilterResult {
        result
            .filtered_data
            .retain(|r| protocols.iter().any(|p| *p == r.protocol_or_default().to_lowercase()));

        let method = format!("protocol: [{}]", protocols.join(", "));
        result.filter_method_used = if result.filter_method_used == NO_FILTER {
            method
        } else {
            format!("{} + {method}", result.filter_method_used)
        };
        result
    }

    /// Case-insensitive substring match of the workout name against each
    /// record's origin (or workout), ignoring `[[`/`]]` link brackets.
    fn filter_by_workout(records: &[LogRecord], workout: &str) -> FilterResult {
        let needle = normalize_query(workout);

        let filtered_data = records
            .iter()
            .filter(|r| {
                let origin = r.workout_source().replace("[[", "").replace("]]", "");
                normalize_query(&origin).contains(&needle)
            })
            .cloned()
            .collect();

        FilterResult {
            filtered_data,
            filter_method_used: format!("origin field: \"{workout}\""),
            title_prefix: workout.to_string(),
            exercise_strategy: None,
        }
    }

    fn filter_by_exercise(records: &[LogRecord], exercise: &str, params: &FilterParams) -> FilterResult {
        let matches = find_exercise_matches(records, exercise);
        log_candidates(&matches, exercise, params.debug);

        let strategy = select_strategy(
            &matches.file_name_matches,
            &matches.exercise_field_scores,
            params.exact_match,
            exercise,
        );
        let filtered_data = apply_filter(records, &strategy);

        if params.debug {
            info!(
                exercise,
                strategy = strategy.tag(),
                kept = filtered_data.len(),
                "exercise filter applied"
            );
        }

        FilterResult {
            filtered_data,
            filter_method_used: describe_strategy(&strategy, exercise),
            title_prefix: exercise.to_string(),
            exercise_strategy: Some(strategy),
        }
    }
}

/// Human-readable description of an exercise strategy
#[must_use]
pub fn describe_strategy(strategy: &FilterStrategy, query: &str) -> String {
    match strategy {
        FilterStrategy::ExerciseFieldExact { key } => {
            format!("exact match on exercise field: \"{key}\"")
        }
        FilterStrategy::FilenameExact { .. } => {
            format!("exact match on file name: \"{query}\"")
        }
        FilterStrategy::ExerciseField { key, score } => {
            format!("exercise field: \"{key}\" (score: {score})")
        }
        FilterStrategy::Filename { matches } => match matches.first() {
            Some(m) => format!("file name (score: {})", m.score),
            None => "file name (score: N/A)".to_string(),
        },
        FilterStrategy::None => "No match found".to_string(),
    }
}

fn log_candidates(matches: &MatchResult, query: &str, verbose: bool) {
    let files = matches.file_name_matches.len();
    let fields = matches.exercise_field_scores.len();

    if verbose {
        info!(query, files, fields, "exercise match candidates");
        for (key, score) in matches.exercise_field_scores.iter() {
            info!(key, score, "exercise field candidate");
        }
    } else {
        debug!(
            query,
            files,
            fields,
            best_file = matches.best_file_score(),
            best_field = matches.best_field_score(),
            "exercise match candidates"
        );
    }
}
