use std::collections::{BTreeMap, HashSet};

use crate::core::record::LogRecord;

/// Label used for records without a workout name
pub const UNKNOWN_WORKOUT: &str = "Unknown";

/// Sum `value` per `key`, keys in sorted order
pub fn aggregate_by_key<K, V>(records: &[LogRecord], key: K, value: V) -> BTreeMap<String, f64>
where
    K: Fn(&LogRecord) -> String,
    V: Fn(&LogRecord) -> f64,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key(record)).or_insert(0.0) += value(record);
    }
    totals
}

#[must_use]
pub fn total_volume(records: &[LogRecord]) -> f64 {
    records.iter().map(|r| r.volume).sum()
}

/// Volume per exercise
#[must_use]
pub fn exercise_volumes(records: &[LogRecord]) -> BTreeMap<String, f64> {
    aggregate_by_key(records, |r| r.exercise.clone(), |r| r.volume)
}

/// Volume per day (`YYYY-MM-DD`), in date order
#[must_use]
pub fn daily_volumes(records: &[LogRecord]) -> BTreeMap<String, f64> {
    aggregate_by_key(records, |r| r.date_only().to_string(), |r| r.volume)
}

/// Volume per workout name
#[must_use]
pub fn workout_volumes(records: &[LogRecord]) -> BTreeMap<String, f64> {
    aggregate_by_key(
        records,
        |r| r.workout.clone().unwrap_or_else(|| UNKNOWN_WORKOUT.to_string()),
        |r| r.volume,
    )
}

/// The `n` largest entries, largest first. Equal values keep key order.
#[must_use]
pub fn top_n(totals: &BTreeMap<String, f64>, n: usize) -> Vec<(String, f64)> {
    let mut entries: Vec<(String, f64)> = totals.iter().map(|(k, v)| (k.clone(), *v)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    entries.truncate(n);
    entries
}

/// Heaviest weight lifted per exercise
#[must_use]
pub fn max_weights_by_exercise(records: &[LogRecord]) -> BTreeMap<String, f64> {
    let mut maxes: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        let max = maxes.entry(record.exercise.clone()).or_insert(0.0);
        if record.weight > *max {
            *max = record.weight;
        }
    }
    maxes
}

/// Number of distinct (day, workout) sessions
#[must_use]
pub fn count_unique_workouts(records: &[LogRecord]) -> usize {
    records
        .iter()
        .map(|r| (r.date_only(), r.workout.as_deref().unwrap_or("")))
        .collect::<HashSet<_>>()
        .len()
}
