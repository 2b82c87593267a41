use std::collections::HashSet;

use crate::core::record::LogRecord;
use crate::matching::strategy::FilterStrategy;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Keep the records selected by `strategy`.
///
/// Field strategies compare the exercise field to the key, filename
/// strategies compare the record's basename to the matched candidates. Both
/// comparisons are trimmed and case-insensitive; nothing is re-scored.
#[must_use]
pub fn apply_filter(records: &[LogRecord], strategy: &FilterStrategy) -> Vec<LogRecord> {
    match strategy {
        FilterStrategy::ExerciseFieldExact { key } | FilterStrategy::ExerciseField { key, .. } => {
            let key = normalize(key);
            records
                .iter()
                .filter(|r| normalize(&r.exercise) == key)
                .cloned()
                .collect()
        }
        FilterStrategy::FilenameExact { matches } | FilterStrategy::Filename { matches } => {
            let names: HashSet<String> = matches
                .iter()
                .map(|m| normalize(&m.candidate_name))
                .collect();
            records
                .iter()
                .filter(|r| {
                    r.resolved_basename()
                        .is_some_and(|b| names.contains(&normalize(b)))
                })
                .cloned()
                .collect()
        }
        FilterStrategy::None => Vec::new(),
    }
}
