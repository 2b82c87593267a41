use std::collections::HashMap;

use serde::Serialize;

use crate::core::record::LogRecord;
use crate::core::types::MatchSource;
use crate::matching::scoring::match_score;

/// A file basename that matched the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseMatch {
    /// The basename that was scored
    pub candidate_name: String,

    /// Match score (0-100)
    pub score: u8,

    /// Path of the file the basename came from (empty when only a basename was known)
    pub source_file_path: String,

    pub strategy_tag: MatchSource,
}

/// Distinct exercise-field values and their scores, in first-seen order.
///
/// Keys are compared case-sensitively, exactly as they appear in the log.
#[derive(Debug, Clone, Default)]
pub struct ExerciseFieldScores {
    entries: Vec<(String, u8)>,
    index: HashMap<String, usize>,
}

impl ExerciseFieldScores {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key unless it is already present. Returns whether it was inserted.
    pub fn insert(&mut self, key: impl Into<String>, score: u8) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, score));
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<u8> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.entries.iter().map(|(k, s)| (k.as_str(), *s))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score, and the first key reaching it
    #[must_use]
    pub fn best(&self) -> Option<(&str, u8)> {
        self.iter().fold(None, |best, (key, score)| match best {
            Some((_, best_score)) if best_score >= score => best,
            _ => Some((key, score)),
        })
    }
}

/// Everything the finder learned about a query
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// One entry per record whose file basename scored above zero
    pub file_name_matches: Vec<ExerciseMatch>,

    /// Distinct exercise fields that scored above zero
    pub exercise_field_scores: ExerciseFieldScores,
}

impl MatchResult {
    /// Highest filename score, 0 when there are no filename matches
    #[must_use]
    pub fn best_file_score(&self) -> u8 {
        self.file_name_matches
            .iter()
            .map(|m| m.score)
            .max()
            .unwrap_or(0)
    }

    /// Highest exercise-field score, 0 when there are none
    #[must_use]
    pub fn best_field_score(&self) -> u8 {
        self.exercise_field_scores.best().map_or(0, |(_, s)| s)
    }
}

/// Score every record's file basename and exercise field against `query`.
///
/// Filename matches are not deduplicated: two records from the same file
/// produce two entries. Exercise fields are scored once per distinct string.
#[must_use]
pub fn find_exercise_matches(records: &[LogRecord], query: &str) -> MatchResult {
    let mut result = MatchResult::default();

    for record in records {
        if let Some(basename) = record.resolved_basename() {
            let score = match_score(query, basename);
            if score > 0 {
                result.file_name_matches.push(ExerciseMatch {
                    candidate_name: basename.to_string(),
                    score,
                    source_file_path: record.file_path.clone().unwrap_or_default(),
                    strategy_tag: MatchSource::Filename,
                });
            }
        }

        if result.exercise_field_scores.contains_key(&record.exercise) {
            continue;
        }
        let score = match_score(query, &record.exercise);
        if score > 0 {
            result.exercise_field_scores.insert(record.exercise.as_str(), score);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(exercise: &str) -> LogRecord {
        LogRecord::new("2024-01-15", exercise, 5, 100.0)
    }

    #[test]
    fn test_field_scores_first_seen_order() {
        let records = vec![
            record("Bench Press"),
            record("Squat"),
            record("Incline Bench Press"),
            record("Bench Press"),
        ];
        let result = find_exercise_matches(&records, "Bench");

        let fields: Vec<_> = result.exercise_field_scores.iter().collect();
        assert_eq!(fields, vec![("Bench Press", 90), ("Incline Bench Press", 70)]);
        assert!(result.file_name_matches.is_empty());
    }

    #[test]
    fn test_field_keys_are_case_sensitive() {
        let records = vec![record("Squat"), record("squat")];
        let result = find_exercise_matches(&records, "squat");
        assert_eq!(result.exercise_field_scores.len(), 2);
        assert_eq!(result.exercise_field_scores.get("Squat"), Some(100));
    }

    #[test]
    fn test_filename_matches_per_record() {
        let records = vec![
            record("Panca").with_file_path("Esercizi/Bench Press.md"),
            record("Panca").with_file_path("Esercizi/Bench Press.md"),
            record("Squat").with_file_path("Esercizi/Squat.md"),
        ];
        let result = find_exercise_matches(&records, "bench press");

        assert_eq!(result.file_name_matches.len(), 2);
        assert!(result
            .file_name_matches
            .iter()
            .all(|m| m.candidate_name == "Bench Press" && m.score == 100));
        assert_eq!(result.file_name_matches[0].source_file_path, "Esercizi/Bench Press.md");
        assert_eq!(result.best_file_score(), 100);
        assert_eq!(result.best_field_score(), 0);
    }

    #[test]
    fn test_records_not_mutated() {
        let records = vec![record("Squat")];
        let before = records.clone();
        let _ = find_exercise_matches(&records, "squat");
        assert_eq!(records, before);
    }

    #[test]
    fn test_best_prefers_first_on_tie() {
        let mut scores = ExerciseFieldScores::new();
        scores.insert("Bench Press", 90);
        scores.insert("Bench Dip", 90);
        scores.insert("Press", 80);
        assert_eq!(scores.best(), Some(("Bench Press", 90)));
    }

    #[test]
    fn test_insert_keeps_first_value() {
        let mut scores = ExerciseFieldScores::new();
        assert!(scores.insert("Squat", 100));
        assert!(!scores.insert("Squat", 50));
        assert_eq!(scores.get("Squat"), Some(100));
    }
}
