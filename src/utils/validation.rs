//! Centralized validation and helper functions.

use crate::core::record::LogRecord;

/// Maximum number of records read from a single log file
pub const MAX_LOG_RECORDS: usize = 100_000;

/// Longest exercise name accepted for a new entry
pub const MAX_EXERCISE_NAME_LENGTH: usize = 200;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new record.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_record_limit(records.len()).is_some() {
///     return Err(...);
/// }
/// records.push(new_record); // Safe to add
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_LOG_RECORDS {
        Some(format!(
            "Too many log records: adding another would exceed maximum of {MAX_LOG_RECORDS}"
        ))
    } else {
        None
    }
}

/// Lower-case, collapse whitespace runs to one space, and trim.
///
/// # Examples
///
/// ```
/// use workout_log::utils::validation::normalize_query;
///
/// assert_eq!(normalize_query("  Push \t Day "), "push day");
/// ```
#[must_use]
pub fn normalize_query(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Entry validation error types
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Exercise name is empty")]
    EmptyExercise,
    #[error("Exercise name too long: exceeds {MAX_EXERCISE_NAME_LENGTH} characters")]
    ExerciseTooLong,
    #[error("Reps must be greater than zero")]
    InvalidReps,
    #[error("Weight must be a finite, non-negative number (got {0})")]
    InvalidWeight(f64),
    #[error("Date is empty")]
    EmptyDate,
}

/// Validate a record before it is written to the log.
///
/// # Errors
///
/// Returns the first rule the record breaks.
pub fn validate_entry(record: &LogRecord) -> Result<(), ValidationError> {
    let exercise = record.exercise.trim();
    if exercise.is_empty() {
        return Err(ValidationError::EmptyExercise);
    }
    if exercise.chars().count() > MAX_EXERCISE_NAME_LENGTH {
        return Err(ValidationError::ExerciseTooLong);
    }
    if record.reps == 0 {
        return Err(ValidationError::InvalidReps);
    }
    if !record.weight.is_finite() || record.weight < 0.0 {
        return Err(ValidationError::InvalidWeight(record.weight));
    }
    if record.date.trim().is_empty() {
        return Err(ValidationError::EmptyDate);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(0).is_none());
        assert!(check_record_limit(MAX_LOG_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_LOG_RECORDS).is_some());
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("Leg  Day"), "leg day");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_validate_entry() {
        let ok = LogRecord::new("2024-01-15", "Squat", 5, 100.0);
        assert_eq!(validate_entry(&ok), Ok(()));

        let bodyweight = LogRecord::new("2024-01-15", "Pull Up", 10, 0.0);
        assert_eq!(validate_entry(&bodyweight), Ok(()));

        let cases = [
            (LogRecord::new("2024-01-15", "  ", 5, 100.0), ValidationError::EmptyExercise),
            (LogRecord::new("2024-01-15", "Squat", 0, 100.0), ValidationError::InvalidReps),
            (LogRecord::new("", "Squat", 5, 100.0), ValidationError::EmptyDate),
            (
                LogRecord::new("2024-01-15", "x".repeat(MAX_EXERCISE_NAME_LENGTH + 1), 5, 1.0),
                ValidationError::ExerciseTooLong,
            ),
        ];
        for (record, expected) in cases {
            assert_eq!(validate_entry(&record), Err(expected));
        }

        let negative = LogRecord::new("2024-01-15", "Squat", 5, -1.0);
        assert!(matches!(
            validate_entry(&negative),
            Err(ValidationError::InvalidWeight(_))
        ));
    }
}
