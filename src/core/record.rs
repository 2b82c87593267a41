use std::path::Path;

use serde::{Deserialize, Serialize};

/// Protocol assumed for records that do not name one
pub const DEFAULT_PROTOCOL: &str = "standard";

/// A single logged set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the set was performed, as written in the log (RFC 3339 or `YYYY-MM-DD`)
    pub date: String,

    /// Exercise name as entered by the user
    pub exercise: String,

    pub reps: u32,

    pub weight: f64,

    /// Usually reps * weight, but stored as logged
    pub volume: f64,

    /// Source note or explicit workout tag (e.g. `[[Push Day]]`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Workout name, used when `origin` is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Set protocol (`drop_set`, `rest_pause`, ...); `standard` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    /// Path of the file this record was read from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Explicit basename; derived from `file_path` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_basename: Option<String>,
}

impl LogRecord {
    pub fn new(date: impl Into<String>, exercise: impl Into<String>, reps: u32, weight: f64) -> Self {
        Self {
            date: date.into(),
            exercise: exercise.into(),
            reps,
            weight,
            volume: f64::from(reps) * weight,
            origin: None,
            workout: None,
            notes: None,
            timestamp: 0,
            protocol: None,
            file_path: None,
            file_basename: None,
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    #[must_use]
    pub fn with_workout(mut self, workout: impl Into<String>) -> Self {
        self.workout = Some(workout.into());
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_file_basename(mut self, basename: impl Into<String>) -> Self {
        self.file_basename = Some(basename.into());
        self
    }

    /// Basename of the originating file: the explicit basename if set,
    /// otherwise the file stem of `file_path`.
    #[must_use]
    pub fn resolved_basename(&self) -> Option<&str> {
        if let Some(basename) = self.file_basename.as_deref() {
            return Some(basename);
        }
        self.file_path
            .as_deref()
            .and_then(|p| Path::new(p).file_stem())
            .and_then(|s| s.to_str())
    }

    /// Origin used for workout filtering (`origin`, falling back to `workout`).
    /// A blank origin counts as missing.
    #[must_use]
    pub fn workout_source(&self) -> &str {
        self.origin
            .as_deref()
            .filter(|o| !o.trim().is_empty())
            .or(self.workout.as_deref())
            .unwrap_or("")
    }

    #[must_use]
    pub fn protocol_or_default(&self) -> &str {
        self.protocol
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROTOCOL)
    }

    /// The `YYYY-MM-DD` part of the date
    #[must_use]
    pub fn date_only(&self) -> &str {
        self.date.split('T').next().unwrap_or(&self.date)
    }
}
