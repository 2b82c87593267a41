use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parsing::code_block::ParamValue;

/// Query parameters for filtering a workout log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// Free-text exercise query (e.g. "Bench" or "Panca Piana")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<String>,

    /// Free-text workout query, matched against each record's origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout: Option<String>,

    /// Set protocols to keep (any of them); empty keeps every protocol
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub protocol: Vec<String>,

    /// Require case-insensitive equality instead of fuzzy scoring
    #[serde(default)]
    pub exact_match: bool,

    /// Log match candidates and the chosen strategy at info level
    #[serde(default)]
    pub debug: bool,
}

impl FilterParams {
    #[must_use]
    pub fn exercise(name: impl Into<String>) -> Self {
        Self {
            exercise: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn workout(name: impl Into<String>) -> Self {
        Self {
            workout: Some(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_workout(mut self, name: impl Into<String>) -> Self {
        self.workout = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol.push(protocol.into());
        self
    }

    #[must_use]
    pub fn with_exact_match(mut self, exact: bool) -> Self {
        self.exact_match = exact;
        self
    }

    /// Build filter parameters from a parsed code block.
    ///
    /// Reads `exercise`, `workout` (or the older `workoutPath`), `protocol`
    /// (one value or a `[list]`), `exactMatch` and `debug`. Unknown keys are
    /// ignored.
    #[must_use]
    pub fn from_code_block(params: &BTreeMap<String, ParamValue>) -> Self {
        let workout = params
            .get("workout")
            .and_then(ParamValue::as_text)
            .or_else(|| params.get("workoutPath").and_then(ParamValue::as_text));

        let protocol = match params.get("protocol") {
            Some(ParamValue::List(values)) => values.clone(),
            Some(value) => value.as_text().into_iter().collect(),
            None => Vec::new(),
        };

        Self {
            exercise: params.get("exercise").and_then(ParamValue::as_text),
            workout,
            protocol,
            exact_match: params
                .get("exactMatch")
                .and_then(ParamValue::as_bool)
                .unwrap_or(false),
            debug: params
                .get("debug")
                .and_then(ParamValue::as_bool)
                .unwrap_or(false),
        }
    }

    /// The exercise query, trimmed, if it is not blank
    #[must_use]
    pub fn exercise_query(&self) -> Option<&str> {
        non_blank(self.exercise.as_deref())
    }

    /// The workout query, trimmed, if it is not blank
    #[must_use]
    pub fn workout_query(&self) -> Option<&str> {
        non_blank(self.workout.as_deref())
    }

    /// Protocols to keep, lower-cased and trimmed, blanks dropped
    #[must_use]
    pub fn protocol_query(&self) -> Vec<String> {
        self.protocol
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
