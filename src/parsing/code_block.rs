use std::collections::BTreeMap;

use serde::Serialize;

/// A single value from a `key: value` parameter block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    List(Vec<String>),
    Text(String),
}

impl ParamValue {
    /// Classify a raw (already trimmed) value.
    ///
    /// `[a, b]` becomes a list, `true`/`false` a boolean, anything that parses
    /// as a finite number a number, everything else text.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            return Self::List(
                inner
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }

        match value {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }

        if !value.is_empty() {
            if let Ok(n) = value.parse::<f64>() {
                if n.is_finite() {
                    return Self::Number(n);
                }
            }
        }

        Self::Text(value.to_string())
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Render scalar values as text. Numbers lose a trailing `.0`.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(format_number(*n)),
            Self::Bool(b) => Some(b.to_string()),
            Self::List(_) => None,
        }
    }
}

#[allow(clippy::cast_possible_truncation)] // guarded by the fract/magnitude check
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse a parameter block of `key: value` lines.
///
/// Blank lines and lines starting with `#` are skipped, as are lines without
/// a key before the first colon. Later keys overwrite earlier ones.
#[must_use]
pub fn parse_code_block_params(text: &str) -> BTreeMap<String, ParamValue> {
    let mut params = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        params.insert(key.to_string(), ParamValue::parse(value.trim()));
    }

    params
}
