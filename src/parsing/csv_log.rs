use std::path::Path;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::record::LogRecord;
use crate::utils::validation::{check_record_limit, MAX_LOG_RECORDS};

/// Column order of the workout log
pub const CSV_HEADER: &str =
    "date,exercise,reps,weight,volume,origin,workout,notes,timestamp,protocol";

/// Rows with fewer fields than this are skipped
const MIN_FIELDS: usize = 6;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Too many log records: {0} exceeds maximum allowed ({MAX_LOG_RECORDS})")]
    TooManyRecords(usize),
}

/// Parse a workout log CSV file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or
/// `ParseError::TooManyRecords` if the record limit is exceeded.
pub fn parse_csv_file(path: &Path) -> Result<Vec<LogRecord>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_csv_text(&content)
}

/// Parse workout log CSV text.
///
/// The first non-blank line is the header and is skipped. Rows that are too
/// short, have no exercise, non-positive reps or a negative weight are
/// dropped rather than reported.
///
/// # Errors
///
/// Returns `ParseError::TooManyRecords` if the record limit is exceeded.
pub fn parse_csv_text(text: &str) -> Result<Vec<LogRecord>, ParseError> {
    let mut records = Vec::new();

    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    // Header
    if lines.next().is_none() {
        return Ok(records);
    }

    for (line_num, line) in lines {
        let fields = split_csv_line(line);
        if fields.len() < MIN_FIELDS {
            debug!(line = line_num, fields = fields.len(), "skipping short row");
            continue;
        }

        let Some(record) = record_from_fields(&fields) else {
            debug!(line = line_num, "skipping invalid row");
            continue;
        };

        if check_record_limit(records.len()).is_some() {
            return Err(ParseError::TooManyRecords(records.len()));
        }

        records.push(record);
    }

    Ok(records)
}

fn record_from_fields(fields: &[String]) -> Option<LogRecord> {
    let field = |i: usize| fields.get(i).map_or("", |f| f.trim());
    let optional = |i: usize| Some(field(i)).filter(|v| !v.is_empty()).map(String::from);

    let exercise = field(1);
    // Unparseable numbers read as zero
    let reps = parse_int(field(2));
    let weight = parse_float(field(3));

    if exercise.is_empty() || reps <= 0 || weight < 0.0 {
        return None;
    }

    let timestamp = match parse_int(field(8)) {
        0 => Utc::now().timestamp_millis(),
        ts => ts,
    };

    Some(LogRecord {
        date: field(0).to_string(),
        exercise: exercise.to_string(),
        reps: u32::try_from(reps).unwrap_or(u32::MAX),
        weight,
        volume: parse_float(field(4)),
        origin: optional(5),
        workout: optional(6),
        notes: optional(7),
        timestamp,
        protocol: optional(9),
        file_path: None,
        file_basename: None,
    })
}

/// Integer prefix of a field, 0 when there is none
fn parse_int(s: &str) -> i64 {
    let s = s.trim();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().unwrap_or(0)
}

/// Longest decimal prefix of a field (`80kg` reads as 80), 0 when there is none
fn parse_float(s: &str) -> f64 {
    let s = s.trim();
    let prefix = &s[..float_prefix_len(s)];
    match prefix.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            if !s.is_empty() {
                warn!(value = s, "unparseable number in workout log, using 0");
            }
            0.0
        }
    }
}

fn float_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }
    if !has_digits {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    end
}

/// Split one CSV line, honoring double quotes and `""` escapes
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render one record as a CSV line (no trailing newline)
#[must_use]
pub fn record_to_csv_line(record: &LogRecord) -> String {
    let values = [
        record.date.clone(),
        record.exercise.clone(),
        record.reps.to_string(),
        record.weight.to_string(),
        record.volume.to_string(),
        record.origin.clone().unwrap_or_default(),
        record.workout.clone().unwrap_or_default(),
        record.notes.clone().unwrap_or_default(),
        record.timestamp.to_string(),
        record.protocol.clone().unwrap_or_default(),
    ];

    values
        .iter()
        .map(|v| escape_field(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a complete log, header included
#[must_use]
pub fn records_to_csv(records: &[LogRecord]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(records.iter().map(record_to_csv_line))
        .collect::<Vec<_>>()
        .join("\n")
}
