use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::params::FilterParams;
use crate::core::record::LogRecord;
use crate::matching::data_filter::{DataFilter, FilterResult};
use crate::parsing::csv_log::{parse_csv_file, record_to_csv_line, ParseError, CSV_HEADER};
use crate::store::cache::{CacheConfig, LogCache};
use crate::utils::validation::{validate_entry, ValidationError};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access workout log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse workout log: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid log entry: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to replace workout log: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Configuration for a [`LogStore`]
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub cache: CacheConfig,
    /// How many times to retry while the log file does not exist yet
    pub max_retries: u32,
    /// Fixed delay between retries
    pub retry_delay: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            max_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// A workout log CSV file with a load cache in front of it
#[derive(Debug)]
pub struct LogStore {
    path: PathBuf,
    config: StoreConfig,
    cache: LogCache,
}

impl LogStore {
    /// Create a store with default configuration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, StoreConfig::default())
    }

    /// Create a store with custom configuration
    pub fn with_config(path: impl Into<PathBuf>, config: StoreConfig) -> Self {
        let cache = LogCache::new(config.cache.clone());
        Self {
            path: path.into(),
            config,
            cache,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records in the log, served from the cache while it is fresh.
    ///
    /// A log file that still does not exist after the configured retries
    /// reads as an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn records(&self) -> Result<Arc<Vec<LogRecord>>, StoreError> {
        self.cache.get_or_load(|| self.load())
    }

    /// Load the log and filter it
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be loaded.
    pub fn filter(&self, params: &FilterParams) -> Result<FilterResult, StoreError> {
        let records = self.records()?;
        Ok(DataFilter::filter_data(&records, params))
    }

    /// Drop cached records so the next read goes to disk
    pub fn invalidate(&self) {
        self.cache.invalidate();
    }

    fn load(&self) -> Result<Vec<LogRecord>, StoreError> {
        let mut attempt = 0;
        while !self.path.exists() {
            if attempt >= self.config.max_retries {
                warn!(path = %self.path.display(), "workout log not found, treating as empty");
                return Ok(Vec::new());
            }
            attempt += 1;
            debug!(path = %self.path.display(), attempt, "workout log missing, retrying");
            std::thread::sleep(self.config.retry_delay);
        }

        let source = self.path.to_string_lossy().into_owned();
        let records: Vec<LogRecord> = parse_csv_file(&self.path)?
            .into_iter()
            .map(|r| r.with_file_path(source.clone()))
            .collect();

        debug!(path = %source, records = records.len(), "loaded workout log");
        Ok(records)
    }

    /// Append one record to the log.
    ///
    /// The file is created with a header if missing. The new content is
    /// written to a temporary file next to the log and renamed over it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for an invalid entry, or an IO or
    /// persist error if the log cannot be rewritten.
    pub fn append(&self, record: &LogRecord) -> Result<(), StoreError> {
        validate_entry(record)?;

        let mut content = match std::fs::read_to_string(&self.path) {
            Ok(existing) => existing,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            content = CSV_HEADER.to_string();
        }
        if !content.ends_with('\n') {
            content.push('\n');
        }
        content.push_str(&record_to_csv_line(record));
        content.push('\n');

        self.write_atomic(&content)?;
        self.cache.invalidate();

        info!(path = %self.path.display(), exercise = %record.exercise, "appended log entry");
        Ok(())
    }

    fn write_atomic(&self, content: &str) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> StoreConfig {
        StoreConfig {
            retry_delay: Duration::from_millis(1),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::with_config(dir.path().join("missing.csv"), fast_config());
        assert!(store.records().unwrap().is_empty());
    }

    #[test]
    fn test_file_created_during_retries_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let config = StoreConfig {
            max_retries: 200,
            retry_delay: Duration::from_millis(10),
            ..StoreConfig::default()
        };
        let store = LogStore::with_config(&path, config);

        let writer = {
            let path = path.clone();
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(50));
                let tmp = path.with_extension("tmp");
                std::fs::write(&tmp, format!("{CSV_HEADER}\n2024-01-15,Squat,5,100,500,,,,1\n"))
                    .unwrap();
                std::fs::rename(&tmp, &path).unwrap();
            })
        };

        let records = store.records().unwrap();
        writer.join().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].exercise, "Squat");
    }

    #[test]
    fn test_unreadable_log_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::with_config(dir.path(), fast_config());

        let err = store.records().unwrap_err();
        assert!(matches!(err, StoreError::Parse(ParseError::Io(_))));
    }

    #[test]
    fn test_append_keeps_protocol() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::with_config(dir.path().join("log.csv"), fast_config());

        let record = LogRecord::new("2024-01-15", "Curl", 10, 12.0)
            .with_protocol("drop_set")
            .with_timestamp(1);
        store.append(&record).unwrap();

        let records = store.records().unwrap();
        assert_eq!(records[0].protocol.as_deref(), Some("drop_set"));
    }

    #[test]
    fn test_append_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Log").join("workout_logs.csv");
        let store = LogStore::with_config(&path, fast_config());

        let record = LogRecord::new("2024-01-15", "Squat", 5, 100.0).with_timestamp(1);
        store.append(&record).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(CSV_HEADER));
        assert!(content.ends_with("Squat,5,100,500,,,,1,\n"));
    }

    #[test]
    fn test_append_invalidates_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::with_config(dir.path().join("log.csv"), fast_config());

        store
            .append(&LogRecord::new("2024-01-15", "Squat", 5, 100.0).with_timestamp(1))
            .unwrap();
        assert_eq!(store.records().unwrap().len(), 1);

        store
            .append(&LogRecord::new("2024-01-16", "Bench Press", 8, 80.0).with_timestamp(2))
            .unwrap();
        let records = store.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].exercise, "Bench Press");
    }

    #[test]
    fn test_loaded_records_know_their_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workout_logs.csv");
        std::fs::write(&path, format!("{CSV_HEADER}\n2024-01-15,Squat,5,100,500,,,,1\n")).unwrap();

        let store = LogStore::new(&path);
        let records = store.records().unwrap();
        assert_eq!(records[0].resolved_basename(), Some("workout_logs"));
    }

    #[test]
    fn test_append_rejects_invalid_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let store = LogStore::with_config(&path, fast_config());

        let err = store
            .append(&LogRecord::new("2024-01-15", "", 5, 100.0))
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::EmptyExercise)));
        assert!(!path.exists());
    }

    #[test]
    fn test_filter_through_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        std::fs::write(
            &path,
            format!(
                "{CSV_HEADER}\n\
                 2024-01-15,Bench Press,8,80,640,[[Push Day]],,,1\n\
                 2024-01-15,Squat,5,120,600,[[Leg Day]],,,2\n"
            ),
        )
        .unwrap();

        let store = LogStore::new(&path);
        let result = store.filter(&FilterParams::exercise("Bench")).unwrap();
        assert_eq!(result.filtered_data.len(), 1);
        assert_eq!(result.filtered_data[0].exercise, "Bench Press");
    }
}
