//! Exercise matching engine and filtering.
//!
//! This module provides the core matching functionality:
//!
//! - [`scoring`]: Scores how well a candidate string matches a query
//! - [`engine`]: Scores every file basename and exercise field in a log
//! - [`strategy`]: Chooses how to filter from the scored candidates
//! - [`filter`]: Applies a chosen strategy to a log
//! - [`DataFilter`]: Combines exercise and workout filtering
//!
//! ## Matching Algorithm
//!
//! A free-text exercise query is matched two ways:
//!
//! 1. **Filename matching**: against the basename of the file each record came from
//! 2. **Exercise field matching**: against each distinct exercise name in the log
//!
//! The best score from each source decides the strategy. Fuzzy matches need a
//! score of at least [`strategy::PATH_MATCH_THRESHOLD`]; exact mode needs 100.
//!
//! ## Example
//!
//! ```rust
//! use workout_log::{DataFilter, FilterParams, LogRecord};
//!
//! let records = vec![
//!     LogRecord::new("2024-01-15", "Bench Press", 8, 80.0),
//!     LogRecord::new("2024-01-15", "Squat", 5, 120.0),
//! ];
//!
//! let result = DataFilter::filter_data(&records, &FilterParams::exercise("Bench"));
//! assert_eq!(result.filtered_data.len(), 1);
//! println!("{} via {}", result.title_prefix, result.filter_method_used);
//! ```

pub mod data_filter;
pub mod engine;
pub mod filter;
pub mod scoring;
pub mod strategy;

pub use data_filter::{DataFilter, FilterResult};
pub use strategy::FilterStrategy;
