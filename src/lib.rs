//! # workout-log
//!
//! A library for finding the sets that belong to an exercise or workout in a
//! CSV workout log.
//!
//! Exercise names in a log drift: "Bench", "Bench Press" and "bench press "
//! all mean the same lift, and records are often filed in a note named after
//! the exercise rather than carrying its exact name. `workout-log` scores a
//! free-text query against both the exercise names in the log and the names
//! of the files records came from, picks the best source, and filters the
//! log with it.
//!
//! ## Features
//!
//! - **Tiered matching**: exact, prefix, suffix, word and substring matches
//!   each get a fixed score
//! - **Two candidate sources**: exercise fields and file basenames compete
//!   for the best match
//! - **Exact mode**: only case-insensitive equality is accepted
//! - **Workout filtering**: substring match on the note a set was logged from
//! - **Cached log store**: TTL-bounded cache with one load in flight and
//!   atomic appends
//! - **Statistics**: volume totals, maximum weights and trends
//!
//! ## Example
//!
//! ```rust
//! use workout_log::{DataFilter, FilterParams, LogRecord};
//!
//! let records = vec![
//!     LogRecord::new("2024-01-15", "Bench Press", 8, 80.0).with_origin("[[Push Day]]"),
//!     LogRecord::new("2024-01-15", "Squat", 5, 120.0).with_origin("[[Leg Day]]"),
//! ];
//!
//! let result = DataFilter::filter_data(&records, &FilterParams::exercise("bench"));
//! assert_eq!(result.filtered_data.len(), 1);
//! assert_eq!(result.filter_method_used, "exercise field: \"Bench Press\" (score: 90)");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Log records, filter parameters and match types
//! - [`matching`]: Scoring, candidate finding, strategy selection and filtering
//! - [`parsing`]: CSV log and code-block parameter parsers
//! - [`store`]: Cached, file-backed log store
//! - [`analysis`]: Aggregates and trends over records
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod store;
pub mod utils;

pub use crate::core::{FilterParams, LogRecord, MatchSource, MatchTier};
pub use crate::matching::scoring::match_score;
pub use crate::matching::{DataFilter, FilterResult, FilterStrategy};
pub use crate::store::{LogStore, StoreError};
