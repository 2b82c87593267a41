//! Core data types for workout log filtering.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`LogRecord`]: A single logged set (date, exercise, reps, weight, volume, origin)
//! - [`FilterParams`]: The free-text query a caller filters a log with
//! - [`MatchTier`], [`MatchSource`]: Classification of string match scores
//!
//! ## Origins and files
//!
//! Every record remembers where it came from in two ways:
//!
//! | Field | Example | Used by |
//! |-------|---------|---------|
//! | `origin` | `[[Push Day]]` | workout filtering |
//! | `file_path` | `theGYM/Log/workout_logs.csv` | filename matching |
//!
//! The file basename is the last path component without its extension, the
//! same name a note title would show.

pub mod params;
pub mod record;
pub mod types;

pub use params::FilterParams;
pub use record::LogRecord;
pub use types::{MatchSource, MatchTier};
