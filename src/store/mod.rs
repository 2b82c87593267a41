//! Workout log storage.
//!
//! - [`LogStore`]: Reads and appends to the CSV log file
//! - [`LogCache`]: Time- and size-bounded cache of the loaded log
//!
//! A store owns its cache; there is no process-wide state.

pub mod cache;
pub mod log_file;

pub use cache::{CacheConfig, LogCache};
pub use log_file::{LogStore, StoreConfig, StoreError};
