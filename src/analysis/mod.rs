//! Summary statistics over workout log records.
//!
//! - [`aggregate`]: Volume and weight totals grouped by exercise, day or workout
//! - [`trend`]: Least-squares trend of a series and its direction

pub mod aggregate;
pub mod trend;

pub use trend::{TrendDirection, TrendLine};
