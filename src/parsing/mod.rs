//! Parsers for workout log files and parameter blocks.
//!
//! This module provides parsers for:
//!
//! - **Workout log CSV**: One logged set per row, written by the `log` command
//! - **Parameter blocks**: `key: value` lines describing a filter query
//!
//! ## Example
//!
//! ```rust
//! use workout_log::parsing::csv_log::parse_csv_text;
//! use workout_log::parsing::code_block::parse_code_block_params;
//!
//! let log = "date,exercise,reps,weight,volume,origin\n2024-01-15,Squat,5,100,500,[[Leg Day]]\n";
//! let records = parse_csv_text(log).unwrap();
//! assert_eq!(records.len(), 1);
//!
//! let params = parse_code_block_params("exercise: Squat\nexactMatch: true\n");
//! assert_eq!(params.len(), 2);
//! ```
//!
//! ## Log columns
//!
//! | Column | Description | Required |
//! |--------|-------------|----------|
//! | date | When the set was performed | Yes |
//! | exercise | Exercise name | Yes |
//! | reps | Repetitions (> 0) | Yes |
//! | weight | Load (>= 0) | Yes |
//! | volume | reps * weight | Yes |
//! | origin | Source note or workout link | Yes (may be empty) |
//! | workout | Workout name | No |
//! | notes | Free text | No |
//! | timestamp | Milliseconds since epoch | No |

pub mod code_block;
pub mod csv_log;
