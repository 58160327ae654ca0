//! eventalign-diff - Tolerance-aware diff for eventalign tables
//!
//! Compares a reference table against a generated one row by row. Each
//! column position is checked either as an exact string or numerically
//! within a tolerance, and the first violation ends the run.

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use diff::{compare_files, compare_readers, Mismatch, Outcome};
pub use error::CompareError;
pub use model::{ColumnSpec, Schema};
