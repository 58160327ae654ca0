//! Short-circuit comparison of two tables under a schema

pub mod cell_diff;

use std::fmt;
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{Row, Schema};
use crate::parser::TableReader;

pub use cell_diff::{CellComparator, CellVerdict};

/// Which input a message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Reference,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Reference => write!(f, "reference"),
            Side::Output => write!(f, "output"),
        }
    }
}

/// The first violation found in a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// Tolerance column whose values differ by more than the tolerance
    Numeric {
        line: usize,
        column: String,
        tolerance: f64,
        reference: String,
        candidate: String,
    },
    /// Exact column whose tokens differ
    Exact {
        line: usize,
        column: String,
        reference: String,
        candidate: String,
    },
    /// One input ran out of rows first (strict row count only)
    RowCount { line: usize, ended: Side },
}

impl Mismatch {
    pub fn line(&self) -> usize {
        match self {
            Mismatch::Numeric { line, .. }
            | Mismatch::Exact { line, .. }
            | Mismatch::RowCount { line, .. } => *line,
        }
    }

    pub fn column(&self) -> Option<&str> {
        match self {
            Mismatch::Numeric { column, .. } | Mismatch::Exact { column, .. } => Some(column),
            Mismatch::RowCount { .. } => None,
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::Numeric {
                line,
                column,
                tolerance,
                reference,
                candidate,
            } => write!(
                f,
                "Line  {}  =>  ['{}', {}] , abs( {} - {} ) > {}",
                line, column, tolerance, reference, candidate, tolerance
            ),
            Mismatch::Exact {
                line,
                column,
                reference,
                candidate,
            } => write!(
                f,
                "Line  {}  =>  ['{}'] ,  {}  !=  {}",
                line, column, reference, candidate
            ),
            Mismatch::RowCount { line, ended } => {
                write!(f, "Line  {}  =>  {} ended early", line, ended)
            }
        }
    }
}

/// Counters gathered while comparing
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareStats {
    /// Data row pairs that were compared
    pub rows_compared: usize,
    /// Reference still had rows when the output ended
    pub reference_has_more: bool,
    /// Output still had rows when the reference ended
    pub candidate_has_more: bool,
}

impl CompareStats {
    pub fn row_counts_differ(&self) -> bool {
        self.reference_has_more || self.candidate_has_more
    }
}

/// Result of a comparison run
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Match(CompareStats),
    Mismatch {
        mismatch: Mismatch,
        stats: CompareStats,
    },
}

impl Outcome {
    pub fn is_match(&self) -> bool {
        matches!(self, Outcome::Match(_))
    }

    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Outcome::Match(_) => None,
            Outcome::Mismatch { mismatch, .. } => Some(mismatch),
        }
    }

    pub fn stats(&self) -> &CompareStats {
        match self {
            Outcome::Match(stats) | Outcome::Mismatch { stats, .. } => stats,
        }
    }
}

/// Walks two tables in lockstep and stops at the first violation
pub struct Comparator<'a> {
    schema: &'a Schema,
    strict_row_count: bool,
}

impl<'a> Comparator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            strict_row_count: false,
        }
    }

    /// Report a table that ends before the other as a mismatch
    pub fn with_strict_row_count(mut self, strict: bool) -> Self {
        self.strict_row_count = strict;
        self
    }

    /// Compare two tables row by row.
    ///
    /// Rows are paired by position. When one table runs out the run ends;
    /// unless strict row counting is on, that still counts as a match.
    pub fn compare<A: BufRead, B: BufRead>(
        &self,
        mut reference: TableReader<A>,
        mut candidate: TableReader<B>,
    ) -> Result<Outcome> {
        let mut stats = CompareStats::default();

        loop {
            let ref_row = reference.next_row()?;
            let out_row = match ref_row {
                Some(_) => candidate.next_row()?,
                None => {
                    stats.candidate_has_more = candidate.next_row()?.is_some();
                    None
                }
            };

            let (ref_row, out_row) = match (ref_row, out_row) {
                (Some(r), Some(o)) => (r, o),
                (Some(r), None) => {
                    stats.reference_has_more = true;
                    return Ok(self.finish_short(stats, r.line, Side::Output));
                }
                (None, _) if stats.candidate_has_more => {
                    let line = reference.line() + 1;
                    return Ok(self.finish_short(stats, line, Side::Reference));
                }
                (None, _) => break,
            };

            stats.rows_compared += 1;
            if let Some(mismatch) = self.compare_rows(&ref_row, &out_row)? {
                debug!(line = mismatch.line(), rows = stats.rows_compared, "mismatch found");
                return Ok(Outcome::Mismatch { mismatch, stats });
            }
        }

        debug!(rows = stats.rows_compared, "tables match");
        Ok(Outcome::Match(stats))
    }

    /// Compare one pair of rows; columns past the shorter token list are skipped
    pub fn compare_rows(&self, reference: &Row, candidate: &Row) -> Result<Option<Mismatch>> {
        let line = reference.line;
        let cells = self
            .schema
            .columns()
            .zip(reference.tokens.iter())
            .zip(candidate.tokens.iter());

        for ((column, ref_value), out_value) in cells {
            let verdict = CellComparator::compare(column, line, ref_value, out_value)?;
            if verdict.is_equal() {
                continue;
            }

            let mismatch = match column.tolerance {
                Some(tolerance) => Mismatch::Numeric {
                    line,
                    column: column.name.clone(),
                    tolerance,
                    reference: ref_value.clone(),
                    candidate: out_value.clone(),
                },
                None => Mismatch::Exact {
                    line,
                    column: column.name.clone(),
                    reference: ref_value.clone(),
                    candidate: out_value.clone(),
                },
            };
            return Ok(Some(mismatch));
        }

        Ok(None)
    }

    fn finish_short(&self, stats: CompareStats, line: usize, ended: Side) -> Outcome {
        if self.strict_row_count {
            return Outcome::Mismatch {
                mismatch: Mismatch::RowCount { line, ended },
                stats,
            };
        }

        warn!(
            line,
            rows = stats.rows_compared,
            "{} ended early; remaining rows were not compared",
            ended
        );
        Outcome::Match(stats)
    }
}

/// Compare two in-memory or streamed tables
pub fn compare_readers<A: BufRead, B: BufRead>(
    reference: A,
    candidate: B,
    schema: &Schema,
    strict_row_count: bool,
) -> Result<Outcome> {
    let reference = TableReader::new(reference, "reference")?;
    let candidate = TableReader::new(candidate, "output")?;
    Comparator::new(schema)
        .with_strict_row_count(strict_row_count)
        .compare(reference, candidate)
}

/// Compare two table files on disk
pub fn compare_files(
    reference: &Path,
    candidate: &Path,
    schema: &Schema,
    strict_row_count: bool,
) -> Result<Outcome> {
    let reference = TableReader::open(reference)?;
    let candidate = TableReader::open(candidate)?;
    Comparator::new(schema)
        .with_strict_row_count(strict_row_count)
        .compare(reference, candidate)
}
