//! Cell-level comparison logic

use crate::error::{CompareError, Result};
use crate::model::ColumnSpec;

/// Verdict for one pair of cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellVerdict {
    Equal,
    /// Tokens differ as strings
    Different,
    /// Absolute difference exceeded the column tolerance
    OutOfTolerance { difference: f64 },
}

impl CellVerdict {
    pub fn is_equal(&self) -> bool {
        matches!(self, CellVerdict::Equal)
    }
}

/// Applies a column's rule to a pair of raw tokens
pub struct CellComparator;

impl CellComparator {
    /// Compare `reference` and `candidate` under `column`.
    ///
    /// Tolerance columns fail only when `|reference - candidate| > tolerance`,
    /// so a difference equal to the tolerance (or a NaN difference) passes.
    /// A token that does not parse as a float is an error, not a verdict.
    pub fn compare(
        column: &ColumnSpec,
        line: usize,
        reference: &str,
        candidate: &str,
    ) -> Result<CellVerdict> {
        match column.tolerance {
            Some(tolerance) => {
                let a = parse_float(column, line, reference)?;
                let b = parse_float(column, line, candidate)?;
                let difference = (a - b).abs();
                if difference > tolerance {
                    Ok(CellVerdict::OutOfTolerance { difference })
                } else {
                    Ok(CellVerdict::Equal)
                }
            }
            None if reference == candidate => Ok(CellVerdict::Equal),
            None => Ok(CellVerdict::Different),
        }
    }
}

fn parse_float(column: &ColumnSpec, line: usize, token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .map_err(|_| CompareError::InvalidNumber {
            line,
            column: column.name.clone(),
            value: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        let column = ColumnSpec::exact("strand");

        assert_eq!(
            CellComparator::compare(&column, 2, "+", "+").unwrap(),
            CellVerdict::Equal
        );
        assert_eq!(
            CellComparator::compare(&column, 2, "+", "-").unwrap(),
            CellVerdict::Different
        );
        // No numeric coercion on exact columns
        assert_eq!(
            CellComparator::compare(&ColumnSpec::exact("position"), 2, "100", "100.0").unwrap(),
            CellVerdict::Different
        );
    }

    #[test]
    fn test_tolerance_boundary() {
        let column = ColumnSpec::numeric("event_stdv", 0.05);

        assert!(CellComparator::compare(&column, 2, "0.000", "0.050")
            .unwrap()
            .is_equal());
        assert!(CellComparator::compare(&column, 2, "0.050", "0.000")
            .unwrap()
            .is_equal());
        assert!(!CellComparator::compare(&column, 2, "0.000", "0.051")
            .unwrap()
            .is_equal());
    }

    #[test]
    fn test_numeric_formatting_is_ignored() {
        let column = ColumnSpec::numeric("model_mean", 0.05);
        assert!(CellComparator::compare(&column, 2, "1", "1.000")
            .unwrap()
            .is_equal());
        assert!(CellComparator::compare(&column, 2, "1e-1", "0.1")
            .unwrap()
            .is_equal());
    }

    #[test]
    fn test_nan_difference_passes() {
        let column = ColumnSpec::numeric("model_mean", 0.05);
        assert!(CellComparator::compare(&column, 2, "nan", "1.0")
            .unwrap()
            .is_equal());
    }

    #[test]
    fn test_out_of_tolerance_reports_difference() {
        let column = ColumnSpec::numeric("event_level_mean", 0.5);
        match CellComparator::compare(&column, 3, "1.0", "2.0").unwrap() {
            CellVerdict::OutOfTolerance { difference } => assert_eq!(difference, 1.0),
            other => panic!("unexpected verdict: {:?}", other),
        }
    }

    #[test]
    fn test_malformed_number() {
        let column = ColumnSpec::numeric("event_level_mean", 0.05);
        let err = CellComparator::compare(&column, 4, "0.5", "abc").unwrap_err();
        match err {
            CompareError::InvalidNumber {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 4);
                assert_eq!(column, "event_level_mean");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
