//! Column descriptors and the positional schema

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};

/// Tolerance shared by every float column of the eventalign table
pub const EVENTALIGN_TOLERANCE: f64 = 0.05;

/// Comparison rule for one column position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name, used only in diagnostics
    pub name: String,
    /// Maximum absolute difference; `None` means exact string equality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<f64>,
}

impl ColumnSpec {
    /// Create a column compared as an exact string
    pub fn exact(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tolerance: None,
        }
    }

    /// Create a column compared numerically within `tolerance`
    pub fn numeric(name: impl Into<String>, tolerance: f64) -> Self {
        Self {
            name: name.into(),
            tolerance: Some(tolerance),
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.tolerance.is_some()
    }
}

/// Ordered list of column rules.
///
/// Position `i` of the schema is compared against token `i` of each row;
/// file headers are never consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    columns: IndexMap<String, ColumnSpec>,
}

impl Schema {
    /// Build a schema, rejecting empty lists, duplicate names and bad tolerances
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self> {
        if columns.is_empty() {
            return Err(CompareError::InvalidSchema(
                "schema must declare at least one column".to_string(),
            ));
        }

        let mut map = IndexMap::with_capacity(columns.len());
        for column in columns {
            if let Some(tolerance) = column.tolerance {
                validate_tolerance(&column.name, tolerance)?;
            }
            if map.contains_key(&column.name) {
                return Err(CompareError::InvalidSchema(format!(
                    "duplicate column name '{}'",
                    column.name
                )));
            }
            map.insert(column.name.clone(), column);
        }

        Ok(Self { columns: map })
    }

    /// The built-in layout of an eventalign table
    pub fn eventalign() -> Self {
        let columns = vec![
            ColumnSpec::exact("contig"),
            ColumnSpec::exact("position"),
            ColumnSpec::exact("reference_kmer"),
            ColumnSpec::exact("read_index"),
            ColumnSpec::exact("strand"),
            ColumnSpec::exact("event_index"),
            ColumnSpec::numeric("event_level_mean", EVENTALIGN_TOLERANCE),
            ColumnSpec::numeric("event_stdv", EVENTALIGN_TOLERANCE),
            ColumnSpec::exact("event_length"),
            ColumnSpec::exact("model_kmer"),
            ColumnSpec::numeric("model_mean", EVENTALIGN_TOLERANCE),
            ColumnSpec::numeric("model_stdv", EVENTALIGN_TOLERANCE),
            ColumnSpec::numeric("standardized_level", EVENTALIGN_TOLERANCE),
        ];

        Self {
            columns: columns.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }

    /// Load a schema from a JSON array of `{"name": .., "tolerance": ..}` objects
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CompareError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let columns: Vec<ColumnSpec> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                CompareError::SchemaFile {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
        Self::new(columns)
    }

    /// Replace the tolerance of a named column.
    ///
    /// An exact column given a tolerance becomes a numeric column.
    pub fn set_tolerance(&mut self, name: &str, tolerance: f64) -> Result<()> {
        validate_tolerance(name, tolerance)?;
        let column = self
            .columns
            .get_mut(name)
            .ok_or_else(|| CompareError::UnknownColumn(name.to_string()))?;
        column.tolerance = Some(tolerance);
        Ok(())
    }

    /// Apply `name=value` overrides in order
    pub fn apply_overrides<S: AsRef<str>>(&mut self, overrides: &[S]) -> Result<()> {
        for spec in overrides {
            let (name, tolerance) = parse_override(spec.as_ref())?;
            self.set_tolerance(name, tolerance)?;
        }
        Ok(())
    }

    pub fn columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.values()
    }

    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.get(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::eventalign()
    }
}

fn validate_tolerance(column: &str, tolerance: f64) -> Result<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(CompareError::InvalidTolerance {
            column: column.to_string(),
            value: tolerance.to_string(),
        });
    }
    Ok(())
}

/// Parse `name=value` into a column name and tolerance
fn parse_override(spec: &str) -> Result<(&str, f64)> {
    let (name, value) = spec.split_once('=').ok_or_else(|| CompareError::InvalidTolerance {
        column: spec.to_string(),
        value: "expected NAME=VALUE".to_string(),
    })?;
    let name = name.trim();
    let value = value.trim();
    let tolerance = value
        .parse::<f64>()
        .map_err(|_| CompareError::InvalidTolerance {
            column: name.to_string(),
            value: value.to_string(),
        })?;
    Ok((name, tolerance))
}
