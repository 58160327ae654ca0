//! Configuration handling for eventalign-diff

use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;
use crate::model::Schema;

/// Output format for the diagnostic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One-line diagnostic on mismatch, silent on success
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Path to the reference table
    pub reference_file: PathBuf,
    /// Path to the generated table
    pub output_file: PathBuf,
    /// Output format
    pub output_format: OutputFormat,
    /// JSON schema replacing the built-in eventalign layout
    pub schema_file: Option<PathBuf>,
    /// `name=value` tolerance overrides, applied after the schema is loaded
    pub tolerance_overrides: Vec<String>,
    /// Treat a table that ends early as a mismatch
    pub strict_row_count: bool,
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(reference_file: PathBuf, output_file: PathBuf) -> Self {
        Self {
            reference_file,
            output_file,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Load the schema from a JSON file instead of the built-in one
    pub fn with_schema_file(mut self, path: PathBuf) -> Self {
        self.schema_file = Some(path);
        self
    }

    /// Set tolerance overrides
    pub fn with_tolerance_overrides(mut self, overrides: Vec<String>) -> Self {
        self.tolerance_overrides = overrides;
        self
    }

    /// Enable strict row counting
    pub fn with_strict_row_count(mut self, strict: bool) -> Self {
        self.strict_row_count = strict;
        self
    }

    /// Build the schema this run compares with
    pub fn load_schema(&self) -> Result<Schema> {
        let mut schema = match &self.schema_file {
            Some(path) => {
                debug!(path = %path.display(), "loading schema file");
                Schema::from_json_file(path)?
            }
            None => Schema::eventalign(),
        };
        schema.apply_overrides(&self.tolerance_overrides)?;
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("Terminal".parse::<OutputFormat>(), Ok(OutputFormat::Terminal));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_schema_with_overrides() {
        let config = Config::new("a.tsv".into(), "b.tsv".into())
            .with_tolerance_overrides(vec!["model_stdv=0.2".to_string()]);

        let schema = config.load_schema().unwrap();
        assert_eq!(schema.len(), 13);
        assert_eq!(schema.get("model_stdv").unwrap().tolerance, Some(0.2));
        assert_eq!(schema.get("model_mean").unwrap().tolerance, Some(0.05));
    }

    #[test]
    fn test_missing_schema_file() {
        let config = Config::new("a.tsv".into(), "b.tsv".into())
            .with_schema_file("/nonexistent/schema.json".into());
        assert!(matches!(
            config.load_schema(),
            Err(CompareError::Open { .. })
        ));
    }
}
