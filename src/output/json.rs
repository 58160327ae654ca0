//! JSON output format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::diff::{Mismatch, Outcome};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum JsonStatus {
    Match,
    Mismatch,
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    reference: String,
    output: String,
    status: JsonStatus,
    rows_compared: usize,
    reference_has_more: bool,
    output_has_more: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    mismatch: Option<&'a Mismatch>,
}

impl OutputFormatter for JsonOutput {
    fn render(
        &self,
        outcome: &Outcome,
        reference_path: &Path,
        output_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let stats = outcome.stats();
        let output = JsonOutcome {
            reference: reference_path.display().to_string(),
            output: output_path.display().to_string(),
            status: if outcome.is_match() {
                JsonStatus::Match
            } else {
                JsonStatus::Mismatch
            },
            rows_compared: stats.rows_compared,
            reference_has_more: stats.reference_has_more,
            output_has_more: stats.candidate_has_more,
            mismatch: outcome.mismatch(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::CompareStats;

    fn render(outcome: &Outcome) -> serde_json::Value {
        let mut buffer = Vec::new();
        JsonOutput::compact()
            .render(outcome, Path::new("ref.tsv"), Path::new("out.tsv"), &mut buffer)
            .unwrap();
        serde_json::from_slice(&buffer).unwrap()
    }

    #[test]
    fn test_match() {
        let stats = CompareStats {
            rows_compared: 8,
            reference_has_more: true,
            candidate_has_more: false,
        };
        let value = render(&Outcome::Match(stats));

        assert_eq!(value["status"], "match");
        assert_eq!(value["rows_compared"], 8);
        assert_eq!(value["reference_has_more"], true);
        assert_eq!(value["reference"], "ref.tsv");
        assert!(value.get("mismatch").is_none());
    }

    #[test]
    fn test_numeric_mismatch() {
        let outcome = Outcome::Mismatch {
            mismatch: Mismatch::Numeric {
                line: 2,
                column: "event_level_mean".to_string(),
                tolerance: 0.05,
                reference: "0.500".to_string(),
                candidate: "0.560".to_string(),
            },
            stats: CompareStats {
                rows_compared: 1,
                ..Default::default()
            },
        };
        let value = render(&outcome);

        assert_eq!(value["status"], "mismatch");
        assert_eq!(value["mismatch"]["kind"], "numeric");
        assert_eq!(value["mismatch"]["line"], 2);
        assert_eq!(value["mismatch"]["column"], "event_level_mean");
        assert_eq!(value["mismatch"]["tolerance"], 0.05);
        assert_eq!(value["mismatch"]["reference"], "0.500");
        assert_eq!(value["mismatch"]["candidate"], "0.560");
    }
}
