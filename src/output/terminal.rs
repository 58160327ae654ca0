//! Plain one-line diagnostic

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::diff::Outcome;

use super::OutputFormatter;

/// Prints the first mismatch as a single line; prints nothing on a match
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(
        &self,
        outcome: &Outcome,
        _reference_path: &Path,
        _output_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        if let Some(mismatch) = outcome.mismatch() {
            writeln!(writer, "{}", mismatch)?;
        }
        Ok(())
    }
}
