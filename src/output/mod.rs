//! Output formatting for comparison outcomes

mod json;
mod terminal;

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::OutputFormat;
use crate::diff::Outcome;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a comparison outcome to a writer
    fn render(
        &self,
        outcome: &Outcome,
        reference_path: &Path,
        output_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render an outcome to stdout
pub fn render_to_stdout(
    outcome: &Outcome,
    reference_path: &Path,
    output_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = std::io::stdout().lock();
    formatter.render(outcome, reference_path, output_path, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}
