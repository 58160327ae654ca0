//! Streaming reader for whitespace-delimited tables

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CompareError, Result};
use crate::model::Row;

/// Reads a table one row at a time.
///
/// The first line is treated as a header and discarded unread; data rows
/// are numbered from 2.
pub struct TableReader<R> {
    reader: R,
    buffer: String,
    line: usize,
}

impl TableReader<BufReader<File>> {
    /// Open a file and consume its header line
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| CompareError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened table");
        Self::new(BufReader::new(file), &path.display().to_string())
    }
}

impl<R: BufRead> TableReader<R> {
    /// Wrap a reader and consume its header line.
    ///
    /// `source_name` only appears in the error raised for an empty stream.
    pub fn new(reader: R, source_name: &str) -> Result<Self> {
        let mut table = Self {
            reader,
            buffer: String::new(),
            line: 0,
        };

        if !table.read_line()? {
            return Err(CompareError::MissingHeader {
                source_name: source_name.to_string(),
            });
        }

        Ok(table)
    }

    /// Line number of the last line read (0 before the header)
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next data row, or `None` at end of stream
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        if !self.read_line()? {
            return Ok(None);
        }
        Ok(Some(Row::parse(self.line, &self.buffer)))
    }

    fn read_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let bytes = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|source| CompareError::Read {
                line: self.line + 1,
                source,
            })?;
        if bytes == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }
}

impl<R: BufRead> Iterator for TableReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_skips_header() {
        let data = "contig position\nchr1 100\nchr1 101\n";
        let reader = TableReader::new(Cursor::new(data), "test").unwrap();
        let rows: Vec<Row> = reader.collect::<Result<_>>().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].tokens, vec!["chr1", "100"]);
        assert_eq!(rows[1].line, 3);
    }

    #[test]
    fn test_header_only() {
        let mut reader = TableReader::new(Cursor::new("a b c"), "test").unwrap();
        assert!(reader.next_row().unwrap().is_none());
        assert_eq!(reader.line(), 1);
    }

    #[test]
    fn test_empty_stream_is_missing_header() {
        let result = TableReader::new(Cursor::new(""), "empty.tsv");
        assert!(matches!(
            result,
            Err(CompareError::MissingHeader { source_name }) if source_name == "empty.tsv"
        ));
    }

    #[test]
    fn test_last_line_without_newline() {
        let data = "h\nx 1\ny 2";
        let reader = TableReader::new(Cursor::new(data), "test").unwrap();
        let rows: Vec<Row> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(rows.last().unwrap().tokens, vec!["y", "2"]);
    }

    #[test]
    fn test_open_missing_file() {
        let result = TableReader::open(Path::new("/nonexistent/table.tsv"));
        assert!(matches!(result, Err(CompareError::Open { .. })));
    }
}
