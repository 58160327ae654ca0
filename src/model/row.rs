//! A single whitespace-tokenized data row

/// One data line of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Original line number in the source file (1-indexed, header is line 1)
    pub line: usize,
    /// Whitespace-delimited tokens, in file order
    pub tokens: Vec<String>,
}

impl Row {
    /// Tokenize a raw line; any run of whitespace separates tokens
    pub fn parse(line: usize, text: &str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_whitespace() {
        let row = Row::parse(2, "chr1\t100  ACGT \t0\r\n");
        assert_eq!(row.line, 2);
        assert_eq!(row.tokens, vec!["chr1", "100", "ACGT", "0"]);
        assert_eq!(row.token(2), Some("ACGT"));
        assert_eq!(row.token(4), None);
    }

    #[test]
    fn test_parse_blank_line() {
        let row = Row::parse(7, "   \n");
        assert!(row.is_empty());
    }
}
