//! Keymap table data model

use super::parser::ParseError;

/// Supported cell delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "tsv" => Delimiter::Tab,
            "psv" => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// A parsed keymap table: two header rows plus data rows, all raw strings.
///
/// Row 0 names the columns, row 1 carries the canonical key name for each
/// positional "key N" column. Cells are kept exactly as they appear in the
/// file; normalization is the interpreter's job.
#[derive(Debug, Clone)]
pub struct KeymapTable {
    rows: Vec<Vec<String>>,
}

impl KeymapTable {
    /// Build a table from raw rows, requiring the two-line header
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, ParseError> {
        if rows.len() < 2 {
            return Err(ParseError {
                message: format!(
                    "keymap table needs two header rows, got {} row(s)",
                    rows.len()
                ),
                line: None,
            });
        }
        Ok(Self { rows })
    }

    /// The column-name header (row 0)
    pub fn header(&self) -> &[String] {
        &self.rows[0]
    }

    /// The canonical key-name header (row 1)
    pub fn key_names(&self) -> &[String] {
        &self.rows[1]
    }

    /// The data rows (everything after the two header rows)
    pub fn data_rows(&self) -> &[Vec<String>] {
        &self.rows[2..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(spec: &[&[&str]]) -> Vec<Vec<String>> {
        spec.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_from_rows_splits_headers() {
        let table = KeymapTable::from_rows(rows(&[
            &["key", "key 0", "key 1"],
            &["", "j", "k"],
            &["x", "press", "press"],
        ]))
        .unwrap();

        assert_eq!(table.header(), ["key", "key 0", "key 1"]);
        assert_eq!(table.key_names(), ["", "j", "k"]);
        assert_eq!(table.data_rows().len(), 1);
    }

    #[test]
    fn test_from_rows_rejects_missing_header() {
        let err = KeymapTable::from_rows(rows(&[&["key", "key 0"]])).unwrap_err();
        assert!(err.to_string().contains("two header rows"));
    }

    #[test]
    fn test_from_rows_allows_empty_body() {
        let table =
            KeymapTable::from_rows(rows(&[&["key", "key 0"], &["", "j"]])).unwrap();
        assert!(table.data_rows().is_empty());
    }

    #[test]
    fn test_delimiter_from_extension() {
        assert_eq!(Delimiter::from_extension("tsv"), Delimiter::Tab);
        assert_eq!(Delimiter::from_extension("TSV"), Delimiter::Tab);
        assert_eq!(Delimiter::from_extension("psv"), Delimiter::Pipe);
        assert_eq!(Delimiter::from_extension("csv"), Delimiter::Comma);
        assert_eq!(Delimiter::from_extension("txt"), Delimiter::Comma);
    }
}
