//! In-memory form of a loaded capture log

use crate::data::signal::Signal;
use crate::error::{AnalysisError, Result};

/// One named column of a capture log
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    /// Kept verbatim when any cell fails to parse as a number
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Column::Numeric(_))
    }
}

/// Named columns sharing one row count, one row per logged sample index
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    names: Vec<String>,
    columns: Vec<Column>,
    rows: usize,
}

impl LogRecord {
    pub(crate) fn new(names: Vec<String>, columns: Vec<Column>, rows: usize) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == rows));
        Self {
            names,
            columns,
            rows,
        }
    }

    /// Column names in header order
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of rows (samples per column)
    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    fn missing(&self, name: &str) -> AnalysisError {
        AnalysisError::MissingColumn {
            name: name.to_string(),
            available: self.names.clone(),
        }
    }

    /// Raw column by name
    pub fn get(&self, name: &str) -> Result<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| &self.columns[idx])
            .ok_or_else(|| self.missing(name))
    }

    /// Numeric column by name
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        match self.get(name)? {
            Column::Numeric(values) => Ok(values),
            Column::Text(_) => Err(AnalysisError::NonNumericColumn(name.to_string())),
        }
    }

    /// Check that every column in `names` is present
    pub fn require(&self, names: &[&str]) -> Result<()> {
        match names.iter().find(|n| !self.contains(n)) {
            Some(name) => Err(self.missing(name)),
            None => Ok(()),
        }
    }

    /// Build a signal from a numeric column
    ///
    /// With `bit_depth` set, the values are treated as raw fixed-point codes.
    pub fn signal(&self, name: &str, sample_rate: f64, bit_depth: Option<u32>) -> Result<Signal> {
        let values = self.column(name)?.to_vec();
        match bit_depth {
            Some(bits) => Signal::from_codes(values, sample_rate, bits),
            None => Signal::new(values, sample_rate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LogRecord {
        LogRecord::new(
            vec!["sample".into(), "in_l_8".into(), "note".into()],
            vec![
                Column::Numeric(vec![0.0, 1.0]),
                Column::Numeric(vec![127.0, -127.0]),
                Column::Text(vec!["a".into(), "b".into()]),
            ],
            2,
        )
    }

    #[test]
    fn test_column_lookup() {
        let rec = record();
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.column("in_l_8").unwrap(), &[127.0, -127.0]);
        assert!(matches!(
            rec.column("note"),
            Err(AnalysisError::NonNumericColumn(_))
        ));
    }

    #[test]
    fn test_missing_column_reports_present_columns() {
        let rec = record();
        match rec.require(&["sample", "out_l_10"]) {
            Err(AnalysisError::MissingColumn { name, available }) => {
                assert_eq!(name, "out_l_10");
                assert_eq!(available, vec!["sample", "in_l_8", "note"]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(rec.require(&["sample", "in_l_8"]).is_ok());
    }

    #[test]
    fn test_signal_from_column() {
        let rec = record();
        let sig = rec.signal("in_l_8", 48820.0, Some(8)).unwrap();
        assert_eq!(sig.bit_depth(), Some(8));
        assert_eq!(sig.normalized().unwrap().samples(), &[1.0, -1.0]);
        assert!(rec.signal("in_l_8", 0.0, None).is_err());
    }
}
