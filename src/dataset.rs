//! Record store: the uploaded tabular dataset held in memory.
//!
//! A `Dataset` is built once per upload from CSV or XLSX bytes, validated
//! against the required column set, and replaced wholesale by the next
//! upload. Rows are never mutated after load.

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Reader, Xlsx};

use crate::error::{Error, Result};

/// Columns every upload must carry, by exact name.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "example_asin_1",
    "example_asin_2",
    "example_asin_3",
    "parent_item_id",
    "marketplace_id",
    "Auditors",
];

/// The column holding the auditor assignment for each row.
pub const AUDITORS_COLUMN: &str = "Auditors";

/// The two upload formats the tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Determine the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "xlsx" => Ok(FileFormat::Xlsx),
            other => Err(Error::Format(format!(
                "unsupported file extension '{}' (expected .csv or .xlsx)",
                other
            ))),
        }
    }
}

/// An immutable in-memory table: one header row plus data rows, all with
/// the same field count.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Load a dataset from a file, picking the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = FileFormat::from_path(path)?;
        let bytes = std::fs::read(path)
            .map_err(|e| Error::Format(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_bytes(&bytes, format)
    }

    /// Build a dataset from raw upload bytes.
    ///
    /// Fails with `Error::Schema` when any required column is absent; the
    /// caller must halt and surface the message rather than proceed to a
    /// filtered view.
    pub fn from_bytes(bytes: &[u8], format: FileFormat) -> Result<Self> {
        match format {
            FileFormat::Csv => Self::from_csv(bytes),
            FileFormat::Xlsx => Self::from_xlsx(bytes),
        }
    }

    fn from_csv(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().from_reader(bytes);
        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Format(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();
        check_schema(&headers)?;

        let mut rows = Vec::new();
        for result in reader.records() {
            // Unequal field counts violate the tabular-shape invariant and
            // surface here as a csv error.
            let record = result.map_err(|e| Error::Format(e.to_string()))?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(Dataset { headers, rows })
    }

    fn from_xlsx(bytes: &[u8]) -> Result<Self> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook = Xlsx::new(cursor).map_err(|e| Error::Format(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| Error::Format("workbook contains no worksheets".to_string()))?
            .map_err(|e| Error::Format(e.to_string()))?;

        let mut row_iter = range.rows();
        let headers: Vec<String> = match row_iter.next() {
            Some(cells) => cells.iter().map(cell_to_string).collect(),
            None => return Err(Error::Format("worksheet is empty".to_string())),
        };
        check_schema(&headers)?;

        let mut rows = Vec::new();
        for cells in row_iter {
            // Trailing blank spreadsheet rows carry no data; skip them.
            if cells.iter().all(|c| matches!(c, Data::Empty)) {
                continue;
            }
            let mut row: Vec<String> = cells.iter().map(cell_to_string).collect();
            // calamine ranges are rectangular up to the widest cell; pad
            // short rows so every row matches the header width.
            row.resize(headers.len(), String::new());
            rows.push(row);
        }

        Ok(Dataset { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(|r| r.as_slice())
    }

    /// A single field by row index and column name.
    pub fn field(&self, idx: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(idx).and_then(|r| r.get(col)).map(|s| s.as_str())
    }

    /// Distinct values of the `Auditors` column, in order of first
    /// appearance.
    pub fn distinct_auditors(&self) -> Vec<String> {
        let Some(col) = self.column_index(AUDITORS_COLUMN) else {
            return Vec::new();
        };
        let mut seen = std::collections::HashSet::new();
        let mut auditors = Vec::new();
        for row in &self.rows {
            if let Some(value) = row.get(col) {
                if seen.insert(value.clone()) {
                    auditors.push(value.clone());
                }
            }
        }
        auditors
    }
}

/// Verify the required column set is a subset of the loaded headers.
fn check_schema(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !headers.iter().any(|h| h == *req))
        .map(|req| req.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Schema { missing })
    }
}

/// Stringify a spreadsheet cell the way the CSV path would see it.
///
/// Whole-number floats render without a fractional part so an Excel
/// marketplace_id of 44.0 parses as the integer 44.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CSV: &str = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,marketplace_id,Auditors
B001,B002,B003,P100,44,Alice
B004,B005,B006,P200,7,Bob
";

    #[test]
    fn loads_valid_csv() {
        let ds = Dataset::from_bytes(VALID_CSV.as_bytes(), FileFormat::Csv).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.headers().len(), 6);
        assert_eq!(ds.field(0, "example_asin_1"), Some("B001"));
        assert_eq!(ds.field(1, "marketplace_id"), Some("7"));
    }

    #[test]
    fn missing_column_is_schema_error() {
        let csv = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,Auditors
B001,B002,B003,P100,Alice
";
        let err = Dataset::from_bytes(csv.as_bytes(), FileFormat::Csv).unwrap_err();
        match err {
            Error::Schema { missing } => assert_eq!(missing, vec!["marketplace_id".to_string()]),
            other => panic!("expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn schema_error_message_names_all_missing_columns() {
        let csv = "a,b,c\n1,2,3\n";
        let err = Dataset::from_bytes(csv.as_bytes(), FileFormat::Csv).unwrap_err();
        let msg = err.to_string();
        for col in REQUIRED_COLUMNS {
            assert!(msg.contains(col), "message {:?} missing {:?}", msg, col);
        }
    }

    #[test]
    fn ragged_row_is_format_error() {
        let csv = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,marketplace_id,Auditors
B001,B002,B003,P100,44
";
        let err = Dataset::from_bytes(csv.as_bytes(), FileFormat::Csv).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn unknown_extension_is_format_error() {
        let err = FileFormat::from_path(Path::new("records.pdf")).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn distinct_auditors_keeps_first_appearance_order() {
        let csv = "\
example_asin_1,example_asin_2,example_asin_3,parent_item_id,marketplace_id,Auditors
a,b,c,p,1,Bob
d,e,f,q,1,Alice
g,h,i,r,1,Bob
";
        let ds = Dataset::from_bytes(csv.as_bytes(), FileFormat::Csv).unwrap();
        assert_eq!(ds.distinct_auditors(), vec!["Bob", "Alice"]);
    }

    #[test]
    fn whole_number_cells_stringify_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(44.0)), "44");
        assert_eq!(cell_to_string(&Data::Float(44.5)), "44.5");
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("B001".to_string())), "B001");
    }
}
