//! CSV import of student marks.
//!
//! Rows are `name,mark` with no header. Rows that are too short or carry a
//! mark outside 0–100 are skipped and reported, the rest of the file is
//! still read.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::num::IntErrorKind;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::Result;

/// Why a CSV row was left out of the dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum SkippedRow {
    Incomplete(Vec<String>),
    NonNumeric { name: String },
    OutOfRange { name: String, mark: String },
}

impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkippedRow::Incomplete(fields) => {
                write!(f, "Warning: Skipping incomplete row: {fields:?}")
            }
            SkippedRow::NonNumeric { name } => {
                write!(f, "Warning: Skipping row for {name} due to non-numeric mark.")
            }
            SkippedRow::OutOfRange { name, mark } => {
                write!(f, "Warning: Skipping {name} due to invalid mark ({mark}).")
            }
        }
    }
}

/// Result of reading a marks file.
#[derive(Debug, Default)]
pub struct CsvImport {
    pub marks: Dataset<u8>,
    pub skipped: Vec<SkippedRow>,
    /// Set when reading stopped early; `marks` holds the rows accepted before it.
    pub read_error: Option<csv::Error>,
}

/// Why a mark was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkError {
    NotWhole,
    OutOfRange,
}

/// Parses a whole-number mark in 0–100.
///
/// Integers too large for `i64` still count as out of range.
pub fn parse_mark(text: &str) -> std::result::Result<u8, MarkError> {
    match text.parse::<i64>() {
        Ok(mark) => u8::try_from(mark)
            .ok()
            .filter(|m| *m <= 100)
            .ok_or(MarkError::OutOfRange),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(MarkError::OutOfRange)
        }
        Err(_) => Err(MarkError::NotWhole),
    }
}

/// Checks one row and returns the `(name, mark)` it contributes.
pub fn parse_row(fields: &[&str]) -> std::result::Result<(String, u8), SkippedRow> {
    let [name, mark, ..] = fields else {
        return Err(SkippedRow::Incomplete(
            fields.iter().map(|f| f.to_string()).collect(),
        ));
    };
    let name = name.to_string();

    match parse_mark(mark) {
        Ok(m) => Ok((name, m)),
        Err(MarkError::NotWhole) => Err(SkippedRow::NonNumeric { name }),
        Err(MarkError::OutOfRange) => Err(SkippedRow::OutOfRange {
            name,
            mark: mark.to_string(),
        }),
    }
}

/// Reads `name,mark` rows from any reader.
pub fn read_marks<R: Read>(reader: R) -> CsvImport {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut import = CsvImport::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "CSV read stopped early");
                import.read_error = Some(e);
                break;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        match parse_row(&fields) {
            Ok((name, mark)) => {
                debug!(name = %name, mark, "Accepted row");
                if let Some(previous) = import.marks.insert(name.clone(), mark) {
                    debug!(name = %name, previous, mark, "Duplicate name overwrote earlier mark");
                }
            }
            Err(skipped) => {
                warn!(reason = %skipped, "Skipped row");
                import.skipped.push(skipped);
            }
        }
    }

    import
}

/// Opens `path` and reads its marks.
///
/// # Errors
///
/// Returns an error if the file cannot be opened. Problems inside the file
/// are reported through [`CsvImport`] instead.
pub fn load_csv(path: &Path) -> Result<CsvImport> {
    let file = File::open(path)?;
    let import = read_marks(file);

    info!(
        path = %path.display(),
        accepted = import.marks.len(),
        skipped = import.skipped.len(),
        "CSV import finished"
    );
    Ok(import)
}
