//! The transform stage.
//!
//! Maps one intermediate record file onto the two tables Archivematica
//! ingests: descriptive metadata (`metadata.csv`) and rights metadata
//! (`rights.csv`). Row order and count are preserved end-to-end: the n-th
//! intermediate row produces the n-th row of each output table, and no
//! record is merged or split.
//!
//! The stage fails closed: a missing required column aborts the run with the
//! column named, before either output file is created. Silent best-effort
//! mapping is worse than no mapping when the output is archival metadata.

pub mod descriptive;
pub mod hierarchy;
pub mod rights;

pub use descriptive::{DESCRIPTIVE_FIELDS, DescriptiveRecord};
pub use rights::{RIGHTS_FIELDS, RightsTemplate};

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::config::TransferType;
use crate::core::{BagError, Result};

/// Output file name for descriptive metadata.
pub const METADATA_FILE: &str = "metadata.csv";

/// Output file name for rights metadata.
pub const RIGHTS_FILE: &str = "rights.csv";

/// Intermediate columns the mapping cannot proceed without.
pub const REQUIRED_COLUMNS: [&str; 5] =
    ["SourceFile", "FileName", "FileCreateDate", "FileTypeExtension", "MIMEType"];

/// Intermediate columns defaulted to empty when absent.
///
/// ExifTool omits a column entirely when no file in the scan carried the
/// tag, so a text-only accession legitimately arrives without `LayerCount`.
pub const OPTIONAL_COLUMNS: [&str; 4] = ["Title", "PageCount", "LayerCount", "FileModifyDate"];

/// Result of a transform run.
#[derive(Debug)]
pub struct TransformOutcome {
    /// Where the descriptive metadata table was written.
    pub descriptive_path: PathBuf,
    /// Where the rights metadata table was written.
    pub rights_path: PathBuf,
    /// Number of data rows in each output table.
    pub rows: usize,
}

/// Maps an intermediate record file into descriptive and rights tables.
pub struct Transformer {
    transfer_type: TransferType,
    accession_number: String,
    run_date: NaiveDate,
}

impl Transformer {
    /// Create a transformer for the given run constants, stamped with
    /// today's date.
    pub fn new(transfer_type: TransferType, accession_number: impl Into<String>) -> Self {
        Self {
            transfer_type,
            accession_number: accession_number.into(),
            run_date: chrono::Local::now().date_naive(),
        }
    }

    /// Override the run date. Identical inputs, constants, and run date
    /// produce byte-identical output, so tests pin this.
    #[must_use]
    pub const fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }

    /// Transform `input` into `metadata.csv` and `rights.csv` under
    /// `output_dir`, overwriting previous outputs at those paths.
    ///
    /// The intermediate file is never mutated, and no output file is created
    /// until the input has been fully read and validated.
    ///
    /// # Errors
    ///
    /// - [`BagError::MissingInput`] when `input` is absent or has no data rows
    /// - [`BagError::SchemaMismatch`] when a required column is missing,
    ///   naming the column
    /// - [`BagError::InvalidPath`] when `output_dir` is not a directory
    pub fn transform(&self, input: &Path, output_dir: &Path) -> Result<TransformOutcome> {
        if !output_dir.is_dir() {
            return Err(BagError::InvalidPath {
                path: output_dir.display().to_string(),
                reason: "output directory does not exist".to_string(),
            });
        }

        let table = read_intermediate(input)?;
        let records: Vec<DescriptiveRecord> =
            table.rows.iter().map(|row| self.map_row(&table, row)).collect();
        let template =
            RightsTemplate::new(self.transfer_type, &self.accession_number, self.run_date);

        let descriptive_path = output_dir.join(METADATA_FILE);
        let rights_path = output_dir.join(RIGHTS_FILE);

        let mut metadata = csv::Writer::from_path(&descriptive_path)?;
        metadata.write_record(DESCRIPTIVE_FIELDS)?;
        for record in &records {
            metadata.write_record(record.as_fields())?;
        }
        metadata.flush().map_err(BagError::IoError)?;

        let mut rights = csv::Writer::from_path(&rights_path)?;
        rights.write_record(RIGHTS_FIELDS)?;
        for record in &records {
            rights.write_record(template.row_for(&record.filename))?;
        }
        rights.flush().map_err(BagError::IoError)?;

        tracing::info!(
            target: "transform",
            "Wrote {} row(s) to {} and {}",
            records.len(),
            descriptive_path.display(),
            rights_path.display()
        );

        Ok(TransformOutcome {
            descriptive_path,
            rights_path,
            rows: records.len(),
        })
    }

    fn map_row(&self, table: &IntermediateTable, row: &csv::StringRecord) -> DescriptiveRecord {
        let get = |column: &str| table.value(row, column);
        DescriptiveRecord {
            filename: descriptive::object_path(get("SourceFile")),
            identifier: self.accession_number.clone(),
            title: get("FileName").to_string(),
            date: descriptive::normalize_date(get("FileCreateDate")),
            format: descriptive::format_statement(get("PageCount"), get("FileTypeExtension")),
            format_mime: get("MIMEType").to_string(),
            description: descriptive::layer_statement(get("LayerCount")),
        }
    }
}

/// A fully-read intermediate record file with a validated header.
struct IntermediateTable {
    /// Column name → position in each record.
    index: std::collections::HashMap<String, usize>,
    rows: Vec<csv::StringRecord>,
}

impl IntermediateTable {
    /// Value of `column` in `row`, empty for absent optional columns.
    fn value<'a>(&self, row: &'a csv::StringRecord, column: &str) -> &'a str {
        self.index.get(column).and_then(|&i| row.get(i)).unwrap_or("")
    }
}

/// Read and validate the intermediate record file.
///
/// Reads the entire file before any output is opened so that parse failures
/// and schema mismatches leave the output directory untouched.
fn read_intermediate(input: &Path) -> Result<IntermediateTable> {
    if !input.is_file() {
        return Err(BagError::MissingInput {
            path: input.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;

    let headers = match reader.headers() {
        Ok(headers) if !headers.is_empty() => headers.clone(),
        _ => {
            return Err(BagError::MissingInput {
                path: input.display().to_string(),
            });
        }
    };

    let index: std::collections::HashMap<String, usize> =
        headers.iter().enumerate().map(|(i, name)| (name.to_string(), i)).collect();

    for column in REQUIRED_COLUMNS {
        if !index.contains_key(column) {
            return Err(BagError::SchemaMismatch {
                column: column.to_string(),
                file: input.display().to_string(),
            });
        }
    }

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
    if rows.is_empty() {
        return Err(BagError::MissingInput {
            path: input.display().to_string(),
        });
    }

    Ok(IntermediateTable { index, rows })
}
