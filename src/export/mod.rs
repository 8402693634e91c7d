//! The export stage.
//!
//! Produces the intermediate record file for a source directory: one CSV row
//! per discovered file, with the fixed attribute set in [`EXPORT_FIELDS`].
//! This file is the sole hand-off artifact between the export and transform
//! stages and is expected to be reviewed (and possibly hand-corrected) by the
//! operator before the transform runs.

use std::path::{Path, PathBuf};

use crate::core::{BagError, Result};
use crate::exiftool::MetadataExtractor;

/// The fixed attribute set requested from the extraction tool, in the order
/// they appear in the intermediate record header.
pub const EXPORT_FIELDS: [&str; 9] = [
    "SourceFile",
    "Title",
    "FileName",
    "FileCreateDate",
    "FileModifyDate",
    "FileTypeExtension",
    "MIMEType",
    "PageCount",
    "LayerCount",
];

/// Result of an export run.
#[derive(Debug)]
pub struct ExportOutcome {
    /// Where the intermediate record file was written.
    pub destination: PathBuf,
    /// Number of data rows written.
    pub rows_written: usize,
    /// Whether the extraction tool finished cleanly. When `false`, the rows
    /// that were produced are on disk anyway and the operator is expected to
    /// inspect and hand-correct the file before transforming it.
    pub complete: bool,
    /// Extraction tool error output, for the incomplete-run report.
    pub diagnostics: String,
}

/// Writes the intermediate record file for a source directory.
///
/// Generic over the extraction capability so tests can substitute an
/// in-memory extractor for the real ExifTool subprocess.
pub struct Exporter<E> {
    extractor: E,
}

impl<E: MetadataExtractor> Exporter<E> {
    /// Create an exporter over the given extraction capability.
    pub const fn new(extractor: E) -> Self {
        Self { extractor }
    }

    /// Scan `source_dir` and write the intermediate record file to
    /// `destination`, overwriting any previous export at that path.
    ///
    /// Source files are never modified. Rows are written in the order the
    /// extraction tool reported them, and every column of [`EXPORT_FIELDS`]
    /// appears in the header even when the tool had no value for it anywhere
    /// in the scan (the tool omits such columns from its own output).
    ///
    /// # Errors
    ///
    /// - [`BagError::InvalidPath`] when `source_dir` is not a readable
    ///   directory or `destination`'s parent directory does not exist
    /// - [`BagError::ExternalToolFailure`] when the tool fails without
    ///   producing any rows; a tool failure *after* producing rows is not an
    ///   error (the partial file is written and
    ///   [`ExportOutcome::complete`] is `false`)
    pub async fn export(&self, source_dir: &Path, destination: &Path) -> Result<ExportOutcome> {
        validate_source_dir(source_dir)?;
        validate_destination(destination)?;

        let extraction = self.extractor.extract(source_dir, &EXPORT_FIELDS).await?;

        let mut writer = csv::Writer::from_path(destination)?;
        writer.write_record(EXPORT_FIELDS)?;
        for row in &extraction.rows {
            let record: Vec<&str> =
                EXPORT_FIELDS.iter().map(|field| row.get(*field).map_or("", String::as_str)).collect();
            writer.write_record(&record)?;
        }
        writer.flush().map_err(BagError::IoError)?;

        tracing::info!(
            target: "export",
            "Wrote {} row(s) to {} (complete: {})",
            extraction.rows.len(),
            destination.display(),
            extraction.complete
        );

        Ok(ExportOutcome {
            destination: destination.to_path_buf(),
            rows_written: extraction.rows.len(),
            complete: extraction.complete,
            diagnostics: extraction.diagnostics,
        })
    }
}

fn validate_source_dir(source_dir: &Path) -> Result<()> {
    if !source_dir.exists() {
        return Err(BagError::InvalidPath {
            path: source_dir.display().to_string(),
            reason: "source directory does not exist".to_string(),
        });
    }
    if !source_dir.is_dir() {
        return Err(BagError::InvalidPath {
            path: source_dir.display().to_string(),
            reason: "source path is not a directory".to_string(),
        });
    }
    // Readability check up front so the failure surfaces before a long scan.
    if let Err(e) = std::fs::read_dir(source_dir) {
        return Err(BagError::InvalidPath {
            path: source_dir.display().to_string(),
            reason: format!("source directory is not readable: {e}"),
        });
    }
    Ok(())
}

fn validate_destination(destination: &Path) -> Result<()> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            return Err(BagError::InvalidPath {
                path: destination.display().to_string(),
                reason: "destination directory does not exist".to_string(),
            });
        }
    }
    Ok(())
}
