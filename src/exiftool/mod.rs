//! ExifTool integration.
//!
//! The extraction tool is modeled as an injected capability: the
//! [`MetadataExtractor`] trait exposes `extract(directory, fields) -> rows`,
//! and the export stage is generic over it so the rest of the workflow can be
//! tested without invoking a real subprocess. [`ExifTool`] is the production
//! implementation, wrapping the system `exiftool` binary through
//! [`ExifToolCommand`].

pub mod command_builder;

pub use command_builder::{ExifToolCommand, ExifToolOutput};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::core::{BagError, Result};

/// One extracted record: requested tag name to value, one map per file.
pub type TagRow = HashMap<String, String>;

/// The result of scanning a directory for metadata.
#[derive(Debug, Default)]
pub struct Extraction {
    /// One row per discovered file, in the order the tool reported them.
    pub rows: Vec<TagRow>,
    /// Whether the tool finished cleanly. A `false` here with non-empty
    /// `rows` is the documented partial-output case: the rows are kept and
    /// the run is reported as incomplete for manual review.
    pub complete: bool,
    /// Tool error output, kept for the incomplete-run report.
    pub diagnostics: String,
}

/// Capability to extract per-file metadata attributes from a directory tree.
///
/// Implemented by [`ExifTool`] in production and by in-memory fakes in tests.
#[allow(async_fn_in_trait)]
pub trait MetadataExtractor {
    /// Recursively scan `source_dir`, requesting exactly `fields` per file.
    ///
    /// Returns one row per discovered file in scan order. Fields the tool
    /// has no value for may be absent from a row; the caller fills blanks.
    async fn extract(&self, source_dir: &Path, fields: &[&str]) -> Result<Extraction>;
}

/// The system ExifTool binary.
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    /// Locate `exiftool` on PATH.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::ExifToolNotFound`] when the binary is not
    /// installed or not discoverable.
    pub fn locate() -> Result<Self> {
        let program = which::which("exiftool").map_err(|_| BagError::ExifToolNotFound)?;
        tracing::debug!(target: "exiftool", "Found exiftool at {}", program.display());
        Ok(Self { program })
    }

    /// Use an explicit executable path (tests, unusual installs).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Report the installed ExifTool version (`exiftool -ver`).
    pub async fn version(&self) -> Result<String> {
        ExifToolCommand::new(&self.program)
            .arg("-ver")
            .execute_stdout()
            .await
            .map_err(|e| match e.downcast::<BagError>() {
                Ok(bag) => bag,
                Err(other) => BagError::Other {
                    message: format!("{other:#}"),
                },
            })
    }

    /// Parse ExifTool's `-csv` stdout into tag rows.
    fn parse_csv_rows(stdout: &str) -> Result<Vec<TagRow>> {
        if stdout.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(stdout.as_bytes());

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let row: TagRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(rows)
    }
}

impl MetadataExtractor for ExifTool {
    async fn extract(&self, source_dir: &Path, fields: &[&str]) -> Result<Extraction> {
        // -csv always emits SourceFile as the first column; requesting it
        // again is harmless, so the field list is passed through verbatim.
        let mut command = ExifToolCommand::new(&self.program).args(["-csv", "-r"]);
        for field in fields {
            command = command.arg(format!("-{field}"));
        }

        // Scan from inside the source directory so SourceFile comes out
        // relative to it, independent of how the caller spelled the path.
        command = command
            .current_dir(source_dir)
            .with_context(source_dir.display().to_string())
            .arg(".");

        let output = command.execute().await.map_err(|e| match e.downcast::<BagError>() {
            Ok(bag) => bag,
            Err(other) => BagError::Other {
                message: format!("{other:#}"),
            },
        })?;

        let mut rows = Self::parse_csv_rows(&output.stdout)?;

        // ExifTool reports paths under "." with a leading "./"
        for row in &mut rows {
            if let Some(path) = row.get_mut("SourceFile") {
                if let Some(stripped) = path.strip_prefix("./") {
                    *path = stripped.to_string();
                }
            }
        }

        if rows.is_empty() && !output.success {
            // Nothing usable came back; this is a hard failure, not a
            // partial run.
            return Err(BagError::ExternalToolFailure {
                operation: "metadata extraction".to_string(),
                stderr: output.stderr,
            });
        }

        if !output.success {
            tracing::warn!(
                target: "exiftool",
                "Scan exited abnormally after {} row(s); keeping partial output",
                rows.len()
            );
        }

        Ok(Extraction {
            rows,
            complete: output.success,
            diagnostics: output.stderr,
        })
    }
}
