//! Export per-file metadata from a source directory.
//!
//! Runs ExifTool recursively over the source directory and writes the
//! intermediate record file the transform stage consumes. A scan that dies
//! partway through still writes the rows it produced; the command reports
//! the run as incomplete and leaves the partial file for the operator to
//! inspect and hand-correct, which is the documented recovery path.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::DEFAULT_EXPORT_NAME;
use crate::exiftool::ExifTool;
use crate::export::Exporter;

/// Command to export per-file metadata with ExifTool.
#[derive(Args)]
pub struct ExportCommand {
    /// Directory of digitized objects to scan recursively.
    source_dir: PathBuf,

    /// Destination for the intermediate record file (overwritten if present).
    #[arg(short, long, default_value = DEFAULT_EXPORT_NAME)]
    output: PathBuf,
}

impl ExportCommand {
    /// Execute the export stage.
    ///
    /// Blocks on ExifTool with no timeout; long scans over large media are
    /// expected and intentional.
    pub async fn execute(self) -> Result<()> {
        let exiftool = ExifTool::locate()?;
        if let Ok(version) = exiftool.version().await {
            tracing::debug!(target: "export", "Using exiftool {version}");
        }

        let exporter = Exporter::new(exiftool);
        let outcome = exporter.export(&self.source_dir, &self.output).await?;

        if outcome.complete {
            println!(
                "{} Exported {} row(s) to {}",
                "✓".green().bold(),
                outcome.rows_written,
                outcome.destination.display()
            );
        } else {
            println!(
                "{} Export incomplete: {} row(s) written to {}",
                "⚠".yellow().bold(),
                outcome.rows_written,
                outcome.destination.display()
            );
            if !outcome.diagnostics.trim().is_empty() {
                eprintln!("{}", outcome.diagnostics.trim().yellow());
            }
            println!(
                "Inspect and hand-correct the file before running \
                 'bagprep transform', or re-run the export."
            );
        }

        Ok(())
    }
}
