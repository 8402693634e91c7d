//! Export and transform in one invocation.
//!
//! The original workflow asked its questions interactively; here the same
//! answers arrive upfront, either as flags or from a `bagprep.toml` file
//! (flags win over file values). The `--skip-export` degenerate mode reuses
//! an intermediate export from a prior run unchanged.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{TransferType, WorkflowConfig};
use crate::core::BagError;
use crate::exiftool::ExifTool;
use crate::export::Exporter;
use crate::transform::Transformer;

/// Command to run the full export + transform workflow.
#[derive(Args)]
pub struct RunCommand {
    /// Load workflow configuration from a bagprep.toml file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory of digitized objects to scan.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory receiving the intermediate export and the output tables.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Legal basis for the accession ('d' and 'u' are accepted shorthand).
    #[arg(short = 't', long, value_enum)]
    transfer_type: Option<TransferType>,

    /// Accession identifier.
    #[arg(short, long)]
    accession: Option<String>,

    /// Mask the accession identifier must match.
    #[arg(long)]
    accession_mask: Option<String>,

    /// Reuse the existing intermediate export instead of scanning again.
    #[arg(long)]
    skip_export: bool,
}

impl RunCommand {
    /// Execute the workflow.
    pub async fn execute(self) -> Result<()> {
        let config = self.resolve_config()?;
        config.validate()?;

        let export_path = config.export_path();

        if config.regenerate_export {
            let exiftool = ExifTool::locate()?;
            let exporter = Exporter::new(exiftool);
            let outcome = exporter.export(&config.source_dir, &export_path).await?;

            if !outcome.complete {
                println!(
                    "{} Export incomplete: {} row(s) written to {}",
                    "⚠".yellow().bold(),
                    outcome.rows_written,
                    outcome.destination.display()
                );
                if !outcome.diagnostics.trim().is_empty() {
                    eprintln!("{}", outcome.diagnostics.trim().yellow());
                }
                // Stop before the transform so the operator can inspect the
                // partial export; the corrected file is picked up with
                // --skip-export.
                println!(
                    "Hand-correct the export, then re-run with --skip-export \
                     to transform it."
                );
                return Ok(());
            }

            println!(
                "{} Exported {} row(s) to {}",
                "✓".green().bold(),
                outcome.rows_written,
                outcome.destination.display()
            );
        } else {
            tracing::info!(
                target: "run",
                "Skipping export; consuming existing {}",
                export_path.display()
            );
        }

        let transformer = Transformer::new(config.transfer_type, &config.accession_number);
        let outcome = transformer.transform(&export_path, &config.output_dir)?;

        println!(
            "{} Wrote {} row(s) to {} and {}",
            "✓".green().bold(),
            outcome.rows,
            outcome.descriptive_path.display(),
            outcome.rights_path.display()
        );
        println!(
            "{}",
            "Review metadata.csv and rename the 'dc.format2' column to 'dc.format' \
             before ingest."
                .yellow()
        );

        Ok(())
    }

    /// Merge the configuration file (if any) with flag overrides.
    fn resolve_config(&self) -> Result<WorkflowConfig> {
        let mut config = match &self.config {
            Some(path) => WorkflowConfig::load(path)?,
            None => WorkflowConfig {
                regenerate_export: true,
                // A --skip-export run never scans, so the source directory is
                // optional there
                source_dir: match (&self.source_dir, self.skip_export) {
                    (Some(dir), _) => dir.clone(),
                    (None, true) => PathBuf::new(),
                    (None, false) => return Err(missing_flag("--source-dir").into()),
                },
                output_dir: self
                    .output_dir
                    .clone()
                    .ok_or_else(|| missing_flag("--output-dir"))?,
                transfer_type: self
                    .transfer_type
                    .ok_or_else(|| missing_flag("--transfer-type"))?,
                accession_number: self
                    .accession
                    .clone()
                    .ok_or_else(|| missing_flag("--accession"))?,
                accession_mask: self
                    .accession_mask
                    .clone()
                    .unwrap_or_else(|| crate::config::DEFAULT_ACCESSION_MASK.to_string()),
            },
        };

        // Flags override file values
        if let Some(source_dir) = &self.source_dir {
            config.source_dir = source_dir.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(transfer_type) = self.transfer_type {
            config.transfer_type = transfer_type;
        }
        if let Some(accession) = &self.accession {
            config.accession_number = accession.clone();
        }
        if let Some(mask) = &self.accession_mask {
            config.accession_mask = mask.clone();
        }
        if self.skip_export {
            config.regenerate_export = false;
        }

        // The source directory is only consulted when an export actually runs
        if config.regenerate_export && config.source_dir.as_os_str().is_empty() {
            return Err(missing_flag("--source-dir").into());
        }

        Ok(config)
    }
}

fn missing_flag(flag: &str) -> BagError {
    BagError::ConfigError {
        message: format!("{flag} is required when no --config file is given"),
    }
}
