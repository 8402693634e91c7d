//! Transform an intermediate export into the two Archivematica tables.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{AccessionMask, DEFAULT_ACCESSION_MASK, TransferType};
use crate::transform::Transformer;

/// Command to map an intermediate record file into `metadata.csv` and
/// `rights.csv`.
#[derive(Args)]
pub struct TransformCommand {
    /// Path to the intermediate record file produced by the export stage.
    input: PathBuf,

    /// Directory receiving metadata.csv and rights.csv (overwritten if present).
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Legal basis for the accession ('d' and 'u' are accepted shorthand).
    #[arg(short = 't', long, value_enum)]
    transfer_type: TransferType,

    /// Accession identifier, stamped into dc.identifier and the rights
    /// statement.
    #[arg(short, long)]
    accession: String,

    /// Mask the accession identifier must match ('#' is a digit, everything
    /// else is literal).
    #[arg(long, default_value = DEFAULT_ACCESSION_MASK)]
    accession_mask: String,
}

impl TransformCommand {
    /// Execute the transform stage.
    pub async fn execute(self) -> Result<()> {
        AccessionMask::new(&self.accession_mask).validate(&self.accession)?;

        let transformer = Transformer::new(self.transfer_type, &self.accession);
        let outcome = transformer.transform(&self.input, &self.output_dir)?;

        println!(
            "{} Wrote {} row(s) to {} and {}",
            "✓".green().bold(),
            outcome.rows,
            outcome.descriptive_path.display(),
            outcome.rights_path.display()
        );
        // The duplicate-column workaround is deliberate; renaming is part of
        // the operator's review step, never automated here.
        println!(
            "{}",
            "Review metadata.csv and rename the 'dc.format2' column to 'dc.format' \
             before ingest."
                .yellow()
        );

        Ok(())
    }
}
