//! Apply the folder-hierarchy pass to a reviewed descriptive table.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::transform::hierarchy;

/// Command to finalize a reviewed descriptive table.
///
/// Populates folder group rows (titles, inferred dates, extents,
/// descriptions) and normalizes data rows, writing the final table ready for
/// the bag. The reviewed input file is deleted after a successful write
/// unless `--keep` is passed.
#[derive(Args)]
pub struct FinalizeCommand {
    /// Reviewed descriptive table containing folder group rows.
    input: PathBuf,

    /// Destination for the final table (overwritten if present).
    #[arg(short, long, default_value = "metadata.csv")]
    output: PathBuf,

    /// Keep the reviewed input file instead of deleting it.
    #[arg(long)]
    keep: bool,
}

impl FinalizeCommand {
    /// Execute the finalize pass.
    pub async fn execute(self) -> Result<()> {
        let outcome = hierarchy::finalize(&self.input, &self.output, self.keep)?;

        println!(
            "{} Wrote {} row(s) ({} folder group(s)) to {}",
            "✓".green().bold(),
            outcome.rows,
            outcome.group_rows,
            outcome.output.display()
        );
        if outcome.input_removed {
            println!("Removed reviewed input {}", self.input.display());
        }

        Ok(())
    }
}
