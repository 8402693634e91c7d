//! Command-line interface for bagprep.
//!
//! Each workflow stage is a separate subcommand module with its own argument
//! struct and execution logic, so stages can be run (and re-run after manual
//! correction) independently:
//!
//! - `export` - scan a source directory with ExifTool and write the
//!   intermediate record file
//! - `transform` - map an intermediate record file into `metadata.csv` and
//!   `rights.csv`
//! - `finalize` - apply the folder-hierarchy pass to a reviewed descriptive
//!   table
//! - `run` - export + transform in one invocation, optionally configured
//!   from a `bagprep.toml`
//!
//! # Basic Workflow
//!
//! ```bash
//! # 1. Export metadata from the digitized objects
//! bagprep export /media/accession-0421/objects -o metadataExp.csv
//!
//! # 2. Review/correct metadataExp.csv by hand, then transform it
//! bagprep transform metadataExp.csv -o . -t d -a 1234-001
//!
//! # 3. After arranging folders and renaming dc.format2 -> dc.format,
//! #    run the finalize pass on the reviewed table
//! bagprep finalize metadata-reviewed.csv -o metadata.csv
//! ```

mod export;
mod finalize;
mod run;
mod transform;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Main CLI structure for bagprep.
///
/// Global options follow standard Unix conventions and are available to all
/// subcommands; `--verbose` and `--quiet` are mutually exclusive.
#[derive(Parser)]
#[command(
    name = "bagprep",
    about = "Prepare Archivematica transfer metadata from born-digital media",
    version,
    long_about = "bagprep shapes ExifTool output into the descriptive (metadata.csv) and \
                  rights (rights.csv) tables an Archivematica transfer expects, leaving \
                  room for the manual review steps the workflow is built around."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (subprocess invocations, row counts, timings).
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors, for scripted runs.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

/// Available subcommands, one per workflow stage.
#[derive(Subcommand)]
enum Commands {
    /// Export per-file metadata from a source directory with ExifTool.
    Export(export::ExportCommand),

    /// Transform an intermediate export into metadata.csv and rights.csv.
    Transform(transform::TransformCommand),

    /// Apply the folder-hierarchy pass to a reviewed descriptive table.
    Finalize(finalize::FinalizeCommand),

    /// Export and transform in one invocation.
    Run(run::RunCommand),
}

impl Cli {
    /// Execute the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        init_tracing(self.verbose, self.quiet);

        match self.command {
            Commands::Export(cmd) => cmd.execute().await,
            Commands::Transform(cmd) => cmd.execute().await,
            Commands::Finalize(cmd) => cmd.execute().await,
            Commands::Run(cmd) => cmd.execute().await,
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the verbosity flags pick the level.
/// Log output goes to stderr so it never mixes with anything a script might
/// capture from stdout.
fn init_tracing(verbose: bool, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
