//! bagprep CLI entry point
//!
//! This is the main executable for preparing Archivematica transfer metadata.
//! It handles command-line argument parsing, error display, and command
//! execution.
//!
//! The CLI supports one subcommand per workflow stage:
//! - `export` - scan a source directory with ExifTool into an intermediate
//!   record file
//! - `transform` - map an intermediate record file into metadata.csv and
//!   rights.csv
//! - `finalize` - apply the folder-hierarchy pass to a reviewed table
//! - `run` - export + transform in one invocation

use anyhow::Result;
use bagprep::cli;
use bagprep::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Windows consoles need virtual terminal processing for ANSI colors
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(_) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
