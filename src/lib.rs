//! bagprep - Archivematica transfer metadata preparation
//!
//! Shapes raw ExifTool output from digitized media into the two CSV tables an
//! Archivematica transfer expects: a descriptive `metadata.csv` and a
//! `rights.csv` carrying one fixed rights statement per object. The workflow
//! is deliberately staged around manual review: every stage reads and writes
//! plain CSV files an archivist can open, correct, and feed back in.
//!
//! # Architecture Overview
//!
//! The pipeline has three stages, each runnable on its own:
//!
//! 1. **Export** ([`export`]) - run ExifTool recursively over a source
//!    directory and capture a fixed set of tags per file into an intermediate
//!    record file (`metadataExp.csv`). A scan that dies partway still writes
//!    the rows it produced and reports the run as incomplete.
//! 2. **Transform** ([`transform`]) - map the intermediate records into
//!    Dublin Core descriptive rows plus per-file rights rows, preserving
//!    input order and refusing to write anything when a required column is
//!    missing.
//! 3. **Finalize** ([`transform::hierarchy`]) - after the archivist arranges
//!    objects into folders and adds group rows, fill in folder titles,
//!    inferred date ranges, and extents to produce the final table.
//!
//! # Core Modules
//!
//! - [`cli`] - command-line interface, one subcommand per stage
//! - [`config`] - workflow configuration (`bagprep.toml` plus CLI flags)
//! - [`core`] - error types and user-facing error presentation
//! - [`exiftool`] - ExifTool discovery and subprocess invocation
//! - [`export`] - the export stage over any [`exiftool::MetadataExtractor`]
//! - [`transform`] - the descriptive/rights mapping and the finalize pass
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Export metadata from the digitized objects
//! bagprep export /media/accession-0421/objects -o metadataExp.csv
//!
//! # Review metadataExp.csv, then transform it
//! bagprep transform metadataExp.csv -o . -t d -a 1234-001
//!
//! # Or run both stages from a bagprep.toml
//! bagprep run --config bagprep.toml
//!
//! # After arranging folders, finalize the reviewed table
//! bagprep finalize metadata-reviewed.csv -o metadata.csv
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod exiftool;
pub mod export;
pub mod transform;
