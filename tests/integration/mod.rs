//! Integration test suite for bagprep
//!
//! End-to-end tests that drive the compiled `bagprep` binary over CSV
//! fixtures on disk. The export stage needs a real ExifTool installation, so
//! these tests exercise everything downstream of it: the transform, the
//! finalize pass, the combined `run --skip-export` workflow, and the error
//! paths.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! Tests are organized by functionality area:
//! - **transform**: intermediate export to metadata.csv/rights.csv mapping
//! - **finalize**: folder-hierarchy pass over a reviewed table
//! - **workflow**: combined `run` command with config files and flags
//! - **error_scenarios**: error handling and edge cases

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

// Integration tests
mod error_scenarios;
mod finalize;
mod transform;
mod workflow;
