//! Integration tests for the combined `run` command.
//!
//! Only the `--skip-export` path is exercised end-to-end; the export stage
//! needs a real ExifTool installation, which CI machines may not have.

use crate::common::{TestTransfer, document_row, photograph_row};
use predicates::prelude::*;

#[test]
fn run_with_config_file_and_skip_export() {
    let transfer = TestTransfer::new().unwrap();
    transfer.write_export(&[photograph_row(), document_row()]).unwrap();
    let config = transfer
        .write_file(
            "bagprep.toml",
            &format!(
                "source_dir = \"unused\"\n\
                 output_dir = \"{}\"\n\
                 transfer_type = \"deed-of-gift\"\n\
                 accession_number = \"1234-001\"\n",
                transfer.path().display()
            ),
        )
        .unwrap();

    transfer
        .bagprep()
        .arg("run")
        .arg("--config")
        .arg(&config)
        .arg("--skip-export")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 row(s)"))
        .stdout(predicate::str::contains("dc.format2"));

    assert!(transfer.has_file("metadata.csv"));
    assert!(transfer.has_file("rights.csv"));
}

#[test]
fn run_with_flags_only_and_skip_export() {
    let transfer = TestTransfer::new().unwrap();
    transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("run")
        .arg("--output-dir")
        .arg(transfer.path())
        .args(["-t", "u", "-a", "1234-001", "--skip-export"])
        .assert()
        .success();

    let rights = transfer.read_file("rights.csv").unwrap();
    assert!(rights.contains("University Records Transfer"));
}

#[test]
fn run_requires_core_flags_without_config() {
    let transfer = TestTransfer::new().unwrap();

    transfer
        .bagprep()
        .arg("run")
        .arg("--output-dir")
        .arg(transfer.path())
        .arg("--skip-export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--transfer-type"));
}

#[test]
fn run_validates_accession_against_mask() {
    let transfer = TestTransfer::new().unwrap();
    transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("run")
        .arg("--output-dir")
        .arg(transfer.path())
        .args(["-t", "d", "-a", "bad", "--skip-export"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match mask"));

    assert!(!transfer.has_file("metadata.csv"));
}

#[test]
fn run_missing_config_file_reports_path() {
    let transfer = TestTransfer::new().unwrap();

    transfer
        .bagprep()
        .arg("run")
        .args(["--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.toml"));
}
