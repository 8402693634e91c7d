//! Integration tests for error handling and edge cases.

use crate::common::{EXPORT_HEADER, TestTransfer, photograph_row};
use predicates::prelude::*;

#[test]
fn transform_before_export_reports_missing_input() {
    let transfer = TestTransfer::new().unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg("metadataExp.csv")
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("metadataExp.csv"))
        .stderr(predicate::str::contains("missing or empty"));

    assert!(!transfer.has_file("metadata.csv"));
    assert!(!transfer.has_file("rights.csv"));
}

#[test]
fn transform_on_empty_export_reports_missing_input() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_file("metadataExp.csv", "").unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing or empty"));
}

#[test]
fn transform_on_header_only_export_reports_missing_input() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_file("metadataExp.csv", &format!("{EXPORT_HEADER}\n")).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing or empty"));
}

#[test]
fn missing_required_column_fails_closed_with_column_named() {
    let transfer = TestTransfer::new().unwrap();
    // Hand-edited export that lost its MIMEType column
    let input = transfer
        .write_file(
            "metadataExp.csv",
            "SourceFile,Title,FileName,FileCreateDate,FileModifyDate,FileTypeExtension,PageCount,LayerCount\n\
             a.tif,,a.tif,2020:01:01,,tif,,\n",
        )
        .unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MIMEType"));

    assert!(!transfer.has_file("metadata.csv"));
    assert!(!transfer.has_file("rights.csv"));
}

#[test]
fn missing_optional_columns_are_tolerated() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer
        .write_file(
            "metadataExp.csv",
            "SourceFile,FileName,FileCreateDate,FileTypeExtension,MIMEType\n\
             a.tif,a.tif,2020:01:01,tif,image/tiff\n",
        )
        .unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .success();

    assert!(transfer.has_file("metadata.csv"));
}

#[test]
fn transform_into_missing_output_dir_is_invalid_path() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-o", "no-such-dir", "-t", "d", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-dir"));
}

#[test]
fn export_rejects_missing_source_dir() {
    let transfer = TestTransfer::new().unwrap();

    // Fails on path validation or on a missing exiftool, depending on the
    // machine; either way nothing is written and the exit code is nonzero.
    transfer
        .bagprep()
        .arg("export")
        .arg("no-such-dir")
        .assert()
        .failure();

    assert!(!transfer.has_file("metadataExp.csv"));
}

#[test]
fn finalize_on_missing_input_reports_missing_input() {
    let transfer = TestTransfer::new().unwrap();

    transfer
        .bagprep()
        .arg("finalize")
        .arg("metadata-reviewed.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("metadata-reviewed.csv"));
}

#[test]
fn unknown_transfer_type_is_a_usage_error() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "x", "-a", "1234-001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
