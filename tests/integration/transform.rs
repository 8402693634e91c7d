//! Integration tests for the transform stage.

use crate::common::{TestTransfer, document_row, photograph_row, photoshop_row};
use predicates::prelude::*;

#[test]
fn transform_writes_both_tables() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer
        .write_export(&[photograph_row(), document_row(), photoshop_row()])
        .unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 row(s)"))
        .stdout(predicate::str::contains("dc.format2"));

    let metadata = transfer.read_file("metadata.csv").unwrap();
    assert_eq!(
        metadata.lines().next().unwrap(),
        "filename,dc.identifier,dc.title,dc.date,dc.format,dc.format2,dc.formatversion,dc.description"
    );
    assert_eq!(
        metadata.lines().nth(1).unwrap(),
        "data/objects/scans/a.tif,1234-001,a.tif,2020-01-01,1 photograph (tif),image/tiff,,"
    );
    assert_eq!(
        metadata.lines().nth(2).unwrap(),
        "data/objects/scans/b.pdf,1234-001,b.pdf,2019-03-02,12 p. (pdf),application/pdf,,"
    );
    // Photoshop layer count is reported one higher than the tag value
    assert!(
        metadata
            .lines()
            .nth(3)
            .unwrap()
            .ends_with("Item is a Photoshop file with 4 layers.")
    );

    let rights = transfer.read_file("rights.csv").unwrap();
    assert_eq!(rights.lines().count(), 4);
    assert!(rights.lines().nth(1).unwrap().starts_with("data/objects/scans/a.tif,copyright,copyrighted,"));
}

#[test]
fn rights_rows_share_one_statement() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row(), document_row()]).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "u", "-a", "2024-017"])
        .assert()
        .success();

    let rights = transfer.read_file("rights.csv").unwrap();
    let statements: Vec<&str> = rights
        .lines()
        .skip(1)
        .map(|line| line.split_once(',').unwrap().1)
        .collect();
    assert_eq!(statements[0], statements[1]);
    assert!(statements[0].contains("University Records Transfer"));
    assert!(statements[0].contains("2024-017"));
}

#[test]
fn transform_leaves_input_untouched() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row()]).unwrap();
    let before = transfer.read_file("metadataExp.csv").unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "1234-001"])
        .assert()
        .success();

    assert_eq!(transfer.read_file("metadataExp.csv").unwrap(), before);
}

#[test]
fn rerun_overwrites_previous_outputs() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row(), document_row()]).unwrap();

    let run = || {
        transfer
            .bagprep()
            .arg("transform")
            .arg(&input)
            .args(["-t", "d", "-a", "1234-001"])
            .assert()
            .success();
    };

    run();
    let first = transfer.read_file("metadata.csv").unwrap();
    run();
    assert_eq!(transfer.read_file("metadata.csv").unwrap(), first);
}

#[test]
fn malformed_accession_is_rejected_before_any_output() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "12-34"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("####-###"));

    assert!(!transfer.has_file("metadata.csv"));
    assert!(!transfer.has_file("rights.csv"));
}

#[test]
fn custom_accession_mask_is_honored() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_export(&[photograph_row()]).unwrap();

    transfer
        .bagprep()
        .arg("transform")
        .arg(&input)
        .args(["-t", "d", "-a", "AC12.34", "--accession-mask", "AC##.##"])
        .assert()
        .success();

    let metadata = transfer.read_file("metadata.csv").unwrap();
    assert!(metadata.lines().nth(1).unwrap().contains(",AC12.34,"));
}
