//! Integration tests for the finalize pass.

use crate::common::TestTransfer;
use predicates::prelude::*;

const REVIEWED_HEADER: &str =
    "filename,dc.identifier,dc.title,dc.date,dc.format,dc.format2,dc.formatversion,dc.description";

fn reviewed_table() -> String {
    format!(
        "{REVIEWED_HEADER}\n\
         objects,,,,,,,\n\
         objects/correspondence,,,,,,,\n\
         data/objects/correspondence/a.pdf,1234-001,a.pdf,2008-06-20,3 p. (pdf),application/pdf,,\n\
         data/objects/correspondence/b.pdf,1234-001,,2008-06-20,2 p. (pdf),application/pdf,,\n\
         objects/presentations,,,,,,,\n\
         data/objects/presentations/intro.ppt,1234-001,intro.ppt,2006-02-10,,application/vnd.ms-powerpoint,,Item is a ppt file\n"
    )
}

#[test]
fn finalize_populates_group_rows_and_normalizes_data_rows() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_file("metadata-reviewed.csv", &reviewed_table()).unwrap();

    transfer
        .bagprep()
        .arg("finalize")
        .arg(&input)
        .args(["-o", "metadata.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 folder group(s)"));

    let written = transfer.read_file("metadata.csv").unwrap();
    let lines: Vec<&str> = written.lines().collect();

    // placeholder "objects" row is gone
    assert_eq!(lines.len(), 6); // header + 5 rows
    assert!(!lines.iter().any(|l| l.starts_with("objects,")));

    // first group row: title, repeated child date, default extent, description
    assert!(lines[1].starts_with(
        "objects/correspondence,,correspondence,2008-06-20,1 digital folder,"
    ));
    assert!(lines[1].ends_with("Folder contains files relating to correspondence"));

    // blank data-row title filled with the basename
    assert!(lines[3].starts_with("data/objects/correspondence/b.pdf,1234-001,b.pdf,"));

    // ppt description gets its extension parenthesized
    assert!(lines[5].ends_with("Item is a (ppt) file"));
}

#[test]
fn finalize_removes_input_by_default() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_file("metadata-reviewed.csv", &reviewed_table()).unwrap();

    transfer
        .bagprep()
        .arg("finalize")
        .arg(&input)
        .args(["-o", "metadata.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed reviewed input"));

    assert!(!transfer.has_file("metadata-reviewed.csv"));
    assert!(transfer.has_file("metadata.csv"));
}

#[test]
fn finalize_keeps_input_with_keep_flag() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer.write_file("metadata-reviewed.csv", &reviewed_table()).unwrap();

    transfer
        .bagprep()
        .arg("finalize")
        .arg(&input)
        .args(["-o", "metadata.csv", "--keep"])
        .assert()
        .success();

    assert!(transfer.has_file("metadata-reviewed.csv"));
    assert!(transfer.has_file("metadata.csv"));
}

#[test]
fn finalize_rejects_table_missing_descriptive_columns() {
    let transfer = TestTransfer::new().unwrap();
    let input = transfer
        .write_file(
            "metadata-reviewed.csv",
            "filename,dc.title\ndata/objects/a.tif,a.tif\n",
        )
        .unwrap();

    transfer
        .bagprep()
        .arg("finalize")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dc.date"));

    assert!(transfer.has_file("metadata-reviewed.csv"));
}
