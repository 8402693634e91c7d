//! Common test utilities and fixtures for bagprep integration tests
//!
//! This module consolidates frequently used test patterns to reduce
//! duplication and improve test maintainability.

// Allow dead code because these utilities are used across different test files
// and not all utilities are used in every test file
#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Header of an intermediate record file as ExifTool writes it.
pub const EXPORT_HEADER: &str = "SourceFile,Title,FileName,FileCreateDate,FileModifyDate,\
                                 FileTypeExtension,MIMEType,PageCount,LayerCount";

/// Test transfer builder for creating workflow fixtures on disk.
///
/// Owns a temp directory holding the intermediate export, any config file,
/// and the output tables a command run produces.
pub struct TestTransfer {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    root: PathBuf,
}

impl TestTransfer {
    /// Create a new empty test transfer directory.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Root of the transfer directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write an arbitrary file under the transfer root, returning its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write an intermediate export with the standard header and the given
    /// data rows.
    pub fn write_export(&self, rows: &[&str]) -> Result<PathBuf> {
        let mut body = String::from(EXPORT_HEADER);
        body.push('\n');
        for row in rows {
            body.push_str(row);
            body.push('\n');
        }
        self.write_file("metadataExp.csv", &body)
    }

    /// Read a file under the transfer root to a string.
    pub fn read_file(&self, name: &str) -> Result<String> {
        Ok(fs::read_to_string(self.root.join(name))?)
    }

    /// Whether a file exists under the transfer root.
    pub fn has_file(&self, name: &str) -> bool {
        self.root.join(name).exists()
    }

    /// A `bagprep` command with its working directory set to the transfer
    /// root.
    pub fn bagprep(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("bagprep")
            .expect("bagprep binary should be built for integration tests");
        cmd.current_dir(&self.root);
        cmd
    }
}

/// A single-row export covering the common photograph case.
pub fn photograph_row() -> &'static str {
    "scans/a.tif,,a.tif,2020:01:01,,tif,image/tiff,,"
}

/// A multi-page document row.
pub fn document_row() -> &'static str {
    "scans/b.pdf,,b.pdf,2019:03:02,,pdf,application/pdf,12,"
}

/// A layered Photoshop row.
pub fn photoshop_row() -> &'static str {
    "scans/c.psd,,c.psd,2021:07:09,,psd,image/vnd.adobe.photoshop,,3"
}
