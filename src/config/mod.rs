//! Workflow configuration.
//!
//! The original manual workflow gathered its inputs through a sequence of
//! interactive prompts. Here the same inputs form a single upfront
//! configuration object, [`WorkflowConfig`], so runs are scriptable and
//! testable: CLI flags populate it directly, or it is loaded from a
//! `bagprep.toml` file with flags taking precedence.
//!
//! ```toml
//! # bagprep.toml
//! source_dir = "/mnt/transfers/accession-0421/objects"
//! output_dir = "/mnt/transfers/accession-0421/metadata"
//! transfer_type = "deed-of-gift"
//! accession_number = "2024-017"
//! # accession_mask = "####-###"   # default
//! # regenerate_export = true      # default
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::{BagError, Result};

/// Default mask for accession identifiers: four digits, a hyphen, three digits.
pub const DEFAULT_ACCESSION_MASK: &str = "####-###";

/// Default file name for the intermediate record export.
pub const DEFAULT_EXPORT_NAME: &str = "metadataExp.csv";

/// The legal basis under which material was accessioned.
///
/// Selects which of the two fixed rights templates every row of a run
/// receives. The short forms `d` and `u` match what operators typed at the
/// original prompts and are accepted anywhere a transfer type is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferType {
    /// Material donated under a signed deed of gift.
    #[value(alias = "d")]
    DeedOfGift,
    /// Material transferred internally as university records.
    #[value(alias = "u")]
    UniversityTransfer,
}

impl TransferType {
    /// The document-identifier label Archivematica expects in `rights.csv`.
    #[must_use]
    pub const fn doc_id_label(self) -> &'static str {
        match self {
            Self::DeedOfGift => "Deed of Gift",
            Self::UniversityTransfer => "University Records Transfer",
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.doc_id_label())
    }
}

impl FromStr for TransferType {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "deed-of-gift" | "deed of gift" => Ok(Self::DeedOfGift),
            "u" | "university-transfer" | "university records transfer" => {
                Ok(Self::UniversityTransfer)
            }
            other => Err(BagError::ConfigError {
                message: format!(
                    "unknown transfer type '{other}' (expected 'd'/'deed-of-gift' or \
                     'u'/'university-transfer')"
                ),
            }),
        }
    }
}

/// Validation mask for accession identifiers.
///
/// `#` matches a single ASCII digit; every other character must appear
/// literally. The mask used to be a hard-coded constant buried in the mapping
/// logic; it is an explicit configuration field now, defaulting to
/// [`DEFAULT_ACCESSION_MASK`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessionMask(String);

impl AccessionMask {
    /// Wrap a mask pattern. An empty mask disables validation.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    /// The raw mask pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Check an accession number against the mask.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::AccessionMismatch`] when the value differs in
    /// length or any literal/digit position.
    pub fn validate(&self, value: &str) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }

        let matches = self.0.chars().count() == value.chars().count()
            && self.0.chars().zip(value.chars()).all(|(m, v)| match m {
                '#' => v.is_ascii_digit(),
                literal => v == literal,
            });

        if matches {
            Ok(())
        } else {
            Err(BagError::AccessionMismatch {
                value: value.to_string(),
                mask: self.0.clone(),
            })
        }
    }
}

impl Default for AccessionMask {
    fn default() -> Self {
        Self(DEFAULT_ACCESSION_MASK.to_string())
    }
}

impl fmt::Display for AccessionMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The complete set of operator inputs for a workflow run.
///
/// Equivalent to the answers the original prompt sequence collected:
/// regenerate-export yes/no, source directory, output directory, transfer
/// type, and accession number.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Whether to run the export stage. When `false` the transform consumes
    /// an existing intermediate file unchanged.
    #[serde(default = "default_regenerate")]
    pub regenerate_export: bool,

    /// Directory of digitized objects to scan.
    pub source_dir: PathBuf,

    /// Directory receiving the intermediate export and the two output tables.
    pub output_dir: PathBuf,

    /// Legal basis for the accession.
    pub transfer_type: TransferType,

    /// Accession identifier, validated against `accession_mask`.
    pub accession_number: String,

    /// Mask the accession number must match.
    #[serde(default = "default_mask")]
    pub accession_mask: String,
}

fn default_regenerate() -> bool {
    true
}

fn default_mask() -> String {
    DEFAULT_ACCESSION_MASK.to_string()
}

impl WorkflowConfig {
    /// Load a workflow configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BagError::ConfigNotFound`] when the file does not exist and
    /// [`BagError::TomlError`] when it fails to parse.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(BagError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        Ok(config)
    }

    /// Validate the accession number against the configured mask.
    pub fn validate(&self) -> Result<()> {
        AccessionMask::new(&self.accession_mask).validate(&self.accession_number)
    }

    /// Path of the intermediate record file for this run.
    #[must_use]
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(DEFAULT_EXPORT_NAME)
    }
}
