//! Error handling for bagprep
//!
//! The error system is built around two types:
//! - [`BagError`] - strongly-typed errors for every failure mode in the workflow
//! - [`ErrorContext`] - wrapper that adds user-friendly details and suggestions
//!
//! Every failure halts the stage it occurred in. Nothing is retried and
//! partial output is left on disk for operator inspection; the error messages
//! are written to carry enough context to correct and re-run the failed stage
//! by hand.
//!
//! # Error Categories
//!
//! - **Paths**: [`BagError::InvalidPath`] - source or destination missing or
//!   unreadable
//! - **Stage hand-off**: [`BagError::MissingInput`] - the transform stage was
//!   run before an export exists (or on an empty export)
//! - **Schema**: [`BagError::SchemaMismatch`] - the intermediate file lacks a
//!   required column
//! - **ExifTool**: [`BagError::ExifToolNotFound`],
//!   [`BagError::ExternalToolFailure`]
//! - **Configuration**: [`BagError::ConfigError`],
//!   [`BagError::ConfigNotFound`], [`BagError::AccessionMismatch`]
//!
//! Standard library and ecosystem errors are converted automatically:
//! [`std::io::Error`] → [`BagError::IoError`], [`csv::Error`] →
//! [`BagError::CsvError`], [`toml::de::Error`] → [`BagError::TomlError`].
//!
//! Use [`user_friendly_error`] at the CLI boundary to turn any error into a
//! colored, actionable message.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for bagprep operations.
///
/// Each variant represents a specific failure mode of the export, transform,
/// or finalize stages and carries the details an operator needs to fix the
/// problem and re-run that stage.
#[derive(Error, Debug)]
pub enum BagError {
    /// ExifTool executable not found in PATH
    ///
    /// The export stage requires ExifTool to be installed and discoverable.
    #[error("exiftool is not installed or not found in PATH")]
    ExifToolNotFound,

    /// ExifTool exited abnormally without producing usable output
    ///
    /// When ExifTool fails partway through a scan, any rows it produced are
    /// still written and the run is reported as incomplete instead of raising
    /// this error. This variant means the tool produced nothing at all.
    #[error("ExifTool failed during {operation}")]
    ExternalToolFailure {
        /// The operation that was running (e.g. "metadata export")
        operation: String,
        /// The error output from the tool
        stderr: String,
    },

    /// A source or destination path is missing, unreadable, or the wrong kind
    #[error("Invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: String,
        /// Why the path was rejected
        reason: String,
    },

    /// Transform was run before the intermediate export exists, or on an
    /// export with no data rows
    #[error("Intermediate record file {path} is missing or empty")]
    MissingInput {
        /// The expected intermediate file path
        path: String,
    },

    /// The intermediate file lacks a column the mapping requires
    ///
    /// The transformer fails closed: no output file is written, since a
    /// best-effort mapping would silently corrupt archival metadata.
    #[error("Intermediate record file {file} is missing required column '{column}'")]
    SchemaMismatch {
        /// The missing column name
        column: String,
        /// The intermediate file that was being read
        file: String,
    },

    /// Accession number does not match the configured mask
    #[error("Accession number '{value}' does not match mask '{mask}'")]
    AccessionMismatch {
        /// The accession number that was supplied
        value: String,
        /// The mask it was checked against
        mask: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Workflow configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the configuration file that was not found
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for BagError {
    fn clone(&self) -> Self {
        match self {
            Self::ExifToolNotFound => Self::ExifToolNotFound,
            Self::ExternalToolFailure { operation, stderr } => Self::ExternalToolFailure {
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::InvalidPath { path, reason } => Self::InvalidPath {
                path: path.clone(),
                reason: reason.clone(),
            },
            Self::MissingInput { path } => Self::MissingInput { path: path.clone() },
            Self::SchemaMismatch { column, file } => Self::SchemaMismatch {
                column: column.clone(),
                file: file.clone(),
            },
            Self::AccessionMismatch { value, mask } => Self::AccessionMismatch {
                value: value.clone(),
                mask: mask.clone(),
            },
            Self::ConfigError { message } => Self::ConfigError {
                message: message.clone(),
            },
            Self::ConfigNotFound { path } => Self::ConfigNotFound { path: path.clone() },
            // For errors that don't implement Clone, convert to Other
            Self::IoError(e) => Self::Other {
                message: format!("IO error: {e}"),
            },
            Self::CsvError(e) => Self::Other {
                message: format!("CSV error: {e}"),
            },
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other { message } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`BagError`] and adds optional details and a suggestion. This is
/// the shape every CLI error is rendered through:
///
/// 1. **Error**: the main message, red and bold
/// 2. **Details**: why it happened, yellow (optional)
/// 3. **Suggestion**: what to do about it, green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: BagError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: BagError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`] with suggestions.
///
/// This is the single entry point the CLI uses before printing an error.
/// Known [`BagError`] variants get tailored suggestions pointing at the
/// manual-recovery step for the failed stage; unknown errors are passed
/// through with generic context.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(bag_error) = error.downcast_ref::<BagError>() {
        return create_error_context(bag_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(BagError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check ownership of the source and output directories")
                .with_details("bagprep could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(BagError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the path exists and is spelled correctly");
            }
            _ => {}
        }
    }

    ErrorContext::new(BagError::Other {
        message: format!("{error:#}"),
    })
}

/// Attach stage-specific suggestions to a typed error.
fn create_error_context(error: BagError) -> ErrorContext {
    match &error {
        BagError::ExifToolNotFound => ErrorContext::new(error.clone())
            .with_suggestion(
                "Install ExifTool from https://exiftool.org/ or via your package manager \
                 (brew install exiftool, apt install libimage-exiftool-perl)",
            )
            .with_details("The export stage shells out to exiftool to read file metadata"),
        BagError::ExternalToolFailure { stderr, .. } => {
            let ctx = ErrorContext::new(error.clone()).with_suggestion(
                "Re-run the export against the same directory once the underlying problem \
                 is fixed; any partial export on disk can be inspected or deleted",
            );
            if stderr.trim().is_empty() {
                ctx
            } else {
                let detail = format!("exiftool reported: {}", stderr.trim());
                ctx.with_details(detail)
            }
        }
        BagError::InvalidPath { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the directory exists and that you can read it"),
        BagError::MissingInput { path } => {
            let suggestion = format!(
                "Run 'bagprep export <SOURCE_DIR> --output {path}' first, or point \
                 the transform at an existing export"
            );
            ErrorContext::new(error.clone())
                .with_suggestion(suggestion)
                .with_details("The transform stage consumes the CSV produced by the export stage")
        }
        BagError::SchemaMismatch { column, .. } => {
            let suggestion = format!(
                "Add a '{column}' column to the export (re-running the export stage \
                 regenerates the full header), then re-run the transform"
            );
            ErrorContext::new(error.clone()).with_suggestion(suggestion).with_details(
                "The transformer fails closed on missing required columns; nothing was written",
            )
        }
        BagError::AccessionMismatch { mask, .. } => {
            let suggestion = format!(
                "Supply an accession number matching '{mask}' (each '#' is a digit), \
                 or adjust accession_mask in the workflow configuration"
            );
            ErrorContext::new(error.clone()).with_suggestion(suggestion)
        }
        BagError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass --config with the path to your bagprep.toml"),
        BagError::TomlError(_) => ErrorContext::new(error).with_suggestion(
            "Check the TOML syntax in your bagprep.toml: quotes, brackets, and key names",
        ),
        _ => ErrorContext::new(error),
    }
}
