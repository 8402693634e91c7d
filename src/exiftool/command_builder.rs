//! Type-safe ExifTool command builder for consistent subprocess execution
//!
//! This module provides a fluent API for building and executing ExifTool
//! commands, ensuring consistent logging, timeout handling, and error context
//! across the codebase.

use anyhow::Context;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::BagError;

/// Builder for constructing and executing ExifTool commands.
///
/// Media scans can legitimately run for a long time over large carriers, so
/// commands run with **no timeout by default**; callers that want a bound opt
/// in with [`with_timeout`](Self::with_timeout).
///
/// Unlike most subprocess wrappers, [`execute`](Self::execute) does not treat
/// a non-zero exit status as an error: ExifTool exits non-zero when any file
/// in a scan could not be read, while still emitting rows for the rest, and
/// the export stage is required to keep that partial output. The exit status
/// is reported in [`ExifToolOutput`] and the caller decides.
///
/// # Examples
///
/// ```rust,ignore
/// let output = ExifToolCommand::new(program)
///     .args(["-csv", "-r", "-FileName"])
///     .arg(source_dir.display().to_string())
///     .execute()
///     .await?;
/// if !output.success {
///     // partial scan; output.stdout still holds the rows that were read
/// }
/// ```
pub struct ExifToolCommand {
    /// Resolved path to the exiftool executable
    program: std::path::PathBuf,

    /// Command arguments (e.g. ["-csv", "-r", "-FileName"])
    args: Vec<String>,

    /// Working directory for command execution (defaults to current directory)
    current_dir: Option<std::path::PathBuf>,

    /// Maximum duration to wait for completion (None = no timeout)
    timeout_duration: Option<Duration>,

    /// Optional context string for log messages
    context: Option<String>,
}

impl ExifToolCommand {
    /// Create a builder for the given exiftool executable.
    pub fn new(program: impl Into<std::path::PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            timeout_duration: None,
            context: None,
        }
    }

    /// Set the working directory for the command.
    ///
    /// ExifTool reports `SourceFile` relative to its working directory, so
    /// the export stage runs inside the source directory and scans `.` to
    /// get stable relative paths.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a timeout for the command (None for no timeout, the default).
    #[must_use]
    pub const fn with_timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout_duration = duration;
        self
    }

    /// Set a context label included in log messages (e.g. the accession).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Execute the command and capture its output.
    ///
    /// # Errors
    ///
    /// Fails when the executable cannot be spawned ([`BagError::ExifToolNotFound`]
    /// when the binary is missing) or when the configured timeout elapses.
    /// A non-zero exit status is **not** an error here; see the type docs.
    pub async fn execute(self) -> anyhow::Result<ExifToolOutput> {
        let start = std::time::Instant::now();
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        if let Some(ref ctx) = self.context {
            tracing::debug!(
                target: "exiftool",
                "({}) Executing command: {} {}",
                ctx,
                self.program.display(),
                self.args.join(" ")
            );
        } else {
            tracing::debug!(
                target: "exiftool",
                "Executing command: {} {}",
                self.program.display(),
                self.args.join(" ")
            );
        }

        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.stdin(Stdio::null());

        let output_future = cmd.output();

        let output = if let Some(duration) = self.timeout_duration {
            match timeout(duration, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        target: "exiftool",
                        "Command timed out after {} seconds",
                        duration.as_secs()
                    );
                    return Err(BagError::ExternalToolFailure {
                        operation: "metadata extraction".to_string(),
                        stderr: format!(
                            "exiftool timed out after {} seconds",
                            duration.as_secs()
                        ),
                    }
                    .into());
                }
            }
        } else {
            tracing::trace!(target: "exiftool", "Executing command without timeout");
            output_future.await
        };

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(BagError::ExifToolNotFound.into());
            }
            Err(e) => {
                return Err(e).context(format!(
                    "Failed to execute {} {}",
                    self.program.display(),
                    self.args.join(" ")
                ));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let success = output.status.success();

        if !success {
            tracing::debug!(
                target: "exiftool",
                "Command exited with status: {:?}",
                output.status.code()
            );
        }
        if !stderr.is_empty() {
            tracing::debug!(target: "exiftool", "{}", stderr.trim());
        }

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "exiftool::perf",
                "exiftool scan took {:.2}s",
                elapsed.as_secs_f64()
            );
        }

        Ok(ExifToolOutput {
            stdout,
            stderr,
            success,
        })
    }

    /// Execute and return trimmed stdout, failing on a non-zero exit.
    ///
    /// Used for short administrative invocations like `-ver`.
    pub async fn execute_stdout(self) -> anyhow::Result<String> {
        let operation = self.args.join(" ");
        let output = self.execute().await?;
        if !output.success {
            return Err(BagError::ExternalToolFailure {
                operation,
                stderr: output.stderr,
            }
            .into());
        }
        Ok(output.stdout.trim().to_string())
    }
}

/// Captured output from an ExifTool invocation.
pub struct ExifToolOutput {
    /// Standard output (CSV rows for `-csv` invocations)
    pub stdout: String,
    /// Standard error output (per-file warnings, scan errors)
    pub stderr: String,
    /// Whether the process exited with status zero
    pub success: bool,
}
