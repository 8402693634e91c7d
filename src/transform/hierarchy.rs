//! The finalize pass over a reviewed descriptive table.
//!
//! After the operator arranges objects into folders and inserts folder group
//! rows (rows whose `filename` starts with `objects/`), this pass fills in
//! the group-level description: folder title from the last path segment, a
//! `1 digital folder` extent when none was entered, a folder description,
//! and a date inferred from the children sitting between one group row and
//! the next. Data rows get a basename title when theirs is blank and a
//! normalized `Item is a (ext) file ...` description.
//!
//! The pass consumes its input: the reviewed file is deleted after a
//! successful write unless the caller asks to keep it, so stale intermediate
//! copies do not linger next to the final `metadata.csv`.

use std::path::{Path, PathBuf};

use crate::core::{BagError, Result};

/// Columns the finalize pass reads or writes. Everything else in the input
/// header is carried through untouched.
const WORKING_COLUMNS: [&str; 5] =
    ["filename", "dc.title", "dc.date", "dc.format", "dc.description"];

/// Result of a finalize run.
#[derive(Debug)]
pub struct FinalizeOutcome {
    /// Where the final descriptive table was written.
    pub output: PathBuf,
    /// Number of data rows written (group rows included).
    pub rows: usize,
    /// Number of folder group rows that were populated.
    pub group_rows: usize,
    /// Whether the reviewed input file was deleted.
    pub input_removed: bool,
}

/// Apply the finalize pass to `input`, writing the result to `output`.
///
/// # Errors
///
/// - [`BagError::MissingInput`] when `input` is absent or has no data rows
/// - [`BagError::SchemaMismatch`] when the reviewed table lacks one of the
///   descriptive columns the pass works on
pub fn finalize(input: &Path, output: &Path, keep_input: bool) -> Result<FinalizeOutcome> {
    let (headers, mut rows) = read_reviewed(input)?;

    let col = |name: &str| -> Result<usize> {
        headers.iter().position(|h| h == name).ok_or_else(|| BagError::SchemaMismatch {
            column: name.to_string(),
            file: input.display().to_string(),
        })
    };
    let filename_col = col("filename")?;
    let title_col = col("dc.title")?;
    let date_col = col("dc.date")?;
    let format_col = col("dc.format")?;
    let description_col = col("dc.description")?;

    // The review step leaves a bare "objects" placeholder row at the top of
    // the folder listing; drop the first occurrence only.
    if let Some(placeholder) =
        rows.iter().position(|row| row[filename_col].trim() == "objects")
    {
        rows.remove(placeholder);
    }

    let group_indices: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row[filename_col].starts_with("objects/"))
        .map(|(i, _)| i)
        .collect();

    for (n, &start) in group_indices.iter().enumerate() {
        let end = group_indices.get(n + 1).copied().unwrap_or(rows.len());
        let child_dates: Vec<String> =
            rows[start + 1..end].iter().map(|row| row[date_col].trim().to_string()).collect();
        let inferred = infer_group_date(&child_dates);

        let row = &mut rows[start];
        let folder_title =
            row[filename_col].rsplit('/').next().unwrap_or_default().to_string();
        row[title_col] = folder_title.clone();
        if !inferred.is_empty() {
            row[date_col] = inferred;
        }
        if row[format_col].trim().is_empty() {
            row[format_col] = "1 digital folder".to_string();
        }
        row[description_col] = format!("Folder contains files relating to {folder_title}");
    }

    for row in &mut rows {
        if row[filename_col].starts_with("data/objects/") {
            if row[title_col].trim().is_empty() {
                row[title_col] =
                    row[filename_col].rsplit('/').next().unwrap_or_default().to_string();
            }
            row[description_col] = parenthesize_extension(&row[description_col]);
        }
    }

    let mut writer = csv::Writer::from_path(output)?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(BagError::IoError)?;

    let mut input_removed = false;
    if !keep_input && input != output {
        std::fs::remove_file(input)?;
        input_removed = true;
        tracing::debug!(target: "finalize", "Removed reviewed input {}", input.display());
    }

    Ok(FinalizeOutcome {
        output: output.to_path_buf(),
        rows: rows.len(),
        group_rows: group_indices.len(),
        input_removed,
    })
}

/// Read the reviewed descriptive table, padding short rows to header width.
fn read_reviewed(input: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    if !input.is_file() {
        return Err(BagError::MissingInput {
            path: input.display().to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(input)?;
    let headers: Vec<String> = match reader.headers() {
        Ok(headers) if !headers.is_empty() => headers.iter().map(str::to_string).collect(),
        _ => {
            return Err(BagError::MissingInput {
                path: input.display().to_string(),
            });
        }
    };

    for column in WORKING_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BagError::SchemaMismatch {
                column: column.to_string(),
                file: input.display().to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(BagError::MissingInput {
            path: input.display().to_string(),
        });
    }

    Ok((headers, rows))
}

/// Infer a folder-level date from its children's dates.
///
/// Preference order: an exact date string shared by more than one child,
/// then the single common year, then a `MIN-MAX` year span, then the first
/// non-empty child date when no year can be read at all.
fn infer_group_date(child_dates: &[String]) -> String {
    let values: Vec<&str> =
        child_dates.iter().map(String::as_str).filter(|d| !d.trim().is_empty()).collect();
    if values.is_empty() {
        return String::new();
    }

    let mut best: Option<(&str, usize)> = None;
    for value in &values {
        let count = values.iter().filter(|v| *v == value).count();
        let better = match best {
            Some((_, best_count)) => count > best_count,
            None => true,
        };
        if better {
            best = Some((value, count));
        }
    }
    if let Some((value, count)) = best {
        if count > 1 {
            return value.to_string();
        }
    }

    let years = extract_years(&values);
    if years.is_empty() {
        return values[0].to_string();
    }
    let min = years.iter().min().copied().unwrap_or_default();
    let max = years.iter().max().copied().unwrap_or_default();
    if min == max { min.to_string() } else { format!("{min}-{max}") }
}

/// Pull plausible four-digit years (19xx/20xx) out of free-form date strings.
fn extract_years(values: &[&str]) -> Vec<u32> {
    let mut years = Vec::new();
    for value in values {
        let bytes = value.as_bytes();
        let mut i = 0;
        while i + 4 <= bytes.len() {
            let window = &bytes[i..i + 4];
            if window.iter().all(u8::is_ascii_digit)
                && (window.starts_with(b"19") || window.starts_with(b"20"))
            {
                let year = window.iter().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
                years.push(year);
                i += 4;
            } else {
                i += 1;
            }
        }
    }
    years
}

/// Normalize `Item is a ppt file ...` to `Item is a (ppt) file ...`.
///
/// Only applies when the description follows that exact shape and the
/// extension is not already parenthesized.
fn parenthesize_extension(description: &str) -> String {
    const PREFIX: &str = "Item is a ";
    let Some(rest) = description.strip_prefix(PREFIX) else {
        return description.to_string();
    };
    let Some((token, tail)) = rest.split_once(' ') else {
        return description.to_string();
    };
    if tail != "file" && !tail.starts_with("file ") {
        return description.to_string();
    }
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return description.to_string();
    }
    format!("{PREFIX}({token}) {tail}")
}
