//! Column mapping from intermediate records to descriptive metadata.
//!
//! Every target field is a pure function of zero or more source attributes
//! plus the run constants, so the whole mapping is unit-testable without
//! touching the filesystem. Fields with no mapped source (`dc.formatversion`)
//! are written empty rather than omitted, keeping the output schema stable
//! across runs.

/// The descriptive metadata header, in output order.
///
/// `dc.format2` is the documented duplicate-column artifact: the ingest
/// format wants two `dc.format` columns, a dict-keyed table cannot hold two
/// identical keys, so the second occurrence carries the suffix and the
/// operator renames it during review. It is never renamed automatically.
pub const DESCRIPTIVE_FIELDS: [&str; 8] = [
    "filename",
    "dc.identifier",
    "dc.title",
    "dc.date",
    "dc.format",
    "dc.format2",
    "dc.formatversion",
    "dc.description",
];

/// Extensions treated as single photographs rather than paged documents.
const PHOTOGRAPH_EXTENSIONS: [&str; 4] = ["psd", "jpg", "tif", "png"];

/// One mapped descriptive row, fields in [`DESCRIPTIVE_FIELDS`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptiveRecord {
    /// Object path inside the bag (`data/objects/...`).
    pub filename: String,
    /// Accession identifier, identical across the run.
    pub identifier: String,
    /// Title, from the file name.
    pub title: String,
    /// Normalized creation date.
    pub date: String,
    /// Extent statement (photograph or page count).
    pub format: String,
    /// MIME type; lands in the duplicate `dc.format2` column.
    pub format_mime: String,
    /// Layer statement for Photoshop files.
    pub description: String,
}

impl DescriptiveRecord {
    /// The row as CSV fields in [`DESCRIPTIVE_FIELDS`] order.
    #[must_use]
    pub fn as_fields(&self) -> [&str; 8] {
        [
            &self.filename,
            &self.identifier,
            &self.title,
            &self.date,
            &self.format,
            &self.format_mime,
            "", // dc.formatversion: no mapped source
            &self.description,
        ]
    }
}

/// Normalize an ExifTool timestamp to an ISO-ish date.
///
/// ExifTool writes `2020:06:15 10:03:22-04:00`; the descriptive schema wants
/// `2020-06-15`. Colons become hyphens, then everything after the first
/// whitespace is dropped.
#[must_use]
pub fn normalize_date(raw: &str) -> String {
    raw.replace(':', "-").split_whitespace().next().unwrap_or_default().to_string()
}

/// Prefix a source path with the bag's object directory.
#[must_use]
pub fn object_path(source_file: &str) -> String {
    format!("data/objects/{source_file}")
}

/// Build the extent statement for `dc.format`.
///
/// Photograph formats are a single item regardless of layer or page
/// metadata; paged formats report their page count. Returns an empty string
/// when neither applies (unknown extension with no page count).
#[must_use]
pub fn format_statement(page_count: &str, extension: &str) -> String {
    let ext = extension.trim();
    if PHOTOGRAPH_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) {
        return format!("1 photograph ({ext})");
    }
    let pages = page_count.trim();
    if pages.is_empty() || ext.is_empty() {
        return String::new();
    }
    format!("{pages} p. ({ext})")
}

/// Build the layer statement for `dc.description`.
///
/// ExifTool's `LayerCount` excludes the background layer, so the displayed
/// count is one higher. The mapping is only defined for numeric counts;
/// anything else (including the empty string for non-Photoshop files) maps
/// to an empty description.
#[must_use]
pub fn layer_statement(layer_count: &str) -> String {
    let Ok(count) = layer_count.trim().parse::<u64>() else {
        return String::new();
    };
    let displayed = count + 1;
    if displayed == 1 {
        format!("Item is a Photoshop file with {displayed} layer.")
    } else {
        format!("Item is a Photoshop file with {displayed} layers.")
    }
}
