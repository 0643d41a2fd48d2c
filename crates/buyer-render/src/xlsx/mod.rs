//! Hand-assembled OOXML spreadsheet writer
//!
//! Produces `.xlsx` packages without a spreadsheet library: every XML part is
//! generated in [`parts`] and packed into a ZIP container with the `zip` crate.
//!
//! ## Package layout
//!
//! ```text
//! [Content_Types].xml            default + override content types
//! _rels/.rels                    package -> workbook, core, app
//! docProps/app.xml               application + sheet titles
//! docProps/core.xml              creator, title, created/modified
//! xl/workbook.xml                <sheets> in input order
//! xl/_rels/workbook.xml.rels     rId{N} -> worksheets/sheet{N}.xml
//! xl/worksheets/sheet{N}.xml     inline-string and numeric cells
//! ```
//!
//! There are no styles, shared strings, formulas or date serials: strings are
//! written inline and numbers are written exactly as the caller formatted them.
//!
//! ## Concurrency
//!
//! A [`WorkbookWriter`] holds no state beyond its configuration, so separate
//! calls never interfere. Two calls writing the *same* path race on the file
//! and the last writer wins; no locking is attempted.

pub mod address;
pub mod escape;
pub mod parts;
pub mod sheet_name;

pub use address::{cell_reference, column_index, column_letters};
pub use escape::escape_xml;
pub use sheet_name::{duplicate_sheet_names, sanitize_sheet_name};

use buyer_core::RenderError;
use chrono::{DateTime, Utc};
use std::fmt;
use std::fs::{self, File};
use std::io::{self, Cursor, Seek, Write};
use std::path::Path;
use tracing::{debug, info, warn};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ============================================================================
// Model
// ============================================================================

/// A single cell value.
///
/// Numbers are carried as pre-formatted decimal text and written verbatim,
/// so a monetary `1234.50` keeps its trailing zero. The writer never parses
/// or validates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    String(String),
    Number(String),
}

impl Cell {
    pub fn string(text: impl Into<String>) -> Self {
        Cell::String(text.into())
    }

    pub fn number(value: impl fmt::Display) -> Self {
        Cell::Number(value.to_string())
    }
}

/// Cells in column order; position is the column index
pub type Row = Vec<Cell>;

/// A named grid of rows. Row 0 is conventionally the header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Worksheet {
    /// Tab name before sanitization
    pub name: String,
    pub rows: Vec<Row>,
}

impl Worksheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Append a row of string cells
    pub fn with_header<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows
            .push(titles.into_iter().map(|title| Cell::String(title.into())).collect());
        self
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Builds one OOXML package per call.
///
/// The creation timestamp is supplied up front and stamped into
/// `docProps/core.xml`; nothing is read from the clock or from global state.
#[derive(Clone, Debug)]
pub struct WorkbookWriter {
    created_at: DateTime<Utc>,
    /// Application name (`app.xml`) and creator (`core.xml`)
    pub application: String,
    /// Optional document title (`core.xml`)
    pub title: Option<String>,
    /// Compression for every entry
    pub compression: CompressionMethod,
}

impl WorkbookWriter {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            application: "buyer".into(),
            title: None,
            compression: CompressionMethod::Deflated,
        }
    }

    /// Set the application/creator name
    pub fn application(mut self, name: impl Into<String>) -> Self {
        self.application = name.into();
        self
    }

    /// Set the document title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Store entries uncompressed (handy when inspecting output by hand)
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Generate every part of the package as `(path, xml)` pairs, in the
    /// order they are written to the archive.
    pub fn parts(&self, worksheets: &[Worksheet]) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(6 + worksheets.len());
        out.push((
            parts::CONTENT_TYPES_PATH.to_string(),
            parts::content_types_xml(worksheets.len()),
        ));
        out.push((parts::ROOT_RELS_PATH.to_string(), parts::root_rels_xml()));
        out.push((
            parts::APP_PATH.to_string(),
            parts::app_xml(&self.application, worksheets),
        ));
        out.push((
            parts::CORE_PATH.to_string(),
            parts::core_xml(&self.application, self.title.as_deref(), &self.created_at),
        ));
        out.push((parts::WORKBOOK_PATH.to_string(), parts::workbook_xml(worksheets)));
        out.push((
            parts::WORKBOOK_RELS_PATH.to_string(),
            parts::workbook_rels_xml(worksheets.len()),
        ));
        for (idx, sheet) in worksheets.iter().enumerate() {
            out.push((parts::worksheet_path(idx + 1), parts::worksheet_xml(sheet)));
        }
        out
    }

    /// Write the package into any seekable sink and hand the sink back
    pub fn write<W: Write + Seek>(
        &self,
        worksheets: &[Worksheet],
        sink: W,
    ) -> Result<W, RenderError> {
        check_sheet_names(worksheets);

        let mut zip = ZipWriter::new(sink);
        let options = FileOptions::<()>::default().compression_method(self.compression);

        for (path, xml) in self.parts(worksheets) {
            debug!(part = %path, bytes = xml.len(), "writing package part");
            zip.start_file(path.as_str(), options)
                .map_err(|e| RenderError::Format(format!("{path}: {e}")))?;
            zip.write_all(xml.as_bytes())?;
        }

        zip.finish()
            .map_err(|e| RenderError::Format(format!("finalize archive: {e}")))
    }

    /// Build the package in memory
    pub fn to_bytes(&self, worksheets: &[Worksheet]) -> Result<Vec<u8>, RenderError> {
        let bytes = self.write(worksheets, Cursor::new(Vec::new()))?.into_inner();
        info!(sheets = worksheets.len(), bytes = bytes.len(), "workbook assembled");
        Ok(bytes)
    }

    /// Build the package and write it to `path`.
    ///
    /// Missing parent directories are created and an existing file is removed
    /// first. The replacement is not atomic: a failure part-way through can
    /// leave the destination missing or truncated. Every failure touching the
    /// destination is reported as [`RenderError::ArchiveCreationFailed`].
    pub fn write_to_path(
        &self,
        worksheets: &[Worksheet],
        path: impl AsRef<Path>,
    ) -> Result<(), RenderError> {
        let path = path.as_ref();
        let bytes = self.to_bytes(worksheets)?;

        prepare_destination(path)?;

        let mut file = File::create(path).map_err(|e| RenderError::archive_creation(path, e))?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|e| RenderError::archive_creation(path, e))?;

        info!(path = %path.display(), bytes = bytes.len(), "workbook written");
        Ok(())
    }
}

fn prepare_destination(path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            debug!(dir = %parent.display(), "creating parent directories");
            fs::create_dir_all(parent).map_err(|e| RenderError::archive_creation(path, e))?;
        }
    }

    match fs::remove_file(path) {
        Ok(()) => {
            warn!(path = %path.display(), "replaced existing file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RenderError::archive_creation(path, e)),
    }
}

/// Distinct sheet names are the caller's responsibility; collisions are only
/// reported.
fn check_sheet_names(worksheets: &[Worksheet]) {
    if worksheets.is_empty() {
        warn!("writing workbook without worksheets");
        return;
    }
    for name in duplicate_sheet_names(worksheets.iter().map(|s| s.name.as_str())) {
        warn!(sheet = %name, "duplicate sheet name after sanitization");
    }
}
