//! # buyer-render
//!
//! Rendering backends for buyer procurement reports.
//!
//! This crate provides:
//! - A from-scratch OOXML (`.xlsx`) writer ([`xlsx`]) that assembles the
//!   package parts by hand and packs them with the `zip` crate
//! - Worksheet builders turning report sections into rows ([`sheets`])
//! - [`XlsxRenderer`], the [`Renderer`] tying the two together
//!
//! ## Example
//!
//! ```rust,ignore
//! use buyer_core::{ProcurementReport, Renderer};
//! use buyer_render::XlsxRenderer;
//!
//! let renderer = XlsxRenderer::new();
//!
//! // In memory (e.g. for an HTTP download)
//! let xlsx_bytes = renderer.render(&report)?;
//!
//! // Straight to disk, replacing any previous file
//! renderer.write_to_path(&report, "reports/procurement.xlsx")?;
//! ```
//!
//! Lower-level use with caller-built worksheets:
//!
//! ```rust
//! use buyer_render::xlsx::{Cell, WorkbookWriter, Worksheet};
//! use chrono::{TimeZone, Utc};
//!
//! let sheet = Worksheet::new("Totals")
//!     .with_header(["Supplier", "Amount"])
//!     .with_row(vec![Cell::string("Acme"), Cell::number("1234.50")]);
//! let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
//! let bytes = WorkbookWriter::new(created).to_bytes(&[sheet]).unwrap();
//! assert_eq!(&bytes[0..2], b"PK");
//! ```

pub mod sheets;
pub mod xlsx;

pub use xlsx::{Cell, Row, WorkbookWriter, Worksheet};

use buyer_core::{ProcurementReport, RenderError, Renderer, ReportSection};
use std::path::Path;
use tracing::debug;

/// Procurement report -> `.xlsx` renderer
#[derive(Clone, Debug)]
pub struct XlsxRenderer {
    /// Sections to include (emitted in canonical order)
    pub sections: Vec<ReportSection>,
    /// Application name stamped into document properties
    pub application: String,
}

impl Default for XlsxRenderer {
    fn default() -> Self {
        Self {
            sections: ReportSection::ALL.to_vec(),
            application: "buyer".into(),
        }
    }
}

impl XlsxRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict output to the given sections
    pub fn sections(mut self, sections: impl IntoIterator<Item = ReportSection>) -> Self {
        self.sections = sections.into_iter().collect();
        self
    }

    /// Leave out the summary sheet
    pub fn no_summary(mut self) -> Self {
        self.sections.retain(|s| *s != ReportSection::Summary);
        self
    }

    /// Set the application name written to document properties
    pub fn application(mut self, name: impl Into<String>) -> Self {
        self.application = name.into();
        self
    }

    /// Translate the report into worksheets
    pub fn worksheets(&self, report: &ProcurementReport) -> Vec<Worksheet> {
        let worksheets = sheets::build_worksheets(report, &self.sections);
        debug!(
            sheets = worksheets.len(),
            records = report.record_count(),
            "built report worksheets"
        );
        worksheets
    }

    fn writer(&self, report: &ProcurementReport) -> WorkbookWriter {
        WorkbookWriter::new(report.generated_at)
            .application(self.application.clone())
            .title(report.title.clone())
    }

    /// Generate workbook bytes
    pub fn render_to_bytes(&self, report: &ProcurementReport) -> Result<Vec<u8>, RenderError> {
        self.writer(report).to_bytes(&self.worksheets(report))
    }

    /// Generate the workbook and write it to `path`
    pub fn write_to_path(
        &self,
        report: &ProcurementReport,
        path: impl AsRef<Path>,
    ) -> Result<(), RenderError> {
        self.writer(report)
            .write_to_path(&self.worksheets(report), path)
    }
}

impl Renderer for XlsxRenderer {
    type Output = Vec<u8>;

    fn render(&self, report: &ProcurementReport) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(report)
    }
}
