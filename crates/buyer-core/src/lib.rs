//! # buyer-core
//!
//! Core domain model and traits for buyer procurement reports.
//!
//! This crate provides:
//! - Report record types: `SupplierRecord`, `QuoteRecord`, `PurchaseOrderRecord`,
//!   `ApprovalRecord`, `DeliveryRecord`, `InvoiceRecord`, `ForexRecord`
//! - The `ProcurementReport` aggregate and the `ReportSection` catalogue
//! - Core trait: `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use buyer_core::{ProcurementReport, PurchaseOrderRecord, SupplierRecord};
//! use chrono::{NaiveDate, TimeZone, Utc};
//! use rust_decimal::Decimal;
//!
//! let generated_at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
//! let mut report = ProcurementReport::new("Q1 Procurement", generated_at);
//! report.suppliers.push(SupplierRecord::new(1, "Acme", "USD").email("sales@acme.test"));
//! report.purchase_orders.push(
//!     PurchaseOrderRecord::new("PO-2025-001", "Acme", "Widget")
//!         .ordered_on(NaiveDate::from_ymd_opt(2025, 2, 3).unwrap())
//!         .quantity(10)
//!         .unit_price(Decimal::new(12345, 2)),
//! );
//! assert_eq!(report.record_count(), 2);
//! ```

pub mod report;

pub use report::{
    ApprovalRecord, DeliveryRecord, ForexRecord, InvoiceRecord, ProcurementReport,
    PurchaseOrderRecord, QuoteRecord, ReportSection, SupplierRecord,
};

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a procurement report to the output format
    fn render(&self, report: &ProcurementReport) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    /// The destination could not be prepared or written: the parent directory
    /// could not be created, a stale file could not be removed, or the file
    /// could not be opened for writing.
    #[error("Failed to create archive at {}: {source}", path.display())]
    ArchiveCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),
}

impl RenderError {
    /// Wrap an I/O failure on `path` as the distinguished archive failure
    pub fn archive_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArchiveCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// True when the destination itself could not be written
    pub fn is_archive_creation_failure(&self) -> bool {
        matches!(self, Self::ArchiveCreationFailed { .. })
    }
}

/// Error raised when a section name cannot be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown report section: {0}")]
pub struct UnknownSection(pub String);

// ============================================================================
// Tests
// ============================================================================
