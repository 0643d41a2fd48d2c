//! Report sections -> worksheets
//!
//! One builder per section, all with the same shape: a header row of column
//! titles, then one row per record. Every field goes through an explicit
//! [`Cell::string`] or [`Cell::number`]; nothing is coerced implicitly.
//!
//! - Dates are written as `yyyy-MM-dd` text (no date serials).
//! - Missing optional fields are written as [`MISSING`] so that every row has
//!   the same number of cells as its header.
//! - Money and rates are written from their `Decimal` text, scale intact.

use crate::xlsx::{Cell, Row, Worksheet};
use buyer_core::{
    ApprovalRecord, DeliveryRecord, ForexRecord, InvoiceRecord, ProcurementReport,
    PurchaseOrderRecord, QuoteRecord, ReportSection, SupplierRecord,
};
use chrono::NaiveDate;
use std::fmt;

/// Placeholder for an absent optional field
pub const MISSING: &str = "-";

/// Date format used for every date cell
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build one worksheet per requested section, in canonical section order.
/// Repeated sections are emitted once.
pub fn build_worksheets(report: &ProcurementReport, sections: &[ReportSection]) -> Vec<Worksheet> {
    let mut sections = sections.to_vec();
    sections.sort();
    sections.dedup();
    sections
        .into_iter()
        .map(|section| build_section(report, section))
        .collect()
}

/// Build the worksheet for a single section
pub fn build_section(report: &ProcurementReport, section: ReportSection) -> Worksheet {
    match section {
        ReportSection::Summary => summary_sheet(report),
        ReportSection::Suppliers => suppliers_sheet(&report.suppliers),
        ReportSection::Quotes => quotes_sheet(&report.quotes),
        ReportSection::PurchaseOrders => purchase_orders_sheet(&report.purchase_orders),
        ReportSection::Approvals => approvals_sheet(&report.approvals),
        ReportSection::Deliveries => deliveries_sheet(&report.deliveries),
        ReportSection::Invoices => invoices_sheet(&report.invoices),
        ReportSection::ForexRates => forex_sheet(&report.forex_rates),
    }
}

fn date_cell(date: NaiveDate) -> Cell {
    Cell::string(date.format(DATE_FORMAT).to_string())
}

fn optional_date_cell(date: Option<NaiveDate>) -> Cell {
    date.map_or_else(|| Cell::string(MISSING), date_cell)
}

fn optional_text_cell(text: Option<&str>) -> Cell {
    Cell::string(text.unwrap_or(MISSING))
}

/// Derived figures that could not be computed (overflow) render as [`MISSING`]
fn optional_number_cell<T: fmt::Display>(value: Option<T>) -> Cell {
    value.map_or_else(|| Cell::string(MISSING), Cell::number)
}

fn sheet<'a, T: 'a>(
    section: ReportSection,
    header: &[&str],
    records: impl IntoIterator<Item = &'a T>,
    row: impl Fn(&T) -> Row,
) -> Worksheet {
    let mut sheet = Worksheet::new(section.title()).with_header(header.iter().copied());
    for record in records {
        sheet.push_row(row(record));
    }
    sheet
}

/// Key figures: title, timestamp, record counts and totals
pub fn summary_sheet(report: &ProcurementReport) -> Worksheet {
    let mut sheet = Worksheet::new(ReportSection::Summary.title())
        .with_header(["Metric", "Value"])
        .with_row(vec![Cell::string("Report"), Cell::string(&report.title)])
        .with_row(vec![
            Cell::string("Generated At"),
            Cell::string(report.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        ]);

    for section in ReportSection::ALL {
        if section == ReportSection::Summary {
            continue;
        }
        sheet.push_row(vec![
            Cell::string(section.title()),
            Cell::number(report.section_len(section)),
        ]);
    }

    sheet
        .with_row(vec![
            Cell::string("Purchase Order Total"),
            optional_number_cell(report.purchase_order_total()),
        ])
        .with_row(vec![
            Cell::string("Invoice Total"),
            optional_number_cell(report.invoice_total()),
        ])
}

pub fn suppliers_sheet(suppliers: &[SupplierRecord]) -> Worksheet {
    sheet(
        ReportSection::Suppliers,
        &[
            "ID",
            "Name",
            "Currency",
            "Contact Person",
            "Email",
            "Phone",
            "Country",
            "Payment Terms",
        ],
        suppliers,
        |s| {
            vec![
                Cell::number(s.id),
                Cell::string(&s.name),
                Cell::string(&s.currency),
                optional_text_cell(s.contact_person.as_deref()),
                optional_text_cell(s.email.as_deref()),
                optional_text_cell(s.phone.as_deref()),
                optional_text_cell(s.country.as_deref()),
                optional_text_cell(s.payment_terms.as_deref()),
            ]
        },
    )
}

pub fn quotes_sheet(quotes: &[QuoteRecord]) -> Worksheet {
    sheet(
        ReportSection::Quotes,
        &[
            "ID",
            "Supplier",
            "Product",
            "Price",
            "Currency",
            "Converted Price",
            "Quote Date",
            "Valid Until",
            "Status",
        ],
        quotes,
        |q| {
            vec![
                Cell::number(q.id),
                Cell::string(&q.supplier),
                Cell::string(&q.product),
                Cell::number(q.price),
                Cell::string(&q.currency),
                Cell::number(q.converted_price),
                date_cell(q.quote_date),
                optional_date_cell(q.valid_until),
                Cell::string(&q.status),
            ]
        },
    )
}

pub fn purchase_orders_sheet(orders: &[PurchaseOrderRecord]) -> Worksheet {
    sheet(
        ReportSection::PurchaseOrders,
        &[
            "PO Number",
            "Supplier",
            "Product",
            "Status",
            "Order Date",
            "Quantity",
            "Unit Price",
            "Currency",
            "Total Amount",
            "Shipping",
            "Tax",
            "Grand Total",
        ],
        orders,
        |po| {
            vec![
                Cell::string(&po.po_number),
                Cell::string(&po.supplier),
                Cell::string(&po.product),
                Cell::string(&po.status),
                optional_date_cell(po.order_date),
                Cell::number(po.quantity),
                Cell::number(po.unit_price),
                Cell::string(&po.currency),
                optional_number_cell(po.total_amount()),
                Cell::number(po.shipping_cost),
                Cell::number(po.tax),
                optional_number_cell(po.grand_total()),
            ]
        },
    )
}

pub fn approvals_sheet(approvals: &[ApprovalRecord]) -> Worksheet {
    sheet(
        ReportSection::Approvals,
        &["PO Number", "Approver", "Decision", "Decided On", "Comments"],
        approvals,
        |a| {
            vec![
                Cell::string(&a.po_number),
                Cell::string(&a.approver),
                Cell::string(&a.decision),
                optional_date_cell(a.decided_on),
                optional_text_cell(a.comments.as_deref()),
            ]
        },
    )
}

pub fn deliveries_sheet(deliveries: &[DeliveryRecord]) -> Worksheet {
    sheet(
        ReportSection::Deliveries,
        &["PO Number", "Expected", "Actual", "Quantity Received", "Status"],
        deliveries,
        |d| {
            vec![
                Cell::string(&d.po_number),
                optional_date_cell(d.expected),
                optional_date_cell(d.actual),
                Cell::number(d.quantity_received),
                Cell::string(&d.status),
            ]
        },
    )
}

pub fn invoices_sheet(invoices: &[InvoiceRecord]) -> Worksheet {
    sheet(
        ReportSection::Invoices,
        &[
            "Invoice Number",
            "PO Number",
            "Supplier",
            "Issued On",
            "Due On",
            "Amount",
            "Currency",
            "Paid",
        ],
        invoices,
        |inv| {
            vec![
                Cell::string(&inv.invoice_number),
                Cell::string(&inv.po_number),
                Cell::string(&inv.supplier),
                date_cell(inv.issued_on),
                optional_date_cell(inv.due_on),
                Cell::number(inv.amount),
                Cell::string(&inv.currency),
                Cell::string(if inv.paid { "Yes" } else { "No" }),
            ]
        },
    )
}

pub fn forex_sheet(rates: &[ForexRecord]) -> Worksheet {
    sheet(
        ReportSection::ForexRates,
        &["From", "To", "Rate", "Effective Date"],
        rates,
        |fx| {
            vec![
                Cell::string(&fx.from_currency),
                Cell::string(&fx.to_currency),
                Cell::number(fx.rate),
                date_cell(fx.effective_date),
            ]
        },
    )
}
