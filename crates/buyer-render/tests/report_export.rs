//! Integration tests for exporting a full procurement report

use buyer_core::{
    ApprovalRecord, DeliveryRecord, ForexRecord, InvoiceRecord, ProcurementReport,
    PurchaseOrderRecord, QuoteRecord, Renderer, ReportSection, SupplierRecord,
};
use buyer_render::XlsxRenderer;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use std::io::{Cursor, Read};
use tempfile::tempdir;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn create_q1_report() -> ProcurementReport {
    let at = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
    let mut report = ProcurementReport::new("Q1 2025 Procurement", at);

    report.suppliers = vec![
        SupplierRecord::new(1, "Acme Corp", "USD")
            .contact("Jane Doe")
            .email("jane@acme.test")
            .country("US")
            .payment_terms("Net 30"),
        SupplierRecord::new(2, "Müller & Söhne", "EUR").country("DE"),
    ];
    report.quotes = vec![
        QuoteRecord::new(10, "Acme Corp", "Laptop", date(2025, 1, 5))
            .price(dec!(1299.00), "USD")
            .valid_until(date(2025, 2, 5)),
        QuoteRecord::new(11, "Müller & Söhne", "Dock", date(2025, 1, 9))
            .price(dec!(189.90), "EUR")
            .converted_price(dec!(206.04))
            .status("accepted"),
    ];
    report.purchase_orders = vec![
        PurchaseOrderRecord::new("PO-2025-001", "Acme Corp", "Laptop")
            .status("received")
            .ordered_on(date(2025, 1, 10))
            .quantity(3)
            .unit_price(dec!(1299.00))
            .shipping(dec!(25.00))
            .tax(dec!(311.76)),
        PurchaseOrderRecord::new("PO-2025-002", "Müller & Söhne", "Dock")
            .status("approved")
            .ordered_on(date(2025, 1, 12))
            .quantity(5)
            .unit_price(dec!(189.90))
            .currency("EUR"),
    ];
    report.approvals = vec![
        ApprovalRecord::new("PO-2025-001", "CFO", "approved").decided_on(date(2025, 1, 10)),
        ApprovalRecord::new("PO-2025-002", "Ops Lead", "approved")
            .comments("Urgent: <replace> old docks"),
    ];
    report.deliveries = vec![DeliveryRecord::new("PO-2025-001", "received")
        .expected(date(2025, 1, 20))
        .actual(date(2025, 1, 22))
        .received(3)];
    report.invoices = vec![InvoiceRecord::new("INV-5531", "PO-2025-001", "Acme Corp", date(2025, 1, 23))
        .amount(dec!(4233.76), "USD")
        .due_on(date(2025, 2, 22))];
    report.forex_rates = vec![ForexRecord::new("EUR", "USD", dec!(1.0850), date(2025, 1, 1))];

    report
}

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut out = String::new();
    file.read_to_string(&mut out).unwrap();
    out
}

fn sheet_names(bytes: &[u8]) -> Vec<String> {
    let xml = read_entry(bytes, "xl/workbook.xml");
    let doc = roxmltree::Document::parse(&xml).unwrap();
    doc.descendants()
        .filter(|n| n.has_tag_name("sheet"))
        .filter_map(|n| n.attribute("name"))
        .map(str::to_string)
        .collect()
}

#[test]
fn render_full_report_to_excel() {
    let report = create_q1_report();
    let bytes = XlsxRenderer::new().render(&report).unwrap();

    assert_eq!(&bytes[0..2], b"PK");
    assert_eq!(
        sheet_names(&bytes),
        vec![
            "Summary",
            "Suppliers",
            "Quotes",
            "Purchase Orders",
            "Approvals",
            "Deliveries",
            "Invoices",
            "Forex Rates",
        ]
    );
}

#[test]
fn monetary_values_are_written_verbatim() {
    let bytes = XlsxRenderer::new().render(&create_q1_report()).unwrap();

    // Purchase Orders is the fourth sheet
    let orders = read_entry(&bytes, "xl/worksheets/sheet4.xml");
    assert!(orders.contains(r#"<c r="G2"><v>1299.00</v></c>"#));
    assert!(orders.contains(r#"<c r="I2"><v>3897.00</v></c>"#));
    assert!(orders.contains(r#"<c r="L2"><v>4233.76</v></c>"#));
    assert!(orders.contains(r#"<c r="I3"><v>949.50</v></c>"#));

    let forex = read_entry(&bytes, "xl/worksheets/sheet8.xml");
    assert!(forex.contains(r#"<c r="C2"><v>1.0850</v></c>"#));
    assert!(forex.contains(r#"<c r="D2" t="inlineStr"><is><t>2025-01-01</t></is></c>"#));
}

#[test]
fn text_with_markup_is_escaped() {
    let bytes = XlsxRenderer::new().render(&create_q1_report()).unwrap();

    let suppliers = read_entry(&bytes, "xl/worksheets/sheet2.xml");
    assert!(suppliers.contains("<t>Müller &amp; Söhne</t>"));

    let approvals = read_entry(&bytes, "xl/worksheets/sheet5.xml");
    assert!(approvals.contains("<t>Urgent: &lt;replace&gt; old docks</t>"));
    roxmltree::Document::parse(&approvals).unwrap();
}

#[test]
fn selected_sections_only() {
    let renderer = XlsxRenderer::new().sections([ReportSection::Invoices, ReportSection::Suppliers]);
    let bytes = renderer.render(&create_q1_report()).unwrap();
    assert_eq!(sheet_names(&bytes), vec!["Suppliers", "Invoices"]);

    let invoices = read_entry(&bytes, "xl/worksheets/sheet2.xml");
    assert!(invoices.contains(r#"<c r="A2" t="inlineStr"><is><t>INV-5531</t></is></c>"#));
    assert!(invoices.contains(r#"<c r="H2" t="inlineStr"><is><t>No</t></is></c>"#));
}

#[test]
fn document_properties_use_report_metadata() {
    let bytes = XlsxRenderer::new().render(&create_q1_report()).unwrap();
    let core = read_entry(&bytes, "docProps/core.xml");
    assert!(core.contains("<dc:title>Q1 2025 Procurement</dc:title>"));
    assert!(core.contains("2025-04-01T09:00:00.000Z"));

    let app = read_entry(&bytes, "docProps/app.xml");
    assert!(app.contains("<vt:lpstr>Purchase Orders</vt:lpstr>"));
}

#[test]
fn write_report_to_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out/q1.xlsx");

    XlsxRenderer::new()
        .write_to_path(&create_q1_report(), &path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(sheet_names(&bytes).len(), ReportSection::ALL.len());
}

#[test]
fn no_sections_yields_sheetless_workbook() {
    let renderer = XlsxRenderer::new().sections(Vec::<ReportSection>::new());
    let bytes = renderer.render(&create_q1_report()).unwrap();
    assert!(sheet_names(&bytes).is_empty());
}

#[test]
fn overflowing_order_total_still_renders() {
    let mut report = create_q1_report();
    report.purchase_orders.push(
        PurchaseOrderRecord::new("PO-2025-999", "Acme Corp", "Server")
            .quantity(2)
            .unit_price(rust_decimal::Decimal::MAX),
    );

    let bytes = XlsxRenderer::new().render(&report).unwrap();

    let orders = read_entry(&bytes, "xl/worksheets/sheet4.xml");
    assert!(orders.contains(r#"<c r="I4" t="inlineStr"><is><t>-</t></is></c>"#));
    assert!(orders.contains(r#"<c r="L4" t="inlineStr"><is><t>-</t></is></c>"#));

    let summary = read_entry(&bytes, "xl/worksheets/sheet1.xml");
    roxmltree::Document::parse(&summary).unwrap();
    assert!(summary.contains("<t>Purchase Order Total</t>"));
}

#[test]
fn control_characters_in_free_text_keep_sheet_readable() {
    let mut report = create_q1_report();
    report.approvals[0] = ApprovalRecord::new("PO-2025-001", "CFO\u{1}", "approved")
        .comments("line one\u{b}line two\u{0}");

    let bytes = XlsxRenderer::new().render(&report).unwrap();

    let approvals = read_entry(&bytes, "xl/worksheets/sheet5.xml");
    let doc = roxmltree::Document::parse(&approvals).unwrap();
    let texts: Vec<&str> = doc
        .descendants()
        .filter(|n| n.has_tag_name("t"))
        .filter_map(|n| n.text())
        .collect();
    assert!(texts.contains(&"CFO"));
    assert!(texts.contains(&"line oneline two"));
}
