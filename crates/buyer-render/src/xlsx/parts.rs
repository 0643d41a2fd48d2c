//! OOXML part generators
//!
//! One pure function per package part. Sheets are numbered by position
//! (`N = index + 1`) and that single number is reused for `sheetId`, the
//! workbook relationship `rId{N}`, the part name `sheet{N}.xml` and its
//! content-type override; nothing else in the package identifies a sheet.

use super::address::cell_reference;
use super::escape::escape_xml;
use super::sheet_name::sanitize_sheet_name;
use super::{Cell, Worksheet};
use chrono::{DateTime, SecondsFormat, Utc};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_SPREADSHEET: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_OFFICE_RELS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const APP_PATH: &str = "docProps/app.xml";
pub const CORE_PATH: &str = "docProps/core.xml";
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";
pub const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";

/// Package path of the worksheet at 1-based position `number`
pub fn worksheet_path(number: usize) -> String {
    format!("xl/worksheets/sheet{number}.xml")
}

/// Timestamp format used in `core.xml`: UTC, millisecond precision
/// (`2025-03-01T09:15:00.000Z`).
pub fn w3cdtf(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `[Content_Types].xml`
pub fn content_types_xml(sheet_count: usize) -> String {
    let mut xml = String::with_capacity(1024 + sheet_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Types xmlns="{NS_CONTENT_TYPES}">"#));
    xml.push_str(&format!(r#"<Default Extension="rels" ContentType="{CT_RELS}"/>"#));
    xml.push_str(&format!(r#"<Default Extension="xml" ContentType="{CT_XML}"/>"#));
    xml.push_str(&format!(
        r#"<Override PartName="/{WORKBOOK_PATH}" ContentType="{CT_WORKBOOK}"/>"#
    ));
    for number in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Override PartName="/{}" ContentType="{CT_WORKSHEET}"/>"#,
            worksheet_path(number)
        ));
    }
    xml.push_str(&format!(r#"<Override PartName="/{CORE_PATH}" ContentType="{CT_CORE}"/>"#));
    xml.push_str(&format!(r#"<Override PartName="/{APP_PATH}" ContentType="{CT_APP}"/>"#));
    xml.push_str("</Types>");
    xml
}

/// `_rels/.rels`
pub fn root_rels_xml() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="{office}" Target="{workbook}"/>"#,
            r#"<Relationship Id="rId2" Type="{core_rel}" Target="{core}"/>"#,
            r#"<Relationship Id="rId3" Type="{app_rel}" Target="{app}"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECLARATION,
        ns = NS_PACKAGE_RELS,
        office = REL_OFFICE_DOCUMENT,
        workbook = WORKBOOK_PATH,
        core_rel = REL_CORE_PROPERTIES,
        core = CORE_PATH,
        app_rel = REL_EXTENDED_PROPERTIES,
        app = APP_PATH,
    )
}

/// `docProps/app.xml`
pub fn app_xml(application: &str, worksheets: &[Worksheet]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#
    ));
    xml.push_str(&format!("<Application>{}</Application>", escape_xml(application)));
    if !worksheets.is_empty() {
        let count = worksheets.len();
        xml.push_str(&format!(
            concat!(
                "<HeadingPairs>",
                r#"<vt:vector size="2" baseType="variant">"#,
                "<vt:variant><vt:lpstr>Worksheets</vt:lpstr></vt:variant>",
                "<vt:variant><vt:i4>{}</vt:i4></vt:variant>",
                "</vt:vector>",
                "</HeadingPairs>"
            ),
            count
        ));
        xml.push_str(&format!(
            r#"<TitlesOfParts><vt:vector size="{count}" baseType="lpstr">"#
        ));
        for sheet in worksheets {
            xml.push_str(&format!(
                "<vt:lpstr>{}</vt:lpstr>",
                escape_xml(&sanitize_sheet_name(&sheet.name))
            ));
        }
        xml.push_str("</vt:vector></TitlesOfParts>");
    }
    xml.push_str("</Properties>");
    xml
}

/// `docProps/core.xml`; the timestamp is used for both `created` and `modified`
pub fn core_xml(creator: &str, title: Option<&str>, created_at: &DateTime<Utc>) -> String {
    let stamp = w3cdtf(created_at);
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    if let Some(title) = title {
        xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
    }
    xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(creator)));
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created>"#
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

/// `xl/workbook.xml`
pub fn workbook_xml(worksheets: &[Worksheet]) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(
        r#"<workbook xmlns="{NS_SPREADSHEET}" xmlns:r="{NS_OFFICE_RELS}">"#
    ));
    if worksheets.is_empty() {
        xml.push_str("<sheets/>");
    } else {
        xml.push_str("<sheets>");
        for (idx, sheet) in worksheets.iter().enumerate() {
            let number = idx + 1;
            xml.push_str(&format!(
                r#"<sheet name="{}" sheetId="{number}" r:id="rId{number}"/>"#,
                escape_xml(&sanitize_sheet_name(&sheet.name))
            ));
        }
        xml.push_str("</sheets>");
    }
    xml.push_str("</workbook>");
    xml
}

/// `xl/_rels/workbook.xml.rels`
pub fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut xml = String::new();
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<Relationships xmlns="{NS_PACKAGE_RELS}">"#));
    for number in 1..=sheet_count {
        xml.push_str(&format!(
            r#"<Relationship Id="rId{number}" Type="{REL_WORKSHEET}" Target="worksheets/sheet{number}.xml"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// `xl/worksheets/sheet{N}.xml`
pub fn worksheet_xml(sheet: &Worksheet) -> String {
    let mut xml = String::with_capacity(256 + sheet.rows.len() * 64);
    xml.push_str(XML_DECLARATION);
    xml.push_str(&format!(r#"<worksheet xmlns="{NS_SPREADSHEET}">"#));
    if sheet.rows.is_empty() {
        xml.push_str("<sheetData/>");
    } else {
        xml.push_str("<sheetData>");
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            let row_number = row_idx + 1;
            if row.is_empty() {
                xml.push_str(&format!(r#"<row r="{row_number}"/>"#));
                continue;
            }
            xml.push_str(&format!(r#"<row r="{row_number}">"#));
            for (col, cell) in row.iter().enumerate() {
                push_cell(&mut xml, &cell_reference(col, row_number), cell);
            }
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData>");
    }
    xml.push_str("</worksheet>");
    xml
}

fn push_cell(xml: &mut String, reference: &str, cell: &Cell) {
    match cell {
        Cell::String(text) => {
            let text = escape_xml(text);
            // Leading/trailing whitespace is dropped by readers unless preserved
            let space = if text.trim() == text {
                ""
            } else {
                r#" xml:space="preserve""#
            };
            xml.push_str(&format!(
                r#"<c r="{reference}" t="inlineStr"><is><t{space}>{text}</t></is></c>"#
            ));
        }
        Cell::Number(value) => {
            xml.push_str(&format!(
                r#"<c r="{reference}"><v>{}</v></c>"#,
                escape_xml(value)
            ));
        }
    }
}
