//! XLSX serialization of a [`Workbook`].
//!
//! Produces a minimal SpreadsheetML package: content types, package and
//! workbook relationships, a fixed stylesheet, one worksheet part per sheet,
//! and core document properties. Strings are written inline, so no shared
//! string table is needed. Every zip entry carries the same fixed timestamp
//! so identical workbooks serialize to identical bytes.

use std::io::{Cursor, Write};

use rust_decimal::Decimal;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use super::ComposeError;
use super::workbook::{COLUMN_WIDTHS, Cell, Sheet, Workbook};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// Style indices into `cellXfs` of the stylesheet.
mod style {
    pub const BOLD: u8 = 1;
    pub const AMOUNT: u8 = 2;
    pub const PERCENT: u8 = 3;
}

const STYLES: &str = concat!(
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<numFmts count="1"><numFmt numFmtId="164" formatCode="0.0%"/></numFmts>"#,
    r#"<fonts count="2">"#,
    r#"<font><sz val="11"/><name val="Calibri"/></font>"#,
    r#"<font><b/><sz val="11"/><name val="Calibri"/></font>"#,
    r#"</fonts>"#,
    r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#,
    r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="4">"#,
    r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/>"#,
    r#"<xf numFmtId="3" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>"#,
    r#"<xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>"#,
    r#"</cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#,
);

/// Serializes the workbook into XLSX bytes.
///
/// # Errors
///
/// Returns `ComposeError` if the zip container cannot be written.
pub fn write(workbook: &Workbook) -> Result<Vec<u8>, ComposeError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    let mut entries = vec![
        ("[Content_Types].xml".to_string(), content_types(workbook)),
        ("_rels/.rels".to_string(), package_rels()),
        ("docProps/core.xml".to_string(), core_properties(workbook)),
        ("xl/workbook.xml".to_string(), workbook_xml(workbook)),
        ("xl/_rels/workbook.xml.rels".to_string(), workbook_rels(workbook)),
        ("xl/styles.xml".to_string(), format!("{XML_DECLARATION}\n{STYLES}")),
    ];
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        entries.push((
            format!("xl/worksheets/sheet{}.xml", index + 1),
            worksheet_xml(sheet),
        ));
    }

    for (name, body) in entries {
        zip.start_file(name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn content_types(workbook: &Workbook) -> String {
    let mut xml = format!(
        "{XML_DECLARATION}\n<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/xl/workbook.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml\"/>\
         <Override PartName=\"/xl/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml\"/>\
         <Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>"
    );
    for index in 1..=workbook.sheets.len() {
        xml.push_str(&format!(
            "<Override PartName=\"/xl/worksheets/sheet{index}.xml\" \
             ContentType=\"application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml\"/>"
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels() -> String {
    format!(
        "{XML_DECLARATION}\n<Relationships xmlns=\"{PACKAGE_REL_NS}\">\
         <Relationship Id=\"rId1\" Type=\"{REL_NS}/officeDocument\" Target=\"xl/workbook.xml\"/>\
         <Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>\
         </Relationships>"
    )
}

fn core_properties(workbook: &Workbook) -> String {
    format!(
        "{XML_DECLARATION}\n<cp:coreProperties \
         xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         xmlns:dcterms=\"http://purl.org/dc/terms/\" \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\
         <dc:title>{}</dc:title><dc:creator>{}</dc:creator>\
         <dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created>\
         </cp:coreProperties>",
        escape(&workbook.title),
        escape(&workbook.creator),
        workbook.created_at.format("%Y-%m-%dT%H:%M:%SZ"),
    )
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<workbook xmlns=\"{MAIN_NS}\" xmlns:r=\"{REL_NS}\"><sheets>");
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let id = index + 1;
        xml.push_str(&format!(
            "<sheet name=\"{}\" sheetId=\"{id}\" r:id=\"rId{id}\"/>",
            escape(&sheet.name)
        ));
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels(workbook: &Workbook) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<Relationships xmlns=\"{PACKAGE_REL_NS}\">");
    for id in 1..=workbook.sheets.len() {
        xml.push_str(&format!(
            "<Relationship Id=\"rId{id}\" Type=\"{REL_NS}/worksheet\" Target=\"worksheets/sheet{id}.xml\"/>"
        ));
    }
    xml.push_str(&format!(
        "<Relationship Id=\"rId{}\" Type=\"{REL_NS}/styles\" Target=\"styles.xml\"/>",
        workbook.sheets.len() + 1
    ));
    xml.push_str("</Relationships>");
    xml
}

fn worksheet_xml(sheet: &Sheet) -> String {
    let mut xml = format!("{XML_DECLARATION}\n<worksheet xmlns=\"{MAIN_NS}\"><cols>");
    for (index, width) in COLUMN_WIDTHS.iter().enumerate() {
        let column = index + 1;
        xml.push_str(&format!(
            "<col min=\"{column}\" max=\"{column}\" width=\"{width}\" customWidth=\"1\"/>"
        ));
    }
    xml.push_str("</cols><sheetData>");

    for (row_index, cells) in sheet.rows.iter().enumerate() {
        if cells.iter().all(|cell| *cell == Cell::Empty) {
            continue;
        }
        let row_number = row_index + 1;
        xml.push_str(&format!("<row r=\"{row_number}\">"));
        for (column_index, cell) in cells.iter().enumerate() {
            let reference = format!("{}{row_number}", column_name(column_index));
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => xml.push_str(&inline_string(&reference, text, None)),
                Cell::Heading(text) => {
                    xml.push_str(&inline_string(&reference, text, Some(style::BOLD)));
                }
                Cell::Amount(value) => xml.push_str(&format!(
                    "<c r=\"{reference}\" s=\"{}\"><v>{}</v></c>",
                    style::AMOUNT,
                    value.normalize()
                )),
                Cell::Percent(value) => xml.push_str(&format!(
                    "<c r=\"{reference}\" s=\"{}\"><v>{}</v></c>",
                    style::PERCENT,
                    (*value / Decimal::ONE_HUNDRED).normalize()
                )),
            }
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn inline_string(reference: &str, text: &str, style_index: Option<u8>) -> String {
    let style_attr = style_index.map(|s| format!(" s=\"{s}\"")).unwrap_or_default();
    format!(
        "<c r=\"{reference}\" t=\"inlineStr\"{style_attr}><is><t xml:space=\"preserve\">{}</t></is></c>",
        escape(text)
    )
}

/// Spreadsheet column letters for a zero-based index: A..Z, AA..
fn column_name(index: usize) -> String {
    let mut name = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + u8::try_from(rem).unwrap_or(0));
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

/// XML text/attribute escaping; characters XML 1.0 cannot carry are dropped.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' | '\n' | '\r' => escaped.push(ch),
            c if c < ' ' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
