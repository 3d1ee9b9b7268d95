//! Tests for the workbook layout and XLSX writer.

use std::io::{Cursor, Read};
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use nexus_shared::BrandingConfig;
use nexus_shared::types::Subject;
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;

use super::workbook::{COVER_SHEET, Cell, MAX_SHEET_NAME_LEN, Workbook, WorkbookComposer, sheet_name};
use super::{Composer, CompositionContext};
use crate::catalog::{ReportCatalog, SectionName};
use crate::content::ContentResolver;
use crate::financials::{FinancialModelLibrary, labels};

fn composer() -> WorkbookComposer {
    WorkbookComposer::new(
        Arc::new(ContentResolver::standard()),
        Arc::new(FinancialModelLibrary::standard()),
        BrandingConfig::default(),
    )
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn globex() -> Subject {
    Subject::new("c2", "Globex Industries", "Industrial", "GLBX")
}

fn text(value: &str) -> Cell {
    Cell::Text(value.to_string())
}

fn heading(value: &str) -> Cell {
    Cell::Heading(value.to_string())
}

/// Amount cells of the row labelled `label`.
fn amounts(rows: &[Vec<Cell>], label: &str) -> Vec<Decimal> {
    rows.iter()
        .find(|row| row.first().and_then(Cell::as_text) == Some(label))
        .unwrap()
        .iter()
        .filter_map(|cell| match cell {
            Cell::Amount(value) => Some(*value),
            _ => None,
        })
        .collect()
}

fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_financial_model_sheets() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("financial_model").unwrap();
    let subject = globex();

    let workbook = composer().layout(&CompositionContext::new(archetype, &subject, generated_at()));

    assert_eq!(
        workbook.sheet_names(),
        ["Cover", "Income Statement", "Balance Sheet", "Cash Flow"]
    );
}

#[test]
fn test_cover_sheet_rows() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("financial_model").unwrap();
    let subject = globex();

    let workbook = composer().layout(&CompositionContext::new(archetype, &subject, generated_at()));
    let cover = workbook.sheet(COVER_SHEET).unwrap();

    assert_eq!(
        cover.rows,
        vec![
            vec![heading("Financial Model")],
            vec![text("Globex Industries")],
            vec![text("Industrial")],
            vec![],
            vec![text("Generated:"), text("March 15, 2024")],
            vec![
                text("Platform:"),
                text("OmniNexus Enterprise Intelligence Suite")
            ],
            vec![text("Classification:"), text("Confidential")],
        ]
    );
}

#[test]
fn test_balance_sheet_identity_in_cells() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("financial_model").unwrap();
    let subject = globex();

    let workbook = composer().layout(&CompositionContext::new(archetype, &subject, generated_at()));
    let sheet = workbook.sheet("Balance Sheet").unwrap();

    assert_eq!(
        sheet.rows[0],
        vec![
            heading("Balance Sheet"),
            Cell::Empty,
            heading("FY2022"),
            heading("FY2023"),
            heading("FY2024E"),
            heading("FY2025E"),
            heading("FY2026E"),
        ]
    );

    let assets = amounts(&sheet.rows, labels::TOTAL_ASSETS);
    let liabilities = amounts(&sheet.rows, labels::TOTAL_LIABILITIES);
    let equity = amounts(&sheet.rows, labels::EQUITY);
    assert_eq!(assets.len(), 5);
    for year in 0..5 {
        assert_eq!(assets[year], liabilities[year] + equity[year]);
    }
}

#[test]
fn test_statement_rows_have_spacer_column() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("financial_model").unwrap();
    let subject = globex();

    let workbook = composer().layout(&CompositionContext::new(archetype, &subject, generated_at()));
    let sheet = workbook.sheet("Income Statement").unwrap();

    let revenue = &sheet.rows[1];
    assert_eq!(revenue[0], text(labels::REVENUE));
    assert_eq!(revenue[1], Cell::Empty);
    assert_eq!(revenue.len(), 7);
    assert!(matches!(sheet.cell(4, 2), Some(Cell::Percent(_))));
}

#[test]
fn test_text_section_sheet() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("aggregated_report").unwrap();
    let subject = globex();

    let workbook = composer().layout(&CompositionContext::new(archetype, &subject, generated_at()));
    let sheet = workbook.sheet("Portfolio Summary").unwrap();

    assert_eq!(sheet.rows[0], vec![heading("Portfolio Summary")]);
    assert!(sheet.rows[1].is_empty());
    assert_eq!(sheet.rows[2], vec![heading("Analysis Summary")]);
    assert!(
        sheet.rows[3][0]
            .as_text()
            .unwrap()
            .starts_with("Current portfolio consists of 12 active positions")
    );
}

#[rstest]
#[case("Products/Services", "Products-Services")]
#[case("Q1: [Draft]?", "Q1- -Draft--")]
#[case("a\\b*c", "a-b-c")]
#[case("Income Statement", "Income Statement")]
#[case(
    "A very long section title that exceeds the limit",
    "A very long section title that "
)]
fn test_sheet_name(#[case] title: &str, #[case] expected: &str) {
    assert_eq!(sheet_name(title), expected);
}

#[test]
fn test_colliding_sheet_names_are_disambiguated() {
    let mut workbook = Workbook::new("t", "c", generated_at());
    let long = "Competitive Landscape and Positioning Review";
    workbook.push_sheet("Cover", Vec::new());
    workbook.push_sheet("cover", Vec::new());
    workbook.push_sheet(long, Vec::new());
    workbook.push_sheet(long, Vec::new());

    let names = workbook.sheet_names();
    assert_eq!(names[0], "Cover");
    assert_eq!(names[1], "cover (2)");
    assert_eq!(names[2], "Competitive Landscape and Posit");
    assert_eq!(names[3], "Competitive Landscape and P (2)");
    assert!(names.iter().all(|n| n.chars().count() <= MAX_SHEET_NAME_LEN));
}

#[test]
fn test_custom_section_names_are_sanitized_in_layout() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("aggregated_report").unwrap();
    let subject = globex();
    let ctx = CompositionContext::new(archetype, &subject, generated_at()).with_sections([
        SectionName::from_title("Risk/Return [2024]"),
        SectionName::from_title("Risk/Return [2024]"),
    ]);

    let workbook = composer().layout(&ctx);
    assert_eq!(
        workbook.sheet_names(),
        ["Cover", "Risk-Return -2024-", "Risk-Return -2024- (2)"]
    );
}

#[test]
fn test_xlsx_package_parts() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("financial_model").unwrap();
    let subject = globex();

    let bytes = composer()
        .compose(&CompositionContext::new(archetype, &subject, generated_at()))
        .unwrap();

    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/workbook.xml",
            "xl/worksheets/sheet1.xml",
            "xl/worksheets/sheet2.xml",
            "xl/worksheets/sheet3.xml",
            "xl/worksheets/sheet4.xml",
        ]
    );

    let workbook_xml = read_entry(&bytes, "xl/workbook.xml");
    assert!(workbook_xml.contains(r#"<sheet name="Balance Sheet" sheetId="3" r:id="rId3"/>"#));

    let balance = read_entry(&bytes, "xl/worksheets/sheet3.xml");
    assert!(balance.contains(r#"<col min="1" max="1" width="25" customWidth="1"/>"#));
    assert!(balance.contains(r#"<col min="2" max="2" width="5" customWidth="1"/>"#));
    assert!(balance.contains("Total Liabilities &amp; Equity"));
    assert!(balance.contains("<v>142500000</v>"));

    let income = read_entry(&bytes, "xl/worksheets/sheet2.xml");
    assert!(income.contains("<v>0.65</v>"));
}

#[test]
fn test_xlsx_is_deterministic() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("aggregated_report").unwrap();
    let subject = globex();
    let composer = composer();

    let first = composer
        .compose(&CompositionContext::new(archetype, &subject, generated_at()))
        .unwrap();
    let second = composer
        .compose(&CompositionContext::new(archetype, &subject, generated_at()))
        .unwrap();
    assert_eq!(first, second);
}

proptest! {
    /// Sheet names never exceed the container limit or carry forbidden characters.
    #[test]
    fn prop_sheet_name_bounded(title in ".{0,80}") {
        let name = sheet_name(&title);
        prop_assert!(name.chars().count() <= MAX_SHEET_NAME_LEN);
        prop_assert!(!name.contains([':', '\\', '/', '?', '*', '[', ']']));
    }

    /// Disambiguated names stay within the limit and stay unique.
    #[test]
    fn prop_pushed_sheet_names_unique(titles in prop::collection::vec("[A-Za-z ]{0,40}", 1..8)) {
        let mut workbook = Workbook::new("t", "c", generated_at());
        for title in &titles {
            workbook.push_sheet(title, Vec::new());
        }
        let names: Vec<String> = workbook.sheet_names().iter().map(|n| n.to_lowercase()).collect();
        let unique: std::collections::HashSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());
        prop_assert!(names.iter().all(|n| n.chars().count() <= MAX_SHEET_NAME_LEN && !n.is_empty()));
    }
}
