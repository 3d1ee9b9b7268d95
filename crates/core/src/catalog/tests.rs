//! Tests for the archetype catalogue.

use std::str::FromStr;

use rstest::rstest;

use super::error::CatalogError;
use super::service::ReportCatalog;
use super::types::{OutputFormat, ReportArchetype, RequestedFormat, Section, SectionName, StatementKind};

#[test]
fn test_standard_catalog_is_valid() {
    assert!(ReportCatalog::standard().validate().is_ok());
}

#[rstest]
#[case("pitch_book", "Pitch Book", 5)]
#[case("cim", "Confidential Information Memorandum", 5)]
#[case("teaser", "Investment Teaser", 3)]
#[case("financial_model", "Financial Model", 3)]
#[case("valuation_model", "Valuation Model", 2)]
#[case("market_analysis", "Market Analysis Report", 4)]
#[case("due_diligence", "Due Diligence Report", 5)]
#[case("aggregated_report", "Aggregated Portfolio Report", 4)]
fn test_archetype_lookup(#[case] id: &str, #[case] name: &str, #[case] sections: usize) {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id(id).unwrap();
    assert_eq!(archetype.name, name);
    assert_eq!(archetype.sections.len(), sections);
}

#[test]
fn test_unknown_archetype_is_not_found() {
    let catalog = ReportCatalog::standard();
    assert_eq!(
        catalog.archetype_by_id("quarterly_letter"),
        Err(CatalogError::NotFound("quarterly_letter".to_string()))
    );
}

#[test]
fn test_pitch_book_sections_in_order() {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id("pitch_book").unwrap();
    let titles: Vec<&str> = archetype.sections.iter().map(|s| s.title()).collect();
    assert_eq!(
        titles,
        [
            "Executive Summary",
            "Market Analysis",
            "Financial Highlights",
            "Valuation",
            "Key Risks"
        ]
    );
}

#[test]
fn test_format_gating() {
    let catalog = ReportCatalog::standard();
    let model = catalog.archetype_by_id("financial_model").unwrap();
    assert!(ReportCatalog::is_format_allowed(model, OutputFormat::Workbook));
    assert!(!ReportCatalog::is_format_allowed(model, OutputFormat::FlowDocument));

    let aggregated = catalog.archetype_by_id("aggregated_report").unwrap();
    assert!(ReportCatalog::is_format_allowed(aggregated, OutputFormat::Workbook));
    assert!(ReportCatalog::is_format_allowed(aggregated, OutputFormat::FlowDocument));
}

#[rstest]
#[case("pitch_book", RequestedFormat::Presentation, true)]
#[case("teaser", RequestedFormat::Presentation, true)]
#[case("cim", RequestedFormat::Document, true)]
#[case("cim", RequestedFormat::Presentation, false)]
#[case("due_diligence", RequestedFormat::Presentation, false)]
#[case("financial_model", RequestedFormat::Presentation, false)]
#[case("financial_model", RequestedFormat::Workbook, true)]
fn test_request_gating_follows_selectable_formats(
    #[case] id: &str,
    #[case] format: RequestedFormat,
    #[case] allowed: bool,
) {
    let catalog = ReportCatalog::standard();
    let archetype = catalog.archetype_by_id(id).unwrap();
    assert_eq!(ReportCatalog::is_request_allowed(archetype, format), allowed);
    assert_eq!(archetype.selectable_formats().contains(&format), allowed);
}

#[test]
fn test_selectable_formats() {
    let catalog = ReportCatalog::standard();
    assert_eq!(
        catalog.archetype_by_id("pitch_book").unwrap().selectable_formats(),
        [RequestedFormat::Document, RequestedFormat::Presentation]
    );
    assert_eq!(
        catalog.archetype_by_id("cim").unwrap().selectable_formats(),
        [RequestedFormat::Document]
    );
    assert_eq!(
        catalog.archetype_by_id("aggregated_report").unwrap().selectable_formats(),
        [RequestedFormat::Document, RequestedFormat::Workbook]
    );
}

#[test]
fn test_duplicate_section_rejected() {
    let archetype = ReportArchetype::new("dup", "Dup", "Duplicated sections")
        .with_sections([Section::Valuation, Section::Valuation])
        .allow(OutputFormat::FlowDocument);

    assert_eq!(
        ReportCatalog::new(vec![archetype]).unwrap_err(),
        CatalogError::DuplicateSection {
            archetype: "dup".to_string(),
            section: "Valuation".to_string(),
        }
    );
}

#[test]
fn test_duplicate_archetype_rejected() {
    let a = ReportArchetype::new("x", "X", "").allow(OutputFormat::Workbook);
    let result = ReportCatalog::new(vec![a.clone(), a]);
    assert_eq!(result.unwrap_err(), CatalogError::DuplicateArchetype("x".to_string()));
}

#[test]
fn test_archetype_without_formats_rejected() {
    let archetype = ReportArchetype::new("empty", "Empty", "").with_sections([Section::Highlights]);
    assert_eq!(
        ReportCatalog::new(vec![archetype]).unwrap_err(),
        CatalogError::NoFormats("empty".to_string())
    );
}

#[test]
fn test_section_titles_round_trip() {
    for section in Section::ALL {
        assert_eq!(Section::from_title(section.title()), Some(section));
    }
    assert_eq!(Section::from_title("executive summary"), None);
}

#[test]
fn test_reserved_sections() {
    let reserved: Vec<Section> = Section::ALL.into_iter().filter(|s| s.is_reserved()).collect();
    assert_eq!(
        reserved,
        [Section::IncomeStatement, Section::BalanceSheet, Section::CashFlow]
    );
    for kind in StatementKind::ALL {
        assert_eq!(kind.section().statement(), Some(kind));
    }
}

#[test]
fn test_section_name_prefers_catalogue() {
    assert_eq!(
        SectionName::from_title("Balance Sheet"),
        SectionName::Catalogued(Section::BalanceSheet)
    );
    assert_eq!(
        SectionName::from_title("Foo"),
        SectionName::Custom("Foo".to_string())
    );
    assert_eq!(SectionName::from_title("Foo").statement(), None);
    assert_eq!(SectionName::from_title("Foo").title(), "Foo");
}

#[rstest]
#[case("Income Statement", Some(StatementKind::IncomeStatement))]
#[case("Balance Sheet", Some(StatementKind::BalanceSheet))]
#[case("Cash Flow", Some(StatementKind::CashFlow))]
#[case("Valuation", None)]
#[case("balance sheet", None)]
fn test_custom_title_matching_catalogue_renders_statement(
    #[case] title: &str,
    #[case] expected: Option<StatementKind>,
) {
    let custom = SectionName::Custom(title.to_string());
    assert_eq!(custom.statement(), expected);
    assert_eq!(custom.section(), Section::from_title(title));
}

#[rstest]
#[case("document", RequestedFormat::Document)]
#[case("pdf", RequestedFormat::Document)]
#[case("PPTX", RequestedFormat::Presentation)]
#[case("presentation", RequestedFormat::Presentation)]
#[case("xlsx", RequestedFormat::Workbook)]
#[case("Workbook", RequestedFormat::Workbook)]
fn test_requested_format_parsing(#[case] raw: &str, #[case] expected: RequestedFormat) {
    assert_eq!(RequestedFormat::from_str(raw).unwrap(), expected);
}

#[test]
fn test_presentation_renders_as_document() {
    assert_eq!(
        RequestedFormat::Presentation.output_format(),
        OutputFormat::FlowDocument
    );
    assert!(RequestedFormat::from_str("docx").is_err());
}
