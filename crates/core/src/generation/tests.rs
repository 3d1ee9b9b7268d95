//! Tests for the report generator.

use std::io::Cursor;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use nexus_shared::types::Subject;
use nexus_shared::{AppError, BrandingConfig, ReportsConfig};
use rstest::rstest;

use super::error::{GenerationError, GenerationErrorKind};
use super::service::{ReportGenerator, suggested_file_stem};
use super::types::{GenerationRecord, MimeKind};
use crate::catalog::{OutputFormat, ReportCatalog, RequestedFormat};
use crate::compose::{ComposeError, Composer, CompositionContext};
use crate::content::ContentResolver;
use crate::financials::FinancialModelLibrary;
use crate::subject::SubjectDirectory;

fn generator() -> ReportGenerator {
    ReportGenerator::new(
        Arc::new(ReportCatalog::standard()),
        Arc::new(SubjectDirectory::standard()),
    )
    .with_standard_composers(
        &Arc::new(ContentResolver::standard()),
        &Arc::new(FinancialModelLibrary::standard()),
        &BrandingConfig::default(),
    )
}

fn generated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
}

fn subject(id: &str) -> Subject {
    SubjectDirectory::standard().find_by_id(id).unwrap().clone()
}

/// Composer that always fails to write its container.
struct BrokenComposer;

impl Composer for BrokenComposer {
    fn output_format(&self) -> OutputFormat {
        OutputFormat::FlowDocument
    }

    fn compose(&self, _ctx: &CompositionContext<'_>) -> Result<Vec<u8>, ComposeError> {
        Err(ComposeError::Io(std::io::Error::other("disk full")))
    }
}

#[test]
fn test_pitch_book_document() {
    let acme = subject("c1");
    let artifact = generator()
        .generate("pitch_book", Some(&acme), RequestedFormat::Document, generated_at())
        .unwrap();

    assert_eq!(artifact.suggested_file_name, "Acme_Corporation_Pitch_Book.pdf");
    assert_eq!(artifact.mime_kind, MimeKind::Pdf);
    assert_eq!(artifact.format, OutputFormat::FlowDocument);
    assert!(artifact.bytes.starts_with(b"%PDF-1.4"));

    let text = String::from_utf8_lossy(&artifact.bytes);
    assert_eq!(text.matches("/Type /Page ").count(), 6);
}

#[test]
fn test_financial_model_workbook() {
    let globex = subject("c2");
    let artifact = generator()
        .generate("financial_model", Some(&globex), RequestedFormat::Workbook, generated_at())
        .unwrap();

    assert_eq!(
        artifact.suggested_file_name,
        "Globex_Industries_Financial_Model.xlsx"
    );
    assert_eq!(artifact.mime_kind, MimeKind::Xlsx);

    let archive = zip::ZipArchive::new(Cursor::new(artifact.bytes.as_slice())).unwrap();
    let sheets = archive
        .file_names()
        .filter(|name| name.starts_with("xl/worksheets/"))
        .count();
    assert_eq!(sheets, 4);
}

#[test]
fn test_presentation_renders_as_document() {
    let acme = subject("c1");
    let artifact = generator()
        .generate("teaser", Some(&acme), RequestedFormat::Presentation, generated_at())
        .unwrap();

    assert_eq!(artifact.format, OutputFormat::FlowDocument);
    assert_eq!(artifact.requested_format, RequestedFormat::Presentation);
    assert!(artifact.suggested_file_name.ends_with(".pdf"));
}

#[test]
fn test_generation_is_deterministic() {
    let generator = generator();
    let acme = subject("c1");
    for (archetype, format) in [
        ("pitch_book", RequestedFormat::Document),
        ("aggregated_report", RequestedFormat::Workbook),
    ] {
        let first = generator.generate(archetype, Some(&acme), format, generated_at()).unwrap();
        let second = generator.generate(archetype, Some(&acme), format, generated_at()).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_subject_required() {
    let err = generator()
        .generate("teaser", None, RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(err, GenerationError::SubjectRequired);
    assert_eq!(err.kind(), GenerationErrorKind::SubjectRequired);
    assert!(!err.is_retryable());
}

#[test]
fn test_format_not_allowed() {
    let globex = subject("c2");
    let err = generator()
        .generate("financial_model", Some(&globex), RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(
        err,
        GenerationError::FormatNotAllowed {
            archetype: "financial_model".to_string(),
            format: RequestedFormat::Document,
        }
    );
}

#[test]
fn test_presentation_requires_archetype_offer() {
    let acme = subject("c1");
    let err = generator()
        .generate("cim", Some(&acme), RequestedFormat::Presentation, generated_at())
        .unwrap_err();
    assert_eq!(
        err,
        GenerationError::FormatNotAllowed {
            archetype: "cim".to_string(),
            format: RequestedFormat::Presentation,
        }
    );
}

#[test]
fn test_unknown_archetype_checked_before_subject() {
    let err = generator()
        .generate("quarterly_letter", None, RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(err, GenerationError::ArchetypeNotFound("quarterly_letter".to_string()));
}

#[test]
fn test_subject_checked_before_format() {
    let err = generator()
        .generate("financial_model", None, RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(err.kind(), GenerationErrorKind::SubjectRequired);
}

#[test]
fn test_composition_failure_is_retryable() {
    let generator = generator().with_composer(Arc::new(BrokenComposer));
    let acme = subject("c1");
    let err = generator
        .generate("cim", Some(&acme), RequestedFormat::Document, generated_at())
        .unwrap_err();

    assert_eq!(err.kind(), GenerationErrorKind::CompositionFailure);
    assert!(err.is_retryable());
    assert!(err.to_string().contains("disk full"));
}

#[test]
fn test_missing_composer_is_composition_failure() {
    let generator = ReportGenerator::new(
        Arc::new(ReportCatalog::standard()),
        Arc::new(SubjectDirectory::standard()),
    );
    let acme = subject("c1");
    let err = generator
        .generate("cim", Some(&acme), RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(err.kind(), GenerationErrorKind::CompositionFailure);
}

#[rstest]
#[case(GenerationError::ArchetypeNotFound("x".into()), 404, "NOT_FOUND")]
#[case(GenerationError::SubjectRequired, 400, "VALIDATION_ERROR")]
#[case(
    GenerationError::FormatNotAllowed { archetype: "cim".into(), format: RequestedFormat::Workbook },
    422,
    "BUSINESS_RULE_VIOLATION"
)]
#[case(GenerationError::CompositionFailure("boom".into()), 500, "INTERNAL_ERROR")]
fn test_app_error_mapping(
    #[case] err: GenerationError,
    #[case] status: u16,
    #[case] code: &str,
) {
    let app: AppError = err.into();
    assert_eq!(app.status_code(), status);
    assert_eq!(app.error_code(), code);
}

#[test]
fn test_regenerate_resolves_known_subject() {
    let artifact = generator()
        .regenerate(
            "market_analysis",
            "Globex Industries Market Analysis Report",
            RequestedFormat::Document,
            generated_at(),
        )
        .unwrap();
    assert_eq!(
        artifact.suggested_file_name,
        "Globex_Industries_Market_Analysis_Report.pdf"
    );
}

#[test]
fn test_regenerate_unknown_subject_still_renders() {
    let artifact = generator()
        .regenerate("teaser", "Tyrell Corporation", RequestedFormat::Document, generated_at())
        .unwrap();
    assert_eq!(artifact.subject_name, "Tyrell Corporation");
    assert_eq!(
        artifact.suggested_file_name,
        "Tyrell_Corporation_Investment_Teaser.pdf"
    );
}

#[test]
fn test_regenerate_blank_name_requires_subject() {
    let err = generator()
        .regenerate("teaser", "  ", RequestedFormat::Document, generated_at())
        .unwrap_err();
    assert_eq!(err, GenerationError::SubjectRequired);
}

#[test]
fn test_generation_record() {
    let acme = subject("c1");
    let artifact = generator()
        .generate("pitch_book", Some(&acme), RequestedFormat::Presentation, generated_at())
        .unwrap();

    let record = GenerationRecord::for_artifact(&artifact);
    assert_eq!(record.archetype_id, "pitch_book");
    assert_eq!(record.display_name, "Acme Corporation Pitch Book");
    assert_eq!(record.created_at, generated_at());
    assert_eq!(record.format, RequestedFormat::Document);
    assert_eq!(record.size_bytes, artifact.bytes.len());
}

#[rstest]
#[case("Acme Corporation", "Pitch Book", '_', "Acme_Corporation_Pitch_Book")]
#[case("Acme  Corporation", "Pitch\tBook", '_', "Acme_Corporation_Pitch_Book")]
#[case("Hooli", "Financial Model", '-', "Hooli-Financial-Model")]
fn test_suggested_file_stem(
    #[case] subject: &str,
    #[case] archetype: &str,
    #[case] separator: char,
    #[case] expected: &str,
) {
    assert_eq!(suggested_file_stem(subject, archetype, separator), expected);
}

#[test]
fn test_configured_separator() {
    let generator = generator().with_reports_config(&ReportsConfig {
        file_name_separator: '-',
    });
    let acme = subject("c1");
    let artifact = generator
        .generate("teaser", Some(&acme), RequestedFormat::Document, generated_at())
        .unwrap();
    assert_eq!(artifact.suggested_file_name, "Acme-Corporation-Investment-Teaser.pdf");
}
