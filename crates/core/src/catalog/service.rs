//! Archetype registry.

use std::collections::HashSet;

use super::error::CatalogError;
use super::types::{OutputFormat, ReportArchetype, RequestedFormat, Section};

/// Immutable registry of report archetypes, in display order.
#[derive(Debug, Clone)]
pub struct ReportCatalog {
    archetypes: Vec<ReportArchetype>,
}

impl ReportCatalog {
    /// Builds a catalogue from explicit archetypes.
    ///
    /// # Errors
    ///
    /// Returns an error if ids repeat, a section repeats within an archetype,
    /// or an archetype allows no formats.
    pub fn new(archetypes: Vec<ReportArchetype>) -> Result<Self, CatalogError> {
        let catalog = Self { archetypes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// The standard investment banking catalogue.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            archetypes: standard_archetypes(),
        }
    }

    /// Checks the structural invariants of the catalogue.
    ///
    /// # Errors
    ///
    /// See [`ReportCatalog::new`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for archetype in &self.archetypes {
            if !ids.insert(archetype.id.as_str()) {
                return Err(CatalogError::DuplicateArchetype(archetype.id.clone()));
            }
            if archetype.allowed_formats.is_empty() {
                return Err(CatalogError::NoFormats(archetype.id.clone()));
            }
            let mut seen = HashSet::new();
            for section in &archetype.sections {
                if !seen.insert(*section) {
                    return Err(CatalogError::DuplicateSection {
                        archetype: archetype.id.clone(),
                        section: section.title().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Looks an archetype up by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown ids.
    pub fn archetype_by_id(&self, id: &str) -> Result<&ReportArchetype, CatalogError> {
        self.archetypes
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Returns true if the archetype may be rendered into `format`.
    #[must_use]
    pub fn is_format_allowed(archetype: &ReportArchetype, format: OutputFormat) -> bool {
        archetype.allowed_formats.contains(&format)
    }

    /// Returns true if the archetype accepts the requested format. The
    /// presentation alias additionally needs `offers_presentation`.
    #[must_use]
    pub fn is_request_allowed(archetype: &ReportArchetype, format: RequestedFormat) -> bool {
        Self::is_format_allowed(archetype, format.output_format())
            && (format != RequestedFormat::Presentation || archetype.offers_presentation)
    }

    /// All archetypes in display order.
    #[must_use]
    pub fn archetypes(&self) -> &[ReportArchetype] {
        &self.archetypes
    }
}

impl Default for ReportCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_archetypes() -> Vec<ReportArchetype> {
    vec![
        ReportArchetype::new(
            "pitch_book",
            "Pitch Book",
            "Comprehensive company overview and investment thesis",
        )
        .with_sections([
            Section::ExecutiveSummary,
            Section::MarketAnalysis,
            Section::FinancialHighlights,
            Section::Valuation,
            Section::KeyRisks,
        ])
        .with_presentation_alias(),
        ReportArchetype::new(
            "cim",
            "Confidential Information Memorandum",
            "Detailed memorandum for potential buyers/investors",
        )
        .with_sections([
            Section::CompanyOverview,
            Section::ProductsServices,
            Section::FinancialPerformance,
            Section::ManagementTeam,
            Section::GrowthStrategy,
        ])
        .allow(OutputFormat::FlowDocument),
        ReportArchetype::new(
            "teaser",
            "Investment Teaser",
            "One-page summary to generate initial interest",
        )
        .with_sections([
            Section::Highlights,
            Section::KeyMetrics,
            Section::InvestmentHighlights,
        ])
        .with_presentation_alias(),
        ReportArchetype::new(
            "financial_model",
            "Financial Model",
            "Three-statement model with projections",
        )
        .with_sections([
            Section::IncomeStatement,
            Section::BalanceSheet,
            Section::CashFlow,
        ])
        .allow(OutputFormat::Workbook),
        ReportArchetype::new(
            "valuation_model",
            "Valuation Model",
            "Discounted cash flow valuation with sensitivity tables",
        )
        .with_sections([Section::DcfAnalysis, Section::Sensitivity])
        .allow(OutputFormat::Workbook),
        ReportArchetype::new(
            "market_analysis",
            "Market Analysis Report",
            "Industry landscape and competitive positioning",
        )
        .with_sections([
            Section::MarketSize,
            Section::GrowthTrends,
            Section::CompetitiveLandscape,
            Section::KeyPlayers,
        ])
        .with_presentation_alias(),
        ReportArchetype::new(
            "due_diligence",
            "Due Diligence Report",
            "Comprehensive DD findings and recommendations",
        )
        .with_sections([
            Section::FinancialDd,
            Section::CommercialDd,
            Section::LegalDd,
            Section::OperationalDd,
            Section::KeyFindings,
        ])
        .allow(OutputFormat::FlowDocument),
        ReportArchetype::new(
            "aggregated_report",
            "Aggregated Portfolio Report",
            "Consolidated view of all active deals and exposure",
        )
        .with_sections([
            Section::PortfolioSummary,
            Section::RiskAnalysis,
            Section::SectorAllocation,
            Section::PerformanceMetrics,
        ])
        .allow(OutputFormat::FlowDocument)
        .allow(OutputFormat::Workbook),
    ]
}
