//! Catalogue data types: sections, formats, and report archetypes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Catalogue section titles.
///
/// Every section any archetype can list is a variant here, so template
/// lookups over `Section` are checked for completeness at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Executive Summary.
    ExecutiveSummary,
    /// Market Analysis.
    MarketAnalysis,
    /// Financial Highlights.
    FinancialHighlights,
    /// Valuation.
    Valuation,
    /// Key Risks.
    KeyRisks,
    /// Company Overview.
    CompanyOverview,
    /// Products/Services.
    ProductsServices,
    /// Financial Performance.
    FinancialPerformance,
    /// Management Team.
    ManagementTeam,
    /// Growth Strategy.
    GrowthStrategy,
    /// Highlights.
    Highlights,
    /// Key Metrics.
    KeyMetrics,
    /// Investment Highlights.
    InvestmentHighlights,
    /// Income Statement (reserved).
    IncomeStatement,
    /// Balance Sheet (reserved).
    BalanceSheet,
    /// Cash Flow (reserved).
    CashFlow,
    /// DCF Analysis.
    DcfAnalysis,
    /// Sensitivity.
    Sensitivity,
    /// Market Size.
    MarketSize,
    /// Growth Trends.
    GrowthTrends,
    /// Competitive Landscape.
    CompetitiveLandscape,
    /// Key Players.
    KeyPlayers,
    /// Financial DD.
    FinancialDd,
    /// Commercial DD.
    CommercialDd,
    /// Legal DD.
    LegalDd,
    /// Operational DD.
    OperationalDd,
    /// Key Findings.
    KeyFindings,
    /// Portfolio Summary.
    PortfolioSummary,
    /// Risk Analysis.
    RiskAnalysis,
    /// Sector Allocation.
    SectorAllocation,
    /// Performance Metrics.
    PerformanceMetrics,
}

impl Section {
    /// All catalogue sections.
    pub const ALL: [Self; 31] = [
        Self::ExecutiveSummary,
        Self::MarketAnalysis,
        Self::FinancialHighlights,
        Self::Valuation,
        Self::KeyRisks,
        Self::CompanyOverview,
        Self::ProductsServices,
        Self::FinancialPerformance,
        Self::ManagementTeam,
        Self::GrowthStrategy,
        Self::Highlights,
        Self::KeyMetrics,
        Self::InvestmentHighlights,
        Self::IncomeStatement,
        Self::BalanceSheet,
        Self::CashFlow,
        Self::DcfAnalysis,
        Self::Sensitivity,
        Self::MarketSize,
        Self::GrowthTrends,
        Self::CompetitiveLandscape,
        Self::KeyPlayers,
        Self::FinancialDd,
        Self::CommercialDd,
        Self::LegalDd,
        Self::OperationalDd,
        Self::KeyFindings,
        Self::PortfolioSummary,
        Self::RiskAnalysis,
        Self::SectorAllocation,
        Self::PerformanceMetrics,
    ];

    /// Returns the display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ExecutiveSummary => "Executive Summary",
            Self::MarketAnalysis => "Market Analysis",
            Self::FinancialHighlights => "Financial Highlights",
            Self::Valuation => "Valuation",
            Self::KeyRisks => "Key Risks",
            Self::CompanyOverview => "Company Overview",
            Self::ProductsServices => "Products/Services",
            Self::FinancialPerformance => "Financial Performance",
            Self::ManagementTeam => "Management Team",
            Self::GrowthStrategy => "Growth Strategy",
            Self::Highlights => "Highlights",
            Self::KeyMetrics => "Key Metrics",
            Self::InvestmentHighlights => "Investment Highlights",
            Self::IncomeStatement => "Income Statement",
            Self::BalanceSheet => "Balance Sheet",
            Self::CashFlow => "Cash Flow",
            Self::DcfAnalysis => "DCF Analysis",
            Self::Sensitivity => "Sensitivity",
            Self::MarketSize => "Market Size",
            Self::GrowthTrends => "Growth Trends",
            Self::CompetitiveLandscape => "Competitive Landscape",
            Self::KeyPlayers => "Key Players",
            Self::FinancialDd => "Financial DD",
            Self::CommercialDd => "Commercial DD",
            Self::LegalDd => "Legal DD",
            Self::OperationalDd => "Operational DD",
            Self::KeyFindings => "Key Findings",
            Self::PortfolioSummary => "Portfolio Summary",
            Self::RiskAnalysis => "Risk Analysis",
            Self::SectorAllocation => "Sector Allocation",
            Self::PerformanceMetrics => "Performance Metrics",
        }
    }

    /// Looks a section up by its exact title.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.title() == title)
    }

    /// Returns the financial statement this section renders, if reserved.
    #[must_use]
    pub const fn statement(self) -> Option<StatementKind> {
        match self {
            Self::IncomeStatement => Some(StatementKind::IncomeStatement),
            Self::BalanceSheet => Some(StatementKind::BalanceSheet),
            Self::CashFlow => Some(StatementKind::CashFlow),
            _ => None,
        }
    }

    /// Returns true for the three reserved statement sections.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        self.statement().is_some()
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A section slot name: a catalogue section or an arbitrary title.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SectionName {
    /// Known catalogue section.
    Catalogued(Section),
    /// Title with no catalogue entry.
    Custom(String),
}

impl SectionName {
    /// Builds a section name from a title, preferring the catalogue entry.
    #[must_use]
    pub fn from_title(title: &str) -> Self {
        Section::from_title(title).map_or_else(|| Self::Custom(title.to_string()), Self::Catalogued)
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Catalogued(section) => section.title(),
            Self::Custom(title) => title,
        }
    }

    /// Returns the catalogue section this name refers to. A custom title
    /// that spells a catalogue title refers to that section.
    #[must_use]
    pub fn section(&self) -> Option<Section> {
        match self {
            Self::Catalogued(section) => Some(*section),
            Self::Custom(title) => Section::from_title(title),
        }
    }

    /// Returns the financial statement this name renders, if reserved.
    #[must_use]
    pub fn statement(&self) -> Option<StatementKind> {
        self.section().and_then(Section::statement)
    }
}

impl From<Section> for SectionName {
    fn from(section: Section) -> Self {
        Self::Catalogued(section)
    }
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The three financial statements with tabular rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// Income statement.
    IncomeStatement,
    /// Balance sheet.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
}

impl StatementKind {
    /// All statement kinds.
    pub const ALL: [Self; 3] = [Self::IncomeStatement, Self::BalanceSheet, Self::CashFlow];

    /// Returns the reserved section for this statement.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::IncomeStatement => Section::IncomeStatement,
            Self::BalanceSheet => Section::BalanceSheet,
            Self::CashFlow => Section::CashFlow,
        }
    }
}

/// Rendered output container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Paginated flow document (PDF).
    FlowDocument,
    /// Multi-sheet workbook (XLSX).
    Workbook,
}

impl OutputFormat {
    /// File name extension, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::FlowDocument => "pdf",
            Self::Workbook => "xlsx",
        }
    }

    /// MIME type of the rendered bytes.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::FlowDocument => "application/pdf",
            Self::Workbook => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FlowDocument => f.write_str("document"),
            Self::Workbook => f.write_str("workbook"),
        }
    }
}

/// Format as requested by a caller.
///
/// `Presentation` is a UI alias that renders as a flow document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestedFormat {
    /// Flow document.
    #[serde(alias = "pdf")]
    Document,
    /// Presentation variant of the flow document.
    #[serde(alias = "pptx")]
    Presentation,
    /// Workbook.
    #[serde(alias = "xlsx")]
    Workbook,
}

impl RequestedFormat {
    /// Returns the container this request renders into.
    #[must_use]
    pub const fn output_format(self) -> OutputFormat {
        match self {
            Self::Document | Self::Presentation => OutputFormat::FlowDocument,
            Self::Workbook => OutputFormat::Workbook,
        }
    }

    /// Returns the canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Presentation => "presentation",
            Self::Workbook => "workbook",
        }
    }
}

impl fmt::Display for RequestedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "document" | "pdf" => Ok(Self::Document),
            "presentation" | "pptx" => Ok(Self::Presentation),
            "workbook" | "xlsx" => Ok(Self::Workbook),
            _ => Err(format!("Unknown format: {s}")),
        }
    }
}

/// A report type with a fixed section list and allowed formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportArchetype {
    /// Catalogue id (e.g. `pitch_book`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Sections in rendering order.
    pub sections: Vec<Section>,
    /// Containers this archetype may be rendered into.
    pub allowed_formats: BTreeSet<OutputFormat>,
    /// Whether the presentation alias is offered alongside the document.
    pub offers_presentation: bool,
}

impl ReportArchetype {
    /// Creates an archetype with no sections or formats.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            sections: Vec::new(),
            allowed_formats: BTreeSet::new(),
            offers_presentation: false,
        }
    }

    /// Sets the ordered section list.
    #[must_use]
    pub fn with_sections(mut self, sections: impl IntoIterator<Item = Section>) -> Self {
        self.sections = sections.into_iter().collect();
        self
    }

    /// Allows rendering into the given container.
    #[must_use]
    pub fn allow(mut self, format: OutputFormat) -> Self {
        self.allowed_formats.insert(format);
        self
    }

    /// Offers the presentation alias (implies the flow document).
    #[must_use]
    pub fn with_presentation_alias(mut self) -> Self {
        self.allowed_formats.insert(OutputFormat::FlowDocument);
        self.offers_presentation = true;
        self
    }

    /// Formats a caller can pick for this archetype, in display order.
    #[must_use]
    pub fn selectable_formats(&self) -> Vec<RequestedFormat> {
        let mut formats = Vec::with_capacity(3);
        if self.allowed_formats.contains(&OutputFormat::FlowDocument) {
            formats.push(RequestedFormat::Document);
            if self.offers_presentation {
                formats.push(RequestedFormat::Presentation);
            }
        }
        if self.allowed_formats.contains(&OutputFormat::Workbook) {
            formats.push(RequestedFormat::Workbook);
        }
        formats
    }
}
