//! Section narrative content.
//!
//! Maps a section and subject name to canned narrative text. Catalogue
//! sections are looked up in an enum-keyed template table; anything else gets
//! a deterministic fallback sentence, so composers always have text to render.

use std::borrow::Cow;
use std::collections::HashMap;

use crate::catalog::{Section, SectionName};

/// Placeholder replaced with the subject name in templates.
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Resolves section text for a subject.
#[derive(Debug, Clone)]
pub struct ContentResolver {
    templates: HashMap<Section, Cow<'static, str>>,
}

impl ContentResolver {
    /// Resolver with the standard template for every catalogue section.
    #[must_use]
    pub fn standard() -> Self {
        let templates = Section::ALL
            .into_iter()
            .map(|section| (section, Cow::Borrowed(default_template(section))))
            .collect();
        Self { templates }
    }

    /// Replaces the template for one section.
    ///
    /// Blank templates are ignored so resolution never yields empty text.
    #[must_use]
    pub fn with_template(mut self, section: Section, template: impl Into<String>) -> Self {
        let template = template.into();
        if !template.trim().is_empty() {
            self.templates.insert(section, Cow::Owned(template));
        }
        self
    }

    /// Resolves the body text of `section` for `subject_name`.
    #[must_use]
    pub fn resolve(&self, section: &SectionName, subject_name: &str) -> String {
        let template = section.section().and_then(|s| self.templates.get(&s));

        match template {
            Some(template) => template.replace(SUBJECT_PLACEHOLDER, subject_name),
            None => fallback(section.title(), subject_name),
        }
    }

    /// Resolves the body text of a title (exact-key lookup).
    #[must_use]
    pub fn resolve_title(&self, title: &str, subject_name: &str) -> String {
        self.resolve(&SectionName::from_title(title), subject_name)
    }
}

impl Default for ContentResolver {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text for sections without a template.
#[must_use]
pub fn fallback(section_title: &str, subject_name: &str) -> String {
    format!(
        "Detailed analysis of {section_title} for {subject_name}. This section contains comprehensive information and data relevant to the investment decision."
    )
}

fn default_template(section: Section) -> &'static str {
    match section {
        Section::ExecutiveSummary => {
            "{subject} represents a compelling investment opportunity in the current market environment. The company has demonstrated strong revenue growth of 25% YoY with EBITDA margins expanding to 18%. Key value drivers include market leadership, proprietary technology, and an experienced management team."
        }
        Section::MarketAnalysis => {
            "The target market is valued at $45B with a CAGR of 12% through 2028. {subject} holds approximately 15% market share and is positioned in the fastest-growing segment. Competitive dynamics favor established players with scale advantages."
        }
        Section::FinancialHighlights => {
            "Revenue: $250M (FY2024E), EBITDA: $45M (18% margin), Net Debt: $75M (1.7x leverage), Free Cash Flow: $30M, Working Capital Cycle: 45 days. Historical growth rate of 22% CAGR over the past 5 years."
        }
        Section::Valuation => {
            "Based on comparable company analysis, the implied EV/EBITDA range is 8.0x-10.0x, suggesting an enterprise value of $360M-$450M. DCF analysis with a 10% WACC and 3% terminal growth rate yields a mid-point valuation of $420M."
        }
        Section::KeyRisks => {
            "Primary risks include: (1) Customer concentration with top 5 customers representing 40% of revenue, (2) Regulatory changes in key markets, (3) Integration risk for recent acquisitions, (4) Foreign exchange exposure in international operations."
        }
        Section::CompanyOverview => {
            "{subject} is a leading provider of enterprise solutions with operations across 15 countries. Founded in 2005, the company has grown to 500+ employees and serves Fortune 500 clients."
        }
        Section::ProductsServices => {
            "Core offerings include SaaS platform (60% of revenue), Professional Services (25%), and Maintenance & Support (15%). The product portfolio has an NPS score of 72."
        }
        Section::FinancialPerformance => {
            "Strong financial track record with consistent profitability. Revenue CAGR of 20% over 5 years. Gross margin stable at 65%. Operating leverage improving with scale."
        }
        Section::ManagementTeam => {
            "Experienced leadership team with average tenure of 8+ years. CEO has 25 years of industry experience. CFO previously at Fortune 100 company. Strong bench of operational leaders."
        }
        Section::GrowthStrategy => {
            "Three-pronged growth strategy: (1) Organic expansion in existing markets, (2) New product development leveraging AI/ML, (3) Strategic M&A in adjacent verticals."
        }
        Section::Highlights => {
            "Premium market position, recurring revenue model, strong customer retention (95%), significant barriers to entry, and clear path to margin expansion."
        }
        Section::KeyMetrics => {
            "ARR: $200M, Net Revenue Retention: 115%, CAC Payback: 18 months, LTV/CAC: 4.5x, Rule of 40: 48%."
        }
        Section::InvestmentHighlights => {
            "Attractive entry point at 8x forward EBITDA, multiple value creation levers, strong secular tailwinds, and clear exit optionality."
        }
        Section::IncomeStatement => {
            "Detailed 5-year income statement projection with revenue build-up, cost structure analysis, and margin assumptions."
        }
        Section::BalanceSheet => {
            "Pro forma balance sheet with working capital requirements, CapEx projections, and debt schedule."
        }
        Section::CashFlow => {
            "Operating, investing, and financing cash flow projections with sensitivity analysis on key assumptions."
        }
        Section::DcfAnalysis => {
            "Detailed discounted cash flow model with WACC calculation, terminal value, and sensitivity tables."
        }
        Section::Sensitivity => {
            "Key driver sensitivity analysis including revenue growth, EBITDA margin, WACC, and terminal growth rate scenarios."
        }
        Section::MarketSize => {
            "Total addressable market of $100B with serviceable market of $30B. Expected to grow at 15% CAGR driven by digital transformation trends."
        }
        Section::GrowthTrends => {
            "Key trends include cloud adoption, AI integration, regulatory compliance requirements, and consolidation among smaller players."
        }
        Section::CompetitiveLandscape => {
            "Fragmented market with top 5 players holding 35% share. Barriers to entry are high due to technology and customer relationships."
        }
        Section::KeyPlayers => {
            "Major competitors include Company A (20% share), Company B (15% share), and several regional players. {subject} differentiates through technology and service quality."
        }
        Section::FinancialDd => {
            "Detailed review of historical financials, quality of earnings analysis, working capital trends, and normalized EBITDA adjustments."
        }
        Section::CommercialDd => {
            "Customer interviews, competitive positioning assessment, pricing power analysis, and market share validation."
        }
        Section::LegalDd => {
            "Review of material contracts, litigation history, IP portfolio, and regulatory compliance status."
        }
        Section::OperationalDd => {
            "Technology infrastructure assessment, organizational review, key person dependencies, and operational efficiency opportunities."
        }
        Section::KeyFindings => {
            "Overall positive findings with manageable risk factors. Recommended proceed with transaction subject to identified integration workstreams."
        }
        Section::PortfolioSummary => {
            "Current portfolio consists of 12 active positions with total exposure of $2.5B. Average hold period of 3.2 years with blended IRR of 22%."
        }
        Section::RiskAnalysis => {
            "Portfolio diversified across sectors with no single position exceeding 15% of total exposure. Credit quality weighted average of BB+."
        }
        Section::SectorAllocation => {
            "Technology (30%), Healthcare (25%), Industrial (20%), Consumer (15%), Financial Services (10%). Geographic focus on North America (60%) and Europe (40%)."
        }
        Section::PerformanceMetrics => {
            "Gross IRR of 24%, Net IRR of 18%, MOIC of 2.1x, DPI of 0.8x. Outperforming benchmark by 400bps annually."
        }
    }
}
