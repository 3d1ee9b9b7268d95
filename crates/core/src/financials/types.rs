//! Financial statement data types.

use nexus_shared::types::{format_compact, format_percent};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::catalog::StatementKind;

/// Number of projection years in every table.
pub const YEAR_COUNT: usize = 5;

/// One value per projection year.
pub type YearValues = [Decimal; YEAR_COUNT];

/// Row labels used by the statement tables.
pub mod labels {
    /// Revenue.
    pub const REVENUE: &str = "Revenue";
    /// Cost of revenue (negative).
    pub const COST_OF_REVENUE: &str = "Cost of Revenue";
    /// Gross profit.
    pub const GROSS_PROFIT: &str = "Gross Profit";
    /// Gross margin.
    pub const GROSS_MARGIN: &str = "Gross Margin";
    /// Operating expenses (negative).
    pub const OPERATING_EXPENSES: &str = "Operating Expenses";
    /// EBITDA.
    pub const EBITDA: &str = "EBITDA";
    /// EBITDA margin.
    pub const EBITDA_MARGIN: &str = "EBITDA Margin";
    /// Depreciation and amortization.
    pub const DEPRECIATION_AMORTIZATION: &str = "D&A";
    /// EBIT.
    pub const EBIT: &str = "EBIT";
    /// Interest expense (negative).
    pub const INTEREST_EXPENSE: &str = "Interest Expense";
    /// Earnings before tax.
    pub const EBT: &str = "EBT";
    /// Taxes label prefix; the rate is appended.
    pub const TAXES: &str = "Taxes";
    /// Net income.
    pub const NET_INCOME: &str = "Net Income";

    /// Assets heading.
    pub const ASSETS: &str = "Assets";
    /// Cash and equivalents.
    pub const CASH: &str = "Cash & Equivalents";
    /// Accounts receivable.
    pub const RECEIVABLES: &str = "Accounts Receivable";
    /// Inventory.
    pub const INVENTORY: &str = "Inventory";
    /// Total current assets.
    pub const TOTAL_CURRENT_ASSETS: &str = "Total Current Assets";
    /// Property, plant and equipment.
    pub const PPE: &str = "PP&E, Net";
    /// Intangible assets.
    pub const INTANGIBLES: &str = "Intangible Assets";
    /// Total assets.
    pub const TOTAL_ASSETS: &str = "Total Assets";
    /// Liabilities heading.
    pub const LIABILITIES: &str = "Liabilities";
    /// Accounts payable.
    pub const PAYABLES: &str = "Accounts Payable";
    /// Accrued expenses.
    pub const ACCRUED: &str = "Accrued Expenses";
    /// Current portion of debt.
    pub const CURRENT_DEBT: &str = "Current Debt";
    /// Total current liabilities.
    pub const TOTAL_CURRENT_LIABILITIES: &str = "Total Current Liab";
    /// Long-term debt.
    pub const LONG_TERM_DEBT: &str = "Long-term Debt";
    /// Total liabilities.
    pub const TOTAL_LIABILITIES: &str = "Total Liabilities";
    /// Equity.
    pub const EQUITY: &str = "Equity";
    /// Total liabilities and equity.
    pub const TOTAL_LIABILITIES_AND_EQUITY: &str = "Total Liabilities & Equity";

    /// Operating activities heading.
    pub const OPERATING_ACTIVITIES: &str = "Operating Activities";
    /// Working capital changes.
    pub const WORKING_CAPITAL: &str = "Working Capital Changes";
    /// Cash from operations.
    pub const CASH_FROM_OPERATIONS: &str = "Cash from Operations";
    /// Investing activities heading.
    pub const INVESTING_ACTIVITIES: &str = "Investing Activities";
    /// Capital expenditure.
    pub const CAPEX: &str = "CapEx";
    /// Cash from investing.
    pub const CASH_FROM_INVESTING: &str = "Cash from Investing";
    /// Financing activities heading.
    pub const FINANCING_ACTIVITIES: &str = "Financing Activities";
    /// Debt repayment.
    pub const DEBT_REPAYMENT: &str = "Debt Repayment";
    /// Dividends.
    pub const DIVIDENDS: &str = "Dividends";
    /// Cash from financing.
    pub const CASH_FROM_FINANCING: &str = "Cash from Financing";
    /// Net change in cash.
    pub const NET_CHANGE_IN_CASH: &str = "Net Change in Cash";
}

/// Content of one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum RowKind {
    /// Group heading with no values.
    Heading,
    /// Empty spacer row.
    Blank,
    /// Monetary amounts.
    Amounts(YearValues),
    /// Percentages (e.g. `65.0` for 65%).
    Percentages(YearValues),
}

/// One row of a statement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    /// Row label (empty for blank rows).
    pub label: String,
    /// Row content.
    pub kind: RowKind,
}

impl StatementRow {
    /// Heading row.
    #[must_use]
    pub fn heading(label: &str) -> Self {
        Self {
            label: label.to_string(),
            kind: RowKind::Heading,
        }
    }

    /// Blank spacer row.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            label: String::new(),
            kind: RowKind::Blank,
        }
    }

    /// Amount row.
    #[must_use]
    pub fn amounts(label: &str, values: YearValues) -> Self {
        Self {
            label: label.to_string(),
            kind: RowKind::Amounts(values),
        }
    }

    /// Percentage row.
    #[must_use]
    pub fn percentages(label: &str, values: YearValues) -> Self {
        Self {
            label: label.to_string(),
            kind: RowKind::Percentages(values),
        }
    }

    /// Compact cell text per year; `None` for headings and blanks.
    #[must_use]
    pub fn formatted_values(&self) -> Option<[String; YEAR_COUNT]> {
        match &self.kind {
            RowKind::Amounts(values) => Some(values.map(format_compact)),
            RowKind::Percentages(values) => Some(values.map(format_percent)),
            RowKind::Heading | RowKind::Blank => None,
        }
    }
}

/// A fixed five-year financial statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancialStatementTable {
    /// Statement kind.
    pub kind: StatementKind,
    /// Table title (first header cell).
    pub title: String,
    /// Year column labels.
    pub year_labels: [String; YEAR_COUNT],
    /// Rows in display order.
    pub rows: Vec<StatementRow>,
}

impl FinancialStatementTable {
    /// Amounts of the row with `label`.
    #[must_use]
    pub fn amounts(&self, label: &str) -> Option<&YearValues> {
        self.rows.iter().find_map(|row| match &row.kind {
            RowKind::Amounts(values) if row.label == label => Some(values),
            _ => None,
        })
    }

    /// Amounts of the first row whose label starts with `prefix`.
    #[must_use]
    pub fn amounts_starting_with(&self, prefix: &str) -> Option<&YearValues> {
        self.rows.iter().find_map(|row| match &row.kind {
            RowKind::Amounts(values) if row.label.starts_with(prefix) => Some(values),
            _ => None,
        })
    }

    /// Renders the table as aligned plain-text lines for prose layouts.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        const LABEL_WIDTH: usize = 28;
        const VALUE_WIDTH: usize = 11;

        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        let mut header = format!("{:<LABEL_WIDTH$}", self.title);
        for year in &self.year_labels {
            header.push_str(&format!("{year:>VALUE_WIDTH$}"));
        }
        lines.push(header);

        for row in &self.rows {
            let line = match row.formatted_values() {
                Some(values) => {
                    let mut line = format!("{:<LABEL_WIDTH$}", row.label);
                    for value in values {
                        line.push_str(&format!("{value:>VALUE_WIDTH$}"));
                    }
                    line
                }
                None => row.label.clone(),
            };
            lines.push(line);
        }
        lines
    }
}
