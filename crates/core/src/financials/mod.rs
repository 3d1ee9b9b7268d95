//! Financial statement tables.
//!
//! The three reserved sections (income statement, balance sheet, cash flow)
//! are rendered from fixed five-year tables. Computed rows are derived from
//! base inputs so the accounting identities hold by construction:
//!
//! - Gross Profit = Revenue + Cost of Revenue
//! - EBITDA = Gross Profit + Operating Expenses
//! - EBIT = EBITDA + D&A
//! - EBT = EBIT + Interest Expense
//! - Net Income = EBT + Taxes
//! - Total Assets = Total Liabilities + Equity
//! - Net Change in Cash = CFO + CFI + CFF
//!
//! Costs are stored as negative amounts.

pub mod library;
pub mod types;

#[cfg(test)]
mod props;

pub use library::{
    BalanceSheet, BalanceSheetInputs, CashFlowInputs, CashFlowStatement, FinancialModelLibrary,
    IncomeStatement, IncomeStatementInputs, ModelInputs,
};
pub use types::{FinancialStatementTable, RowKind, StatementRow, YEAR_COUNT, YearValues, labels};
