//! Statement derivation and the model library.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use super::types::{FinancialStatementTable, StatementRow, YEAR_COUNT, YearValues, labels};
use crate::catalog::{SectionName, StatementKind};

/// Base income statement rows. Costs are negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeStatementInputs {
    /// Revenue.
    pub revenue: YearValues,
    /// Cost of revenue.
    pub cost_of_revenue: YearValues,
    /// Operating expenses.
    pub operating_expenses: YearValues,
    /// Depreciation and amortization.
    pub depreciation_amortization: YearValues,
    /// Interest expense.
    pub interest_expense: YearValues,
    /// Tax rate as a fraction (0.25 = 25%).
    pub tax_rate: Decimal,
}

/// Base balance sheet rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheetInputs {
    /// Cash and equivalents.
    pub cash: YearValues,
    /// Accounts receivable.
    pub receivables: YearValues,
    /// Inventory.
    pub inventory: YearValues,
    /// PP&E, net.
    pub ppe: YearValues,
    /// Intangible assets.
    pub intangibles: YearValues,
    /// Accounts payable.
    pub payables: YearValues,
    /// Accrued expenses.
    pub accrued: YearValues,
    /// Current debt.
    pub current_debt: YearValues,
    /// Long-term debt.
    pub long_term_debt: YearValues,
}

/// Base cash flow rows; net income and D&A come from the income statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFlowInputs {
    /// Working capital changes.
    pub working_capital_changes: YearValues,
    /// Capital expenditure (negative).
    pub capex: YearValues,
    /// Debt repayment (negative).
    pub debt_repayment: YearValues,
    /// Dividends (negative).
    pub dividends: YearValues,
}

/// Everything needed to build the three statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInputs {
    /// Year column labels.
    pub year_labels: [String; YEAR_COUNT],
    /// Income statement base rows.
    pub income: IncomeStatementInputs,
    /// Balance sheet base rows.
    pub balance: BalanceSheetInputs,
    /// Cash flow base rows.
    pub cash_flow: CashFlowInputs,
}

impl ModelInputs {
    /// Fixed projection used for every generated model.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            year_labels: ["FY2022", "FY2023", "FY2024E", "FY2025E", "FY2026E"].map(String::from),
            income: IncomeStatementInputs {
                revenue: [
                    dec!(165_000_000),
                    dec!(198_000_000),
                    dec!(250_000_000),
                    dec!(312_500_000),
                    dec!(390_625_000),
                ],
                cost_of_revenue: [
                    dec!(-57_750_000),
                    dec!(-69_300_000),
                    dec!(-87_500_000),
                    dec!(-109_375_000),
                    dec!(-136_718_750),
                ],
                operating_expenses: [
                    dec!(-77_550_000),
                    dec!(-89_100_000),
                    dec!(-107_500_000),
                    dec!(-128_125_000),
                    dec!(-152_343_750),
                ],
                depreciation_amortization: [
                    dec!(-8_250_000),
                    dec!(-9_900_000),
                    dec!(-12_500_000),
                    dec!(-15_625_000),
                    dec!(-19_531_250),
                ],
                interest_expense: [dec!(-4_500_000); YEAR_COUNT],
                tax_rate: dec!(0.25),
            },
            balance: BalanceSheetInputs {
                cash: [
                    dec!(25_000_000),
                    dec!(35_000_000),
                    dec!(50_000_000),
                    dec!(75_000_000),
                    dec!(110_000_000),
                ],
                receivables: [
                    dec!(27_500_000),
                    dec!(33_000_000),
                    dec!(41_667_000),
                    dec!(52_083_000),
                    dec!(65_104_000),
                ],
                inventory: [
                    dec!(15_000_000),
                    dec!(18_000_000),
                    dec!(22_500_000),
                    dec!(28_125_000),
                    dec!(35_156_000),
                ],
                ppe: [
                    dec!(45_000_000),
                    dec!(52_000_000),
                    dec!(60_000_000),
                    dec!(70_000_000),
                    dec!(82_000_000),
                ],
                intangibles: [
                    dec!(30_000_000),
                    dec!(28_000_000),
                    dec!(26_000_000),
                    dec!(24_000_000),
                    dec!(22_000_000),
                ],
                payables: [
                    dec!(12_000_000),
                    dec!(14_400_000),
                    dec!(18_000_000),
                    dec!(22_500_000),
                    dec!(28_125_000),
                ],
                accrued: [
                    dec!(8_000_000),
                    dec!(9_600_000),
                    dec!(12_000_000),
                    dec!(15_000_000),
                    dec!(18_750_000),
                ],
                current_debt: [dec!(10_000_000); YEAR_COUNT],
                long_term_debt: [dec!(65_000_000); YEAR_COUNT],
            },
            cash_flow: CashFlowInputs {
                working_capital_changes: [
                    dec!(-3_000_000),
                    dec!(-4_500_000),
                    dec!(-6_000_000),
                    dec!(-7_500_000),
                    dec!(-9_000_000),
                ],
                capex: [
                    dec!(-12_000_000),
                    dec!(-15_000_000),
                    dec!(-18_000_000),
                    dec!(-22_000_000),
                    dec!(-26_000_000),
                ],
                debt_repayment: [
                    dec!(-5_000_000),
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                    Decimal::ZERO,
                ],
                dividends: [
                    dec!(-2_000_000),
                    dec!(-2_000_000),
                    dec!(-2_000_000),
                    dec!(-2_281_250),
                    dec!(-7_679_688),
                ],
            },
        }
    }
}

/// Income statement with derived rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeStatement {
    /// Base rows.
    pub inputs: IncomeStatementInputs,
    /// Revenue + cost of revenue.
    pub gross_profit: YearValues,
    /// Gross profit / revenue, in percent.
    pub gross_margin: YearValues,
    /// Gross profit + operating expenses.
    pub ebitda: YearValues,
    /// EBITDA / revenue, in percent.
    pub ebitda_margin: YearValues,
    /// EBITDA + D&A.
    pub ebit: YearValues,
    /// EBIT + interest expense.
    pub ebt: YearValues,
    /// Tax charge (negative for a profit).
    pub taxes: YearValues,
    /// EBT + taxes.
    pub net_income: YearValues,
}

impl IncomeStatement {
    /// Derives every computed row from the base rows.
    ///
    /// Taxes are rounded to whole units with banker's rounding before net
    /// income is taken, so the displayed rows reconcile exactly.
    #[must_use]
    pub fn derive(inputs: IncomeStatementInputs) -> Self {
        let gross_profit = add(&inputs.revenue, &inputs.cost_of_revenue);
        let ebitda = add(&gross_profit, &inputs.operating_expenses);
        let ebit = add(&ebitda, &inputs.depreciation_amortization);
        let ebt = add(&ebit, &inputs.interest_expense);
        let taxes = ebt.map(|value| {
            -(value * inputs.tax_rate)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        });
        let net_income = add(&ebt, &taxes);
        let gross_margin = margin(&gross_profit, &inputs.revenue);
        let ebitda_margin = margin(&ebitda, &inputs.revenue);

        Self {
            inputs,
            gross_profit,
            gross_margin,
            ebitda,
            ebitda_margin,
            ebit,
            ebt,
            taxes,
            net_income,
        }
    }

    fn taxes_label(&self) -> String {
        let pct = (self.inputs.tax_rate * Decimal::ONE_HUNDRED).normalize();
        format!("{} ({pct}%)", labels::TAXES)
    }

    /// Builds the display table.
    #[must_use]
    pub fn to_table(&self, year_labels: &[String; YEAR_COUNT]) -> FinancialStatementTable {
        let i = &self.inputs;
        FinancialStatementTable {
            kind: StatementKind::IncomeStatement,
            title: "Income Statement".to_string(),
            year_labels: year_labels.clone(),
            rows: vec![
                StatementRow::amounts(labels::REVENUE, i.revenue),
                StatementRow::amounts(labels::COST_OF_REVENUE, i.cost_of_revenue),
                StatementRow::amounts(labels::GROSS_PROFIT, self.gross_profit),
                StatementRow::percentages(labels::GROSS_MARGIN, self.gross_margin),
                StatementRow::blank(),
                StatementRow::amounts(labels::OPERATING_EXPENSES, i.operating_expenses),
                StatementRow::amounts(labels::EBITDA, self.ebitda),
                StatementRow::percentages(labels::EBITDA_MARGIN, self.ebitda_margin),
                StatementRow::blank(),
                StatementRow::amounts(labels::DEPRECIATION_AMORTIZATION, i.depreciation_amortization),
                StatementRow::amounts(labels::EBIT, self.ebit),
                StatementRow::amounts(labels::INTEREST_EXPENSE, i.interest_expense),
                StatementRow::amounts(labels::EBT, self.ebt),
                StatementRow::amounts(&self.taxes_label(), self.taxes),
                StatementRow::amounts(labels::NET_INCOME, self.net_income),
            ],
        }
    }
}

/// Balance sheet with derived totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSheet {
    /// Base rows.
    pub inputs: BalanceSheetInputs,
    /// Cash + receivables + inventory.
    pub total_current_assets: YearValues,
    /// Current assets + PP&E + intangibles.
    pub total_assets: YearValues,
    /// Payables + accrued + current debt.
    pub total_current_liabilities: YearValues,
    /// Current liabilities + long-term debt.
    pub total_liabilities: YearValues,
    /// Total assets - total liabilities.
    pub equity: YearValues,
    /// Total liabilities + equity.
    pub total_liabilities_and_equity: YearValues,
}

impl BalanceSheet {
    /// Derives the totals; equity is the residual so the sheet balances.
    #[must_use]
    pub fn derive(inputs: BalanceSheetInputs) -> Self {
        let total_current_assets = add(&add(&inputs.cash, &inputs.receivables), &inputs.inventory);
        let total_assets = add(&add(&total_current_assets, &inputs.ppe), &inputs.intangibles);
        let total_current_liabilities =
            add(&add(&inputs.payables, &inputs.accrued), &inputs.current_debt);
        let total_liabilities = add(&total_current_liabilities, &inputs.long_term_debt);
        let equity = sub(&total_assets, &total_liabilities);
        let total_liabilities_and_equity = add(&total_liabilities, &equity);

        Self {
            inputs,
            total_current_assets,
            total_assets,
            total_current_liabilities,
            total_liabilities,
            equity,
            total_liabilities_and_equity,
        }
    }

    /// Builds the display table.
    #[must_use]
    pub fn to_table(&self, year_labels: &[String; YEAR_COUNT]) -> FinancialStatementTable {
        let i = &self.inputs;
        FinancialStatementTable {
            kind: StatementKind::BalanceSheet,
            title: "Balance Sheet".to_string(),
            year_labels: year_labels.clone(),
            rows: vec![
                StatementRow::heading(labels::ASSETS),
                StatementRow::amounts(labels::CASH, i.cash),
                StatementRow::amounts(labels::RECEIVABLES, i.receivables),
                StatementRow::amounts(labels::INVENTORY, i.inventory),
                StatementRow::amounts(labels::TOTAL_CURRENT_ASSETS, self.total_current_assets),
                StatementRow::blank(),
                StatementRow::amounts(labels::PPE, i.ppe),
                StatementRow::amounts(labels::INTANGIBLES, i.intangibles),
                StatementRow::amounts(labels::TOTAL_ASSETS, self.total_assets),
                StatementRow::blank(),
                StatementRow::heading(labels::LIABILITIES),
                StatementRow::amounts(labels::PAYABLES, i.payables),
                StatementRow::amounts(labels::ACCRUED, i.accrued),
                StatementRow::amounts(labels::CURRENT_DEBT, i.current_debt),
                StatementRow::amounts(
                    labels::TOTAL_CURRENT_LIABILITIES,
                    self.total_current_liabilities,
                ),
                StatementRow::amounts(labels::LONG_TERM_DEBT, i.long_term_debt),
                StatementRow::amounts(labels::TOTAL_LIABILITIES, self.total_liabilities),
                StatementRow::blank(),
                StatementRow::amounts(labels::EQUITY, self.equity),
                StatementRow::amounts(
                    labels::TOTAL_LIABILITIES_AND_EQUITY,
                    self.total_liabilities_and_equity,
                ),
            ],
        }
    }
}

/// Cash flow statement linked to the income statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CashFlowStatement {
    /// Base rows.
    pub inputs: CashFlowInputs,
    /// Net income from the income statement.
    pub net_income: YearValues,
    /// D&A add-back (positive).
    pub depreciation_amortization: YearValues,
    /// Net income + D&A + working capital changes.
    pub cash_from_operations: YearValues,
    /// CapEx.
    pub cash_from_investing: YearValues,
    /// Debt repayment + dividends.
    pub cash_from_financing: YearValues,
    /// CFO + CFI + CFF.
    pub net_change_in_cash: YearValues,
}

impl CashFlowStatement {
    /// Derives the cash flow from its inputs and the income statement.
    #[must_use]
    pub fn derive(inputs: CashFlowInputs, income: &IncomeStatement) -> Self {
        let net_income = income.net_income;
        let depreciation_amortization = income.inputs.depreciation_amortization.map(|v| -v);
        let cash_from_operations = add(
            &add(&net_income, &depreciation_amortization),
            &inputs.working_capital_changes,
        );
        let cash_from_investing = inputs.capex;
        let cash_from_financing = add(&inputs.debt_repayment, &inputs.dividends);
        let net_change_in_cash = add(
            &add(&cash_from_operations, &cash_from_investing),
            &cash_from_financing,
        );

        Self {
            inputs,
            net_income,
            depreciation_amortization,
            cash_from_operations,
            cash_from_investing,
            cash_from_financing,
            net_change_in_cash,
        }
    }

    /// Builds the display table.
    #[must_use]
    pub fn to_table(&self, year_labels: &[String; YEAR_COUNT]) -> FinancialStatementTable {
        let i = &self.inputs;
        FinancialStatementTable {
            kind: StatementKind::CashFlow,
            title: "Cash Flow Statement".to_string(),
            year_labels: year_labels.clone(),
            rows: vec![
                StatementRow::heading(labels::OPERATING_ACTIVITIES),
                StatementRow::amounts(labels::NET_INCOME, self.net_income),
                StatementRow::amounts(
                    labels::DEPRECIATION_AMORTIZATION,
                    self.depreciation_amortization,
                ),
                StatementRow::amounts(labels::WORKING_CAPITAL, i.working_capital_changes),
                StatementRow::amounts(labels::CASH_FROM_OPERATIONS, self.cash_from_operations),
                StatementRow::blank(),
                StatementRow::heading(labels::INVESTING_ACTIVITIES),
                StatementRow::amounts(labels::CAPEX, i.capex),
                StatementRow::amounts(labels::CASH_FROM_INVESTING, self.cash_from_investing),
                StatementRow::blank(),
                StatementRow::heading(labels::FINANCING_ACTIVITIES),
                StatementRow::amounts(labels::DEBT_REPAYMENT, i.debt_repayment),
                StatementRow::amounts(labels::DIVIDENDS, i.dividends),
                StatementRow::amounts(labels::CASH_FROM_FINANCING, self.cash_from_financing),
                StatementRow::blank(),
                StatementRow::amounts(labels::NET_CHANGE_IN_CASH, self.net_change_in_cash),
            ],
        }
    }
}

/// Immutable set of statement tables keyed by statement kind.
#[derive(Debug, Clone)]
pub struct FinancialModelLibrary {
    income_statement: FinancialStatementTable,
    balance_sheet: FinancialStatementTable,
    cash_flow: FinancialStatementTable,
}

impl FinancialModelLibrary {
    /// Builds the tables from base inputs.
    #[must_use]
    pub fn from_inputs(inputs: ModelInputs) -> Self {
        let income = IncomeStatement::derive(inputs.income);
        let balance = BalanceSheet::derive(inputs.balance);
        let cash_flow = CashFlowStatement::derive(inputs.cash_flow, &income);

        Self {
            income_statement: income.to_table(&inputs.year_labels),
            balance_sheet: balance.to_table(&inputs.year_labels),
            cash_flow: cash_flow.to_table(&inputs.year_labels),
        }
    }

    /// Library built from [`ModelInputs::standard`].
    #[must_use]
    pub fn standard() -> Self {
        Self::from_inputs(ModelInputs::standard())
    }

    /// Table for a statement kind.
    #[must_use]
    pub const fn table(&self, kind: StatementKind) -> &FinancialStatementTable {
        match kind {
            StatementKind::IncomeStatement => &self.income_statement,
            StatementKind::BalanceSheet => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow,
        }
    }

    /// Table for a reserved section name; `None` for every other section.
    #[must_use]
    pub fn table_for(&self, section: &SectionName) -> Option<&FinancialStatementTable> {
        section.statement().map(|kind| self.table(kind))
    }
}

impl Default for FinancialModelLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

fn add(a: &YearValues, b: &YearValues) -> YearValues {
    std::array::from_fn(|i| a[i] + b[i])
}

fn sub(a: &YearValues, b: &YearValues) -> YearValues {
    std::array::from_fn(|i| a[i] - b[i])
}

fn margin(numerator: &YearValues, revenue: &YearValues) -> YearValues {
    std::array::from_fn(|i| {
        if revenue[i].is_zero() {
            Decimal::ZERO
        } else {
            (numerator[i] * Decimal::ONE_HUNDRED / revenue[i])
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        }
    })
}
