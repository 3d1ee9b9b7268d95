//! Property-based tests for the statement identities.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::library::{
    BalanceSheet, BalanceSheetInputs, CashFlowInputs, CashFlowStatement, IncomeStatement,
    IncomeStatementInputs,
};
use super::types::{YEAR_COUNT, YearValues};

/// Whole-unit amounts between 0 and 1,000,000,000.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(Decimal::from)
}

fn positive_years() -> impl Strategy<Value = YearValues> {
    prop::array::uniform5(amount())
}

fn negative_years() -> impl Strategy<Value = YearValues> {
    positive_years().prop_map(|values| values.map(|v| -v))
}

/// Tax rates from 0% to 50% in whole percents.
fn tax_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=50i64).prop_map(|pct| Decimal::new(pct, 2))
}

fn income_inputs() -> impl Strategy<Value = IncomeStatementInputs> {
    (
        positive_years(),
        negative_years(),
        negative_years(),
        negative_years(),
        negative_years(),
        tax_rate(),
    )
        .prop_map(
            |(revenue, cost_of_revenue, operating_expenses, depreciation_amortization, interest_expense, tax_rate)| {
                IncomeStatementInputs {
                    revenue,
                    cost_of_revenue,
                    operating_expenses,
                    depreciation_amortization,
                    interest_expense,
                    tax_rate,
                }
            },
        )
}

fn balance_inputs() -> impl Strategy<Value = BalanceSheetInputs> {
    (
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
        positive_years(),
    )
        .prop_map(
            |(cash, receivables, inventory, ppe, intangibles, payables, accrued, current_debt, long_term_debt)| {
                BalanceSheetInputs {
                    cash,
                    receivables,
                    inventory,
                    ppe,
                    intangibles,
                    payables,
                    accrued,
                    current_debt,
                    long_term_debt,
                }
            },
        )
}

fn cash_flow_inputs() -> impl Strategy<Value = CashFlowInputs> {
    (negative_years(), negative_years(), negative_years(), negative_years()).prop_map(
        |(working_capital_changes, capex, debt_repayment, dividends)| CashFlowInputs {
            working_capital_changes,
            capex,
            debt_repayment,
            dividends,
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every derived income statement row is the sum of the rows above it.
    #[test]
    fn prop_income_statement_chain(inputs in income_inputs()) {
        let statement = IncomeStatement::derive(inputs.clone());
        for year in 0..YEAR_COUNT {
            prop_assert_eq!(
                statement.gross_profit[year],
                inputs.revenue[year] + inputs.cost_of_revenue[year]
            );
            prop_assert_eq!(
                statement.ebitda[year],
                statement.gross_profit[year] + inputs.operating_expenses[year]
            );
            prop_assert_eq!(
                statement.ebit[year],
                statement.ebitda[year] + inputs.depreciation_amortization[year]
            );
            prop_assert_eq!(
                statement.ebt[year],
                statement.ebit[year] + inputs.interest_expense[year]
            );
            prop_assert_eq!(
                statement.net_income[year],
                statement.ebt[year] + statement.taxes[year]
            );
        }
    }

    /// Taxes are whole units within half a unit of EBT times the rate.
    #[test]
    fn prop_taxes_are_rounded_rate(inputs in income_inputs()) {
        let statement = IncomeStatement::derive(inputs.clone());
        for year in 0..YEAR_COUNT {
            let exact = -(statement.ebt[year] * inputs.tax_rate);
            let taxes = statement.taxes[year];
            prop_assert_eq!(taxes, taxes.trunc());
            prop_assert!((taxes - exact).abs() <= Decimal::new(5, 1));
        }
    }

    /// The balance sheet always balances.
    #[test]
    fn prop_balance_sheet_balances(inputs in balance_inputs()) {
        let sheet = BalanceSheet::derive(inputs);
        for year in 0..YEAR_COUNT {
            prop_assert_eq!(
                sheet.total_assets[year],
                sheet.total_liabilities[year] + sheet.equity[year]
            );
            prop_assert_eq!(sheet.total_assets[year], sheet.total_liabilities_and_equity[year]);
        }
    }

    /// Net change in cash is CFO + CFI + CFF and links to the income statement.
    #[test]
    fn prop_cash_flow_reconciles(income in income_inputs(), inputs in cash_flow_inputs()) {
        let income = IncomeStatement::derive(income);
        let cash_flow = CashFlowStatement::derive(inputs, &income);
        for year in 0..YEAR_COUNT {
            prop_assert_eq!(cash_flow.net_income[year], income.net_income[year]);
            prop_assert_eq!(
                cash_flow.depreciation_amortization[year],
                -income.inputs.depreciation_amortization[year]
            );
            prop_assert_eq!(
                cash_flow.net_change_in_cash[year],
                cash_flow.cash_from_operations[year]
                    + cash_flow.cash_from_investing[year]
                    + cash_flow.cash_from_financing[year]
            );
        }
    }
}
