//! Pure computation of [`FinancialMetrics`] from [`FinancialData`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::analysis::analysis_model::{
    FinancialData, FinancialMetrics, InvestmentDecision, DIVIDEND_PAYMENT, LONG_TERM_DEBT,
    NET_PROFIT, OPERATING_CASH_FLOW, SHAREHOLDER_EQUITY, TOTAL_ASSETS, TOTAL_LIABILITIES,
};
use crate::constants::{DEBT_COST, EQUITY_COST, METRIC_DECIMAL_PLACES, TAX_RATE};
use crate::errors::{Error, Result};

/// ROE above which a company can be rated suitable.
const SUITABLE_MIN_ROE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);
/// Debt ratio below which a company can be rated suitable.
const SUITABLE_MAX_DEBT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);
const CAUTIOUS_MIN_ROE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
const CAUTIOUS_MAX_DEBT: Decimal = Decimal::from_parts(7, 0, 0, false, 1);

/// Compute every metric for `data`.
///
/// Fails with [`Error::InvalidInput`] when a required figure is missing or a
/// denominator is zero; no metric is produced in that case.
pub fn calculate_metrics(data: &FinancialData) -> Result<FinancialMetrics> {
    let net_profit = required(data.net_profit, NET_PROFIT)?;
    let equity = required(data.shareholder_equity, SHAREHOLDER_EQUITY)?;
    let liabilities = required(data.total_liabilities, TOTAL_LIABILITIES)?;
    let assets = required(data.total_assets, TOTAL_ASSETS)?;
    let dividend_payment = required(data.dividend_payment, DIVIDEND_PAYMENT)?;
    let cash_flow = required(data.operating_cash_flow, OPERATING_CASH_FLOW)?;
    let long_term_debt = required(data.long_term_debt, LONG_TERM_DEBT)?;

    let roe = ratio(net_profit, equity, SHAREHOLDER_EQUITY)?;
    let debt_ratio = ratio(liabilities, assets, TOTAL_ASSETS)?;
    let payout = ratio(dividend_payment, net_profit, NET_PROFIT)?;
    let capital_base = checked(long_term_debt.checked_add(equity), "longTermDebt + shareholderEquity")?;
    let capital_structure = ratio(long_term_debt, capital_base, "longTermDebt + shareholderEquity")?;

    Ok(FinancialMetrics {
        roe: percent(roe)?,
        debt_ratio: percent(debt_ratio)?,
        dividend: percent(payout)?,
        cash_flow,
        investment_decision: evaluate_investment(roe, debt_ratio, cash_flow),
        capital_structure: percent(capital_structure)?,
        wacc: round_metric(calculate_wacc(equity, assets)?),
    })
}

/// Classify from unrounded fractions (0.15 means 15%).
pub fn evaluate_investment(roe: Decimal, debt_ratio: Decimal, cash_flow: Decimal) -> InvestmentDecision {
    let positive_cash = cash_flow > Decimal::ZERO;
    if roe > SUITABLE_MIN_ROE && debt_ratio < SUITABLE_MAX_DEBT && positive_cash {
        InvestmentDecision::Suitable
    } else if roe > CAUTIOUS_MIN_ROE && debt_ratio < CAUTIOUS_MAX_DEBT && positive_cash {
        InvestmentDecision::Cautious
    } else {
        InvestmentDecision::NotRecommended
    }
}

/// Weighted average cost of capital as an unrounded fraction.
///
/// Equity is weighted by `equity / assets`, debt by the remainder, with the
/// fixed equity cost, debt cost and tax rate.
pub fn calculate_wacc(equity: Decimal, assets: Decimal) -> Result<Decimal> {
    let equity_ratio = ratio(equity, assets, TOTAL_ASSETS)?;
    let debt_ratio = checked(Decimal::ONE.checked_sub(equity_ratio), "wacc")?;
    let after_tax_debt_cost = DEBT_COST * (Decimal::ONE - TAX_RATE);

    let equity_part = checked(EQUITY_COST.checked_mul(equity_ratio), "wacc")?;
    let debt_part = checked(after_tax_debt_cost.checked_mul(debt_ratio), "wacc")?;
    checked(equity_part.checked_add(debt_part), "wacc")
}

/// Round half away from zero to the metric precision.
pub fn round_metric(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(METRIC_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

fn required(value: Option<Decimal>, field: &str) -> Result<Decimal> {
    value.ok_or_else(|| Error::invalid_input(format!("{} is missing", field)))
}

fn ratio(numerator: Decimal, denominator: Decimal, denominator_name: &str) -> Result<Decimal> {
    if denominator.is_zero() {
        return Err(Error::invalid_input(format!("{} is zero", denominator_name)));
    }
    checked(numerator.checked_div(denominator), denominator_name)
}

fn percent(fraction: Decimal) -> Result<Decimal> {
    checked(fraction.checked_mul(Decimal::ONE_HUNDRED), "percentage").map(round_metric)
}

fn checked(value: Option<Decimal>, what: &str) -> Result<Decimal> {
    value.ok_or_else(|| Error::invalid_input(format!("{} is out of range", what)))
}
