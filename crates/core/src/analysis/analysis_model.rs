//! Financial analysis domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Error, Result};
use crate::messages::Locale;

pub const NET_PROFIT: &str = "netProfit";
pub const SHAREHOLDER_EQUITY: &str = "shareholderEquity";
pub const TOTAL_LIABILITIES: &str = "totalLiabilities";
pub const TOTAL_ASSETS: &str = "totalAssets";
pub const DIVIDEND_PAYMENT: &str = "dividendPayment";
pub const OPERATING_CASH_FLOW: &str = "operatingCashFlow";
pub const LONG_TERM_DEBT: &str = "longTermDebt";

/// Financial statement figures of one company.
///
/// Built from the open-ended backend payload by [`FinancialData::from_payload`].
/// Known figures are typed; anything else the backend sent is kept in `extra`
/// so it can travel back with the report request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net_profit: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shareholder_equity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_liabilities: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_assets: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_payment: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operating_cash_flow: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_term_debt: Option<Decimal>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl FinancialData {
    /// Validate a backend payload.
    ///
    /// Missing or `null` figures become `None`. Numbers and numeric strings
    /// are accepted; any other value for a known figure is rejected.
    pub fn from_payload(payload: Value) -> Result<Self> {
        let Value::Object(mut map) = payload else {
            return Err(Error::invalid_input("financial data must be a JSON object"));
        };

        Ok(Self {
            net_profit: take_figure(&mut map, NET_PROFIT)?,
            shareholder_equity: take_figure(&mut map, SHAREHOLDER_EQUITY)?,
            total_liabilities: take_figure(&mut map, TOTAL_LIABILITIES)?,
            total_assets: take_figure(&mut map, TOTAL_ASSETS)?,
            dividend_payment: take_figure(&mut map, DIVIDEND_PAYMENT)?,
            operating_cash_flow: take_figure(&mut map, OPERATING_CASH_FLOW)?,
            long_term_debt: take_figure(&mut map, LONG_TERM_DEBT)?,
            extra: map.into_iter().collect(),
        })
    }
}

fn take_figure(map: &mut Map<String, Value>, field: &str) -> Result<Option<Decimal>> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => parse_decimal(&number.to_string())
            .map(Some)
            .ok_or_else(|| Error::invalid_input(format!("{} is out of range: {}", field, number))),
        Some(Value::String(raw)) => parse_decimal(raw.trim())
            .map(Some)
            .ok_or_else(|| Error::invalid_input(format!("{} is not numeric: '{}'", field, raw))),
        Some(other) => Err(Error::invalid_input(format!(
            "{} is not numeric: {}",
            field, other
        ))),
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Three-tier investment recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvestmentDecision {
    Suitable,
    Cautious,
    #[serde(rename = "not recommended")]
    NotRecommended,
}

impl InvestmentDecision {
    /// Text shown to the user.
    pub fn label(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::English, Self::Suitable) => "Recommendation: suitable for investment",
            (Locale::English, Self::Cautious) => "Recommendation: invest with caution",
            (Locale::English, Self::NotRecommended) => "Recommendation: not recommended for now",
            (Locale::Chinese, Self::Suitable) => "投资建议：适合投资",
            (Locale::Chinese, Self::Cautious) => "投资建议：谨慎投资",
            (Locale::Chinese, Self::NotRecommended) => "投资建议：暂不建议投资",
        }
    }
}

impl fmt::Display for InvestmentDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suitable => write!(f, "suitable"),
            Self::Cautious => write!(f, "cautious"),
            Self::NotRecommended => write!(f, "not recommended"),
        }
    }
}

/// Ratios derived from one [`FinancialData`]. Percentages are rounded to
/// two decimals; `wacc` is a rounded fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMetrics {
    /// Return on equity, percent.
    pub roe: Decimal,
    /// Total liabilities over total assets, percent.
    pub debt_ratio: Decimal,
    /// Dividend payout ratio, percent.
    pub dividend: Decimal,
    /// Operating cash flow as reported.
    pub cash_flow: Decimal,
    pub investment_decision: InvestmentDecision,
    /// Long-term debt over long-term debt plus equity, percent.
    pub capital_structure: Decimal,
    pub wacc: Decimal,
}

/// Body of `POST /api/report/generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest<'a> {
    pub metrics: &'a FinancialMetrics,
    pub financial_data: Option<&'a FinancialData>,
}
