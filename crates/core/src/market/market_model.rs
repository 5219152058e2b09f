//! Market quote models and their wire shapes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Domain model for a stock quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    /// Percentage change of the current session.
    pub change: Decimal,
}

/// Domain model for a bond quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bond {
    pub code: String,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "yield")]
    pub yield_rate: Decimal,
}

/// Domain model for a fund quote
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    pub code: String,
    pub name: String,
    /// Net asset value per unit.
    pub nav: Decimal,
    #[serde(rename = "type")]
    pub fund_type: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire shapes returned by the backend
// ─────────────────────────────────────────────────────────────────────────────

/// Row of `GET /api/stocks`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStock {
    pub symbol: String,
    pub name: String,
    pub current_price: Decimal,
    pub change_percent: Decimal,
}

/// Row of `GET /api/bonds`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiBond {
    pub bond_code: String,
    pub bond_name: String,
    pub price: Decimal,
    #[serde(rename = "yield")]
    pub yield_rate: Decimal,
}

/// Row of `GET /api/funds`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFund {
    pub fund_code: String,
    pub fund_name: String,
    pub net_asset_value: Decimal,
    pub fund_type: String,
}

impl From<ApiStock> for Stock {
    fn from(row: ApiStock) -> Self {
        Self {
            code: row.symbol,
            name: row.name,
            price: row.current_price,
            change: row.change_percent,
        }
    }
}

impl From<ApiBond> for Bond {
    fn from(row: ApiBond) -> Self {
        Self {
            code: row.bond_code,
            name: row.bond_name,
            price: row.price,
            yield_rate: row.yield_rate,
        }
    }
}

impl From<ApiFund> for Fund {
    fn from(row: ApiFund) -> Self {
        Self {
            code: row.fund_code,
            name: row.fund_name,
            nav: row.net_asset_value,
            fund_type: row.fund_type,
        }
    }
}

/// Stock with the highest change, first one wins on ties.
pub fn top_gainer(stocks: &[Stock]) -> Option<&Stock> {
    stocks
        .iter()
        .reduce(|best, stock| if stock.change > best.change { stock } else { best })
}

/// Bond with the highest yield, first one wins on ties.
pub fn highest_yield_bond(bonds: &[Bond]) -> Option<&Bond> {
    bonds
        .iter()
        .reduce(|best, bond| if bond.yield_rate > best.yield_rate { bond } else { best })
}
