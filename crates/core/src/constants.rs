//! Endpoints and fixed parameters of the dashboard.

use rust_decimal::Decimal;

pub const STOCKS_ENDPOINT: &str = "/api/stocks";
pub const BONDS_ENDPOINT: &str = "/api/bonds";
pub const FUNDS_ENDPOINT: &str = "/api/funds";
pub const FINANCIAL_ENDPOINT_PREFIX: &str = "/api/stocks/financial";
pub const REPORT_ENDPOINT: &str = "/api/report/generate";

/// Filename under which the generated report is delivered.
pub const REPORT_FILENAME: &str = "financial-analysis-report.pdf";

/// Decimal places kept on every rounded metric.
pub const METRIC_DECIMAL_PLACES: u32 = 2;

/// Assumed cost of equity (10%).
pub const EQUITY_COST: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Assumed cost of debt (5%).
pub const DEBT_COST: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// Assumed income tax rate (25%).
pub const TAX_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Path of the financial statement endpoint for one company.
pub fn financial_endpoint(code: &str) -> String {
    format!("{}/{}", FINANCIAL_ENDPOINT_PREFIX, urlencoding::encode(code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cost_constants() {
        assert_eq!(EQUITY_COST, dec!(0.10));
        assert_eq!(DEBT_COST, dec!(0.05));
        assert_eq!(TAX_RATE, dec!(0.25));
    }

    #[test]
    fn test_financial_endpoint_encodes_code() {
        assert_eq!(financial_endpoint("600519"), "/api/stocks/financial/600519");
        assert_eq!(financial_endpoint(" BRK.B "), "/api/stocks/financial/BRK.B");
        assert_eq!(financial_endpoint("A/B"), "/api/stocks/financial/A%2FB");
    }
}
