//! Static user-visible messages in the supported locales.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Language of the messages written into container `error` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-CN")]
    Chinese,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Locale::English),
            "zh" | "zh-cn" | "zh-hans" | "chinese" => Ok(Locale::Chinese),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::English => write!(f, "en"),
            Locale::Chinese => write!(f, "zh-CN"),
        }
    }
}

/// Every static message a container can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    FetchStocksFailed,
    FetchBondsFailed,
    FetchFundsFailed,
    FetchFinancialDataFailed,
    InvalidFinancialData,
    GenerateReportFailed,
}

impl Locale {
    pub fn text(self, message: Message) -> &'static str {
        match (self, message) {
            (Locale::English, Message::FetchStocksFailed) => "Failed to load stock quotes",
            (Locale::English, Message::FetchBondsFailed) => "Failed to load bond quotes",
            (Locale::English, Message::FetchFundsFailed) => "Failed to load fund quotes",
            (Locale::English, Message::FetchFinancialDataFailed) => "Failed to load financial data",
            (Locale::English, Message::InvalidFinancialData) => {
                "Financial data is incomplete and cannot be analyzed"
            }
            (Locale::English, Message::GenerateReportFailed) => "Failed to generate report",
            (Locale::Chinese, Message::FetchStocksFailed) => "获取股票数据失败",
            (Locale::Chinese, Message::FetchBondsFailed) => "获取债券数据失败",
            (Locale::Chinese, Message::FetchFundsFailed) => "获取基金数据失败",
            (Locale::Chinese, Message::FetchFinancialDataFailed) => "获取财务数据失败",
            (Locale::Chinese, Message::InvalidFinancialData) => "财务数据不完整，无法分析",
            (Locale::Chinese, Message::GenerateReportFailed) => "生成报告失败",
        }
    }

    /// Static prefix followed by the failure detail, when there is one.
    pub fn with_detail(self, message: Message, detail: Option<&str>) -> String {
        let prefix = self.text(message);
        match detail {
            Some(detail) if !detail.is_empty() => {
                let separator = match self {
                    Locale::English => ": ",
                    Locale::Chinese => "：",
                };
                format!("{}{}{}", prefix, separator, detail)
            }
            _ => prefix.to_string(),
        }
    }
}
