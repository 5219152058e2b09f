//! Findash Core - domain containers and financial computations.
//!
//! This crate holds the state the dashboard renders: the market quote lists
//! and one company's financial analysis. Containers call the backend through
//! a shared [`findash_client::Dispatcher`] and record failures as localized
//! messages rather than returning errors to the view layer.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   MarketStore    |     |  AnalysisStore   | --> calculate_metrics (pure)
//! +------------------+     +------------------+
//!           \                   /        \
//!            v                 v          v
//!         +---------------------+   +--------------+
//!         |     Dispatcher      |   | DownloadSink |
//!         +---------------------+   +--------------+
//!                    |
//!                    v
//!         +---------------------+
//!         |   RequestRegistry   |  (one in-flight request per path)
//!         +---------------------+
//! ```

pub mod analysis;
pub mod constants;
pub mod delivery;
pub mod errors;
pub mod loading;
pub mod market;
pub mod messages;
pub mod outcome;

#[cfg(test)]
mod test_support;

pub use analysis::{
    calculate_metrics, evaluate_investment, AnalysisState, AnalysisStore, FinancialData,
    FinancialMetrics, InvestmentDecision,
};
pub use delivery::{DownloadSink, FileDownloadSink};
pub use market::{Bond, Fund, MarketState, MarketStore, Stock};
pub use messages::{Locale, Message};
pub use outcome::{FetchOutcome, ReportOutcome};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
