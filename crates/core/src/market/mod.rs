//! Market data module - quote models and the market data container.

mod market_model;
mod market_store;

pub use market_model::*;
pub use market_store::*;
