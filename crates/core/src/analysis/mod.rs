//! Financial analysis module - statement data, derived metrics, and the
//! analysis container.

mod analysis_model;
mod analysis_store;
mod metrics_calculator;

pub use analysis_model::*;
pub use analysis_store::*;
pub use metrics_calculator::*;

#[cfg(test)]
mod analysis_store_tests;
