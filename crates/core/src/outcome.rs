//! Outcomes reported by container actions.
//!
//! Actions never return structured errors; failures are recorded in the
//! container's `error` field and the outcome only says how the call settled.

use std::path::PathBuf;

/// How a fetch action settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// New data replaced the previous data.
    Updated,
    /// A newer request for the same endpoint took over; nothing was written.
    Cancelled,
    /// The action failed and `error` was set.
    Failed,
}

/// How a report generation settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// No metrics were available, nothing was requested.
    Skipped,
    /// The report was handed to the download sink and saved here.
    Delivered(PathBuf),
    Cancelled,
    Failed,
}
