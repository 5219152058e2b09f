//! Financial analysis container.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use findash_client::{ClientError, Dispatcher, Transport};
use log::{debug, error, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::analysis_model::{FinancialData, FinancialMetrics, ReportRequest};
use crate::analysis::metrics_calculator::calculate_metrics;
use crate::constants::{financial_endpoint, REPORT_ENDPOINT, REPORT_FILENAME};
use crate::delivery::DownloadSink;
use crate::errors::Error;
use crate::loading::LoadingFlag;
use crate::messages::{Locale, Message};
use crate::outcome::{FetchOutcome, ReportOutcome};

/// Data owned by the analysis container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisState {
    pub financial_data: Option<FinancialData>,
    /// Always derived from `financial_data`; `None` when it cannot be.
    pub metrics: Option<FinancialMetrics>,
    pub error: Option<String>,
}

/// Holds one company's financial data and the metrics derived from it,
/// and requests the PDF report for them.
pub struct AnalysisStore<T: Transport> {
    dispatcher: Arc<Dispatcher<T>>,
    sink: Arc<dyn DownloadSink>,
    locale: Locale,
    state: RwLock<AnalysisState>,
    loading: LoadingFlag,
}

impl<T: Transport> AnalysisStore<T> {
    pub fn new(dispatcher: Arc<Dispatcher<T>>, sink: Arc<dyn DownloadSink>, locale: Locale) -> Self {
        Self {
            dispatcher,
            sink,
            locale,
            state: RwLock::new(AnalysisState::default()),
            loading: LoadingFlag::default(),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher<T>> {
        &self.dispatcher
    }

    fn read(&self) -> RwLockReadGuard<'_, AnalysisState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Analysis state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, AnalysisState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Analysis state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn fail(&self, message: Message) {
        self.write().error = Some(self.locale.text(message).to_string());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /api/stocks/financial/{code}
    ///
    /// Stores the validated statement data and recomputes every metric.
    /// When the data cannot produce metrics it is still stored, `metrics`
    /// is cleared and `error` explains why.
    pub async fn fetch_financial_data(&self, code: &str) -> FetchOutcome {
        let _loading = self.loading.begin();
        let path = financial_endpoint(code);

        let payload = match self.dispatcher.get_json::<Value>(&path).await {
            Ok(payload) => payload,
            Err(err) if err.is_cancelled() => {
                debug!("Financial data fetch for {} superseded", code);
                return FetchOutcome::Cancelled;
            }
            Err(err) => {
                error!("Failed to fetch financial data for {}: {}", code, err);
                self.fail(Message::FetchFinancialDataFailed);
                return FetchOutcome::Failed;
            }
        };

        let data = match FinancialData::from_payload(payload) {
            Ok(data) => data,
            Err(err) => {
                error!("Rejected financial data for {}: {}", code, err);
                self.fail(Message::InvalidFinancialData);
                return FetchOutcome::Failed;
            }
        };

        let metrics = calculate_metrics(&data);
        let mut state = self.write();
        state.financial_data = Some(data);
        match metrics {
            Ok(metrics) => {
                debug!(
                    "Metrics for {}: roe={} debt_ratio={} decision={}",
                    code, metrics.roe, metrics.debt_ratio, metrics.investment_decision
                );
                state.metrics = Some(metrics);
                state.error = None;
                FetchOutcome::Updated
            }
            Err(err) => {
                warn!("Cannot derive metrics for {}: {}", code, err);
                state.metrics = None;
                state.error = Some(self.locale.text(Message::InvalidFinancialData).to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Recompute the metrics from the stored data.
    pub fn recalculate_metrics(&self) -> Option<FinancialMetrics> {
        let mut state = self.write();
        let data = state.financial_data.as_ref()?;
        match calculate_metrics(data) {
            Ok(metrics) => {
                state.metrics = Some(metrics.clone());
                Some(metrics)
            }
            Err(err) => {
                warn!("Cannot derive metrics: {}", err);
                state.metrics = None;
                state.error = Some(self.locale.text(Message::InvalidFinancialData).to_string());
                None
            }
        }
    }

    /// POST /api/report/generate
    ///
    /// Does nothing when no metrics are available. Otherwise requests the
    /// PDF for the current metrics and data and hands it to the download sink.
    pub async fn generate_report(&self) -> ReportOutcome {
        let body = {
            let state = self.read();
            let Some(metrics) = state.metrics.as_ref() else {
                debug!("No metrics available, skipping report generation");
                return ReportOutcome::Skipped;
            };
            let request = ReportRequest {
                metrics,
                financial_data: state.financial_data.as_ref(),
            };
            match serde_json::to_value(&request) {
                Ok(body) => body,
                Err(err) => {
                    drop(state);
                    return self.report_failed(Error::report_generation(err.to_string()));
                }
            }
        };

        let bytes = match self.dispatcher.post_for_bytes(REPORT_ENDPOINT, &body).await {
            Ok(bytes) => bytes,
            Err(err) if err.is_cancelled() => {
                debug!("Report generation superseded");
                return ReportOutcome::Cancelled;
            }
            Err(ClientError::Http { status }) => {
                return self.report_failed(Error::report_generation(format!(
                    "server answered HTTP {}",
                    status
                )));
            }
            Err(err) => return self.report_failed(err.into()),
        };

        match self.sink.deliver(bytes, REPORT_FILENAME).await {
            Ok(path) => {
                info!("Report delivered to {}", path.display());
                ReportOutcome::Delivered(path)
            }
            Err(err) => self.report_failed(err),
        }
    }

    fn report_failed(&self, err: Error) -> ReportOutcome {
        error!("Report generation failed: {}", err);
        let detail = match &err {
            Error::ReportGeneration(detail) | Error::Delivery(detail) => detail.clone(),
            other => other.to_string(),
        };
        self.write().error = Some(
            self.locale
                .with_detail(Message::GenerateReportFailed, Some(&detail)),
        );
        ReportOutcome::Failed
    }

    /// Forget the last error message.
    pub fn clear_error(&self) {
        self.write().error = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn financial_data(&self) -> Option<FinancialData> {
        self.read().financial_data.clone()
    }

    pub fn metrics(&self) -> Option<FinancialMetrics> {
        self.read().metrics.clone()
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// Recommendation text for the current metrics in the container locale.
    pub fn investment_advice(&self) -> Option<&'static str> {
        self.read()
            .metrics
            .as_ref()
            .map(|m| m.investment_decision.label(self.locale))
    }

    pub fn snapshot(&self) -> AnalysisState {
        self.read().clone()
    }
}
