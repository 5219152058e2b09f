//! Unit tests for the analysis container.

use super::*;
use crate::delivery::DownloadSink;
use crate::errors::{Error, Result};
use crate::messages::Locale;
use crate::outcome::{FetchOutcome, ReportOutcome};
use crate::test_support::{dispatcher, ScriptedTransport};
use async_trait::async_trait;
use findash_client::{ClientError, Method};
use rust_decimal_macros::dec;
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock sink
// ============================================================================

#[derive(Default)]
struct MemorySink {
    delivered: Mutex<Vec<(String, Vec<u8>)>>,
    fail: bool,
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn deliver(&self, bytes: Vec<u8>, filename: &str) -> Result<PathBuf> {
        if self.fail {
            return Err(Error::delivery("disk full"));
        }
        self.delivered.lock().unwrap().push((filename.to_string(), bytes));
        Ok(PathBuf::from("/downloads").join(filename))
    }
}

fn statement(net_profit: i64) -> serde_json::Value {
    json!({
        "netProfit": net_profit,
        "shareholderEquity": 1000,
        "totalLiabilities": 400,
        "totalAssets": 1000,
        "dividendPayment": 60,
        "operatingCashFlow": 50,
        "longTermDebt": 250,
        "companyName": "Kweichow Moutai"
    })
}

fn store_with(
    transport: ScriptedTransport,
    sink: Arc<MemorySink>,
    locale: Locale,
) -> AnalysisStore<ScriptedTransport> {
    AnalysisStore::new(dispatcher(transport), sink, locale)
}

fn store(transport: ScriptedTransport) -> AnalysisStore<ScriptedTransport> {
    store_with(transport, Arc::new(MemorySink::default()), Locale::English)
}

// ============================================================================
// fetch_financial_data
// ============================================================================

#[tokio::test]
async fn test_fetch_stores_data_and_metrics() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    let store = store(transport);

    assert_eq!(store.fetch_financial_data("600519").await, FetchOutcome::Updated);

    let data = store.financial_data().unwrap();
    assert_eq!(data.net_profit, Some(dec!(200)));
    let metrics = store.metrics().unwrap();
    assert_eq!(metrics.roe, dec!(20));
    assert_eq!(metrics.debt_ratio, dec!(40));
    assert_eq!(metrics.dividend, dec!(30));
    assert_eq!(metrics.capital_structure, dec!(20));
    assert_eq!(metrics.investment_decision, InvestmentDecision::Suitable);
    assert_eq!(
        store.investment_advice(),
        Some("Recommendation: suitable for investment")
    );
    assert!(store.error().is_none());
    assert!(!store.loading());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_metrics() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.fail("/api/stocks/financial/000858", ClientError::network("connection reset"));
    let store = store(transport);

    store.fetch_financial_data("600519").await;
    let before = store.metrics();

    assert_eq!(store.fetch_financial_data("000858").await, FetchOutcome::Failed);
    assert_eq!(store.metrics(), before);
    assert_eq!(store.financial_data().unwrap().net_profit, Some(dec!(200)));
    assert_eq!(store.error().as_deref(), Some("Failed to load financial data"));
    assert!(!store.loading());
}

#[tokio::test]
async fn test_unusable_data_replaces_and_clears_metrics() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.respond_json(
        "/api/stocks/financial/600519",
        json!({ "netProfit": 10, "shareholderEquity": 0, "totalAssets": 100 }),
    );
    let store = store_with(transport, Arc::new(MemorySink::default()), Locale::Chinese);

    store.fetch_financial_data("600519").await;
    assert!(store.metrics().is_some());

    assert_eq!(store.fetch_financial_data("600519").await, FetchOutcome::Failed);
    assert_eq!(store.financial_data().unwrap().net_profit, Some(dec!(10)));
    assert!(store.metrics().is_none());
    assert_eq!(store.error().as_deref(), Some("财务数据不完整，无法分析"));
}

#[tokio::test]
async fn test_non_numeric_payload_is_rejected_before_storing() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", json!({ "netProfit": "lots" }));
    let store = store(transport);

    assert_eq!(store.fetch_financial_data("600519").await, FetchOutcome::Failed);
    assert!(store.financial_data().is_none());
    assert_eq!(
        store.error().as_deref(),
        Some("Financial data is incomplete and cannot be analyzed")
    );
}

#[tokio::test]
async fn test_superseded_fetch_leaves_state_alone() {
    let transport = ScriptedTransport::default();
    let _stalled = transport.respond_json_after("/api/stocks/financial/600519", statement(100));
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    let store = store(transport);

    let (first, second) = tokio::join!(
        store.fetch_financial_data("600519"),
        store.fetch_financial_data("600519"),
    );

    assert_eq!(first, FetchOutcome::Cancelled);
    assert_eq!(second, FetchOutcome::Updated);
    assert_eq!(store.metrics().unwrap().roe, dec!(20));
    assert!(store.error().is_none());
    assert!(!store.loading());
}

#[tokio::test]
async fn test_recalculate_metrics_matches_fetch() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(150));
    let store = store(transport);

    assert!(store.recalculate_metrics().is_none());
    store.fetch_financial_data("600519").await;
    let fetched = store.metrics().unwrap();
    assert_eq!(store.recalculate_metrics(), Some(fetched.clone()));
    assert_eq!(fetched.investment_decision, InvestmentDecision::Cautious);
}

// ============================================================================
// generate_report
// ============================================================================

#[tokio::test]
async fn test_report_without_metrics_is_a_no_op() {
    let sink = Arc::new(MemorySink::default());
    let store = store_with(ScriptedTransport::default(), sink.clone(), Locale::English);
    let before = store.snapshot();

    assert_eq!(store.generate_report().await, ReportOutcome::Skipped);

    assert!(store.dispatcher().transport().seen().is_empty());
    assert!(sink.delivered.lock().unwrap().is_empty());
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_report_posts_metrics_and_delivers_pdf() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.respond_bytes("/api/report/generate", 200, b"%PDF-1.7 body");
    let sink = Arc::new(MemorySink::default());
    let store = store_with(transport, sink.clone(), Locale::English);

    store.fetch_financial_data("600519").await;
    let outcome = store.generate_report().await;

    assert_eq!(
        outcome,
        ReportOutcome::Delivered(PathBuf::from("/downloads/financial-analysis-report.pdf"))
    );
    let delivered = sink.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].0, "financial-analysis-report.pdf");
    assert_eq!(delivered[0].1, b"%PDF-1.7 body".to_vec());

    let seen = store.dispatcher().transport().seen();
    let report = seen.iter().find(|r| r.path == "/api/report/generate").unwrap();
    assert_eq!(report.method, Method::POST);
    let body = report.body.as_ref().unwrap();
    assert_eq!(body["metrics"]["roe"], json!(20.0));
    assert_eq!(body["metrics"]["investmentDecision"], json!("suitable"));
    assert_eq!(body["financialData"]["netProfit"], json!(200.0));
    assert_eq!(body["financialData"]["companyName"], json!("Kweichow Moutai"));
}

#[tokio::test]
async fn test_report_http_failure_sets_prefixed_error() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.respond_bytes("/api/report/generate", 500, b"boom");
    let sink = Arc::new(MemorySink::default());
    let store = store_with(transport, sink.clone(), Locale::English);

    store.fetch_financial_data("600519").await;
    assert_eq!(store.generate_report().await, ReportOutcome::Failed);

    assert_eq!(
        store.error().as_deref(),
        Some("Failed to generate report: server answered HTTP 500")
    );
    assert!(sink.delivered.lock().unwrap().is_empty());
    assert!(store.metrics().is_some());
}

#[tokio::test]
async fn test_report_delivery_failure_sets_error() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.respond_bytes("/api/report/generate", 200, b"%PDF");
    let sink = Arc::new(MemorySink {
        fail: true,
        ..Default::default()
    });
    let store = store_with(transport, sink, Locale::Chinese);

    store.fetch_financial_data("600519").await;
    assert_eq!(store.generate_report().await, ReportOutcome::Failed);
    assert_eq!(store.error().as_deref(), Some("生成报告失败：disk full"));
}

#[tokio::test]
async fn test_report_network_failure_includes_detail() {
    let transport = ScriptedTransport::default();
    transport.respond_json("/api/stocks/financial/600519", statement(200));
    transport.fail("/api/report/generate", ClientError::network("connection refused"));
    let store = store(transport);

    store.fetch_financial_data("600519").await;
    assert_eq!(store.generate_report().await, ReportOutcome::Failed);
    let error = store.error().unwrap();
    assert!(error.starts_with("Failed to generate report: "));
    assert!(error.contains("connection refused"));
}
