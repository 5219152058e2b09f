mod config;
mod main_lib;

use findash_core::{FetchOutcome, ReportOutcome};
use main_lib::{bootstrap, build_state, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = bootstrap();
    let state = build_state(&config)?;

    load_market(&state).await;

    for code in std::env::args().skip(1) {
        analyze(&state, &code).await;
    }

    let cancelled = state.registry.cancel_all();
    if cancelled > 0 {
        tracing::debug!("Cancelled {} pending request(s) on shutdown", cancelled);
    }
    Ok(())
}

async fn load_market(state: &AppState) {
    let market = &state.market;
    let (stocks, bonds, funds) = tokio::join!(
        market.fetch_stocks(),
        market.fetch_bonds(),
        market.fetch_funds()
    );
    tracing::info!(
        "Market loaded: stocks {:?}, bonds {:?}, funds {:?}",
        stocks,
        bonds,
        funds
    );
    if let Some(message) = market.error() {
        tracing::warn!("{}", message);
    }

    let snapshot = market.snapshot();
    tracing::info!(
        "{} stocks, {} bonds, {} funds",
        snapshot.stocks.len(),
        snapshot.bonds.len(),
        snapshot.funds.len()
    );
    match market.top_gainer() {
        Some(stock) => tracing::info!("Top gainer: {} {} ({}%)", stock.code, stock.name, stock.change),
        None => tracing::info!("Top gainer: none"),
    }
    match market.highest_yield_bond() {
        Some(bond) => tracing::info!("Highest yield: {} {} ({})", bond.code, bond.name, bond.yield_rate),
        None => tracing::info!("Highest yield: none"),
    }
}

async fn analyze(state: &AppState, code: &str) {
    let analysis = &state.analysis;
    if analysis.fetch_financial_data(code).await != FetchOutcome::Updated {
        tracing::warn!(
            "No analysis for {}: {}",
            code,
            analysis.error().unwrap_or_default()
        );
        return;
    }

    if let Some(metrics) = analysis.metrics() {
        tracing::info!(
            "{}: ROE {}%, debt ratio {}%, dividend {}%, capital structure {}%, WACC {}, cash flow {}",
            code,
            metrics.roe,
            metrics.debt_ratio,
            metrics.dividend,
            metrics.capital_structure,
            metrics.wacc,
            metrics.cash_flow
        );
    }
    if let Some(advice) = analysis.investment_advice() {
        tracing::info!("{}", advice);
    }

    match analysis.generate_report().await {
        ReportOutcome::Delivered(path) => tracing::info!("Report saved to {}", path.display()),
        ReportOutcome::Skipped => tracing::info!("No metrics for {}, report skipped", code),
        ReportOutcome::Cancelled => tracing::debug!("Report for {} superseded", code),
        ReportOutcome::Failed => tracing::warn!(
            "Report for {} failed: {}",
            code,
            analysis.error().unwrap_or_default()
        ),
    }
}
