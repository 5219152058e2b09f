use std::sync::Arc;

use findash_client::{HttpDispatcher, RequestRegistry, ReqwestTransport};
use findash_core::{AnalysisStore, DownloadSink, FileDownloadSink, MarketStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub market: MarketStore<ReqwestTransport>,
    pub analysis: AnalysisStore<ReqwestTransport>,
    pub registry: Arc<RequestRegistry>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FINDASH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Load `.env`, install the subscriber, then read the configuration so its
/// warnings about invalid values are recorded.
pub fn bootstrap() -> Config {
    dotenvy::dotenv().ok();
    init_tracing();
    Config::from_env()
}

pub fn build_state(config: &Config) -> anyhow::Result<AppState> {
    // One registry shared by both containers so a path is never in flight twice.
    let registry = Arc::new(RequestRegistry::new());
    let dispatcher = Arc::new(HttpDispatcher::from_config(
        config.client.clone(),
        registry.clone(),
    )?);
    tracing::info!(
        "Backend {} (timeout {}s), locale {}",
        config.client.base_url,
        config.client.timeout.as_secs(),
        config.locale
    );

    let sink: Arc<dyn DownloadSink> = Arc::new(FileDownloadSink::new(config.download_dir.clone()));
    let market = MarketStore::new(dispatcher.clone(), config.locale);
    let analysis = AnalysisStore::new(dispatcher, sink, config.locale);

    Ok(AppState {
        market,
        analysis,
        registry,
    })
}
