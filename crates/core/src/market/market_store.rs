//! Market data container.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use findash_client::{Dispatcher, Transport};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::{BONDS_ENDPOINT, FUNDS_ENDPOINT, STOCKS_ENDPOINT};
use crate::loading::LoadingFlag;
use crate::market::market_model::{
    highest_yield_bond, top_gainer, ApiBond, ApiFund, ApiStock, Bond, Fund, Stock,
};
use crate::messages::{Locale, Message};
use crate::outcome::FetchOutcome;

/// Data owned by the market container.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketState {
    pub stocks: Vec<Stock>,
    pub bonds: Vec<Bond>,
    pub funds: Vec<Fund>,
    pub error: Option<String>,
}

/// Holds the latest stock, bond and fund lists.
///
/// Each list is replaced wholesale on a successful fetch. Failures keep
/// whatever was loaded before and record a localized message in `error`,
/// which stays until [`MarketStore::clear_error`] is called.
pub struct MarketStore<T: Transport> {
    dispatcher: Arc<Dispatcher<T>>,
    locale: Locale,
    state: RwLock<MarketState>,
    loading: LoadingFlag,
}

impl<T: Transport> MarketStore<T> {
    pub fn new(dispatcher: Arc<Dispatcher<T>>, locale: Locale) -> Self {
        Self {
            dispatcher,
            locale,
            state: RwLock::new(MarketState::default()),
            loading: LoadingFlag::default(),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher<T>> {
        &self.dispatcher
    }

    fn read(&self) -> RwLockReadGuard<'_, MarketState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("Market state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, MarketState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("Market state lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────────

    /// GET /api/stocks
    pub async fn fetch_stocks(&self) -> FetchOutcome {
        self.fetch_list::<ApiStock, Stock>(STOCKS_ENDPOINT, Message::FetchStocksFailed, |state, stocks| {
            state.stocks = stocks
        })
        .await
    }

    /// GET /api/bonds
    pub async fn fetch_bonds(&self) -> FetchOutcome {
        self.fetch_list::<ApiBond, Bond>(BONDS_ENDPOINT, Message::FetchBondsFailed, |state, bonds| {
            state.bonds = bonds
        })
        .await
    }

    /// GET /api/funds
    pub async fn fetch_funds(&self) -> FetchOutcome {
        self.fetch_list::<ApiFund, Fund>(FUNDS_ENDPOINT, Message::FetchFundsFailed, |state, funds| {
            state.funds = funds
        })
        .await
    }

    async fn fetch_list<R, Q>(
        &self,
        path: &str,
        failure: Message,
        store: impl FnOnce(&mut MarketState, Vec<Q>),
    ) -> FetchOutcome
    where
        R: DeserializeOwned,
        Q: From<R>,
    {
        let _loading = self.loading.begin();

        match self.dispatcher.get_json::<Vec<R>>(path).await {
            Ok(rows) => {
                let quotes: Vec<Q> = rows.into_iter().map(Q::from).collect();
                debug!("Loaded {} rows from {}", quotes.len(), path);
                // `error` is shared by the three lists; only `clear_error` resets it.
                store(&mut *self.write(), quotes);
                FetchOutcome::Updated
            }
            Err(err) if err.is_cancelled() => {
                debug!("Fetch of {} superseded", path);
                FetchOutcome::Cancelled
            }
            Err(err) => {
                error!("Failed to fetch {}: {}", path, err);
                self.write().error = Some(self.locale.text(failure).to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Forget the last error message.
    pub fn clear_error(&self) {
        self.write().error = None;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read-only views
    // ─────────────────────────────────────────────────────────────────────────

    pub fn stocks(&self) -> Vec<Stock> {
        self.read().stocks.clone()
    }

    pub fn bonds(&self) -> Vec<Bond> {
        self.read().bonds.clone()
    }

    pub fn funds(&self) -> Vec<Fund> {
        self.read().funds.clone()
    }

    pub fn loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn snapshot(&self) -> MarketState {
        self.read().clone()
    }

    /// Stock with the largest change, or `None` when no stocks are loaded.
    pub fn top_gainer(&self) -> Option<Stock> {
        top_gainer(&self.read().stocks).cloned()
    }

    /// Bond with the largest yield, or `None` when no bonds are loaded.
    pub fn highest_yield_bond(&self) -> Option<Bond> {
        highest_yield_bond(&self.read().bonds).cloned()
    }
}
