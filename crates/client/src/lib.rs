//! Findash Client - shared request dispatcher for the dashboard backend API.
//!
//! This crate provides the single HTTP entry point used by every domain
//! container. It normalizes responses, cancels superseded in-flight requests
//! to the same endpoint path, and reports failures through one error type.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use findash_client::{ClientConfig, HttpDispatcher, RequestRegistry};
//!
//! let registry = Arc::new(RequestRegistry::new());
//! let dispatcher = HttpDispatcher::from_config(ClientConfig::from_env(), registry)?;
//! let stocks: serde_json::Value = dispatcher.get_json("/api/stocks").await?;
//! ```

mod config;
mod dispatcher;
mod error;
mod registry;
mod transport;

pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use dispatcher::{Dispatcher, HttpDispatcher};
pub use error::{ClientError, Result};
pub use registry::{RequestRegistry, RequestTicket};
pub use transport::{ReqwestTransport, Transport, TransportRequest, TransportResponse};

/// HTTP method re-exported so transports and callers agree on one type.
pub use reqwest::Method;
