//! Transport seam between the dispatcher and the wire.

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// A single request as seen by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    /// Endpoint path, e.g. `/api/stocks`.
    pub path: String,
    pub body: Option<Value>,
}

/// Raw status and body returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the raw request/response exchange for a dispatcher.
///
/// Implementations must not interpret status codes; the dispatcher owns that.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::invalid_request(format!("HTTP client build error: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let url = self.url(&request.path);
        debug!("{} {}", request.method, url);

        let mut builder = self
            .client
            .request(request.method, &url)
            .header(ACCEPT, HeaderValue::from_static("application/json, */*"));
        if let Some(body) = request.body {
            builder = builder.json(&body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!("{} answered {} ({} bytes)", url, status, body.len());

        Ok(TransportResponse { status, body })
    }
}
