//! Request dispatcher: supersession, timeout, and envelope unwrapping.

use std::sync::Arc;

use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::registry::RequestRegistry;
use crate::transport::{ReqwestTransport, Transport, TransportRequest};

/// Dispatcher over the production `reqwest` transport.
pub type HttpDispatcher = Dispatcher<ReqwestTransport>;

/// Shared request dispatcher.
///
/// Every request is registered under its path in the [`RequestRegistry`];
/// a newer request to the same path cancels the older one, which then
/// settles with [`ClientError::Cancelled`]. Requests to different paths run
/// independently.
pub struct Dispatcher<T: Transport> {
    transport: T,
    registry: Arc<RequestRegistry>,
    config: ClientConfig,
}

impl HttpDispatcher {
    /// Build a dispatcher talking to `config.base_url` over HTTP.
    pub fn from_config(config: ClientConfig, registry: Arc<RequestRegistry>) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Dispatcher::new(config, transport, registry))
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(config: ClientConfig, transport: T, registry: Arc<RequestRegistry>) -> Self {
        Self {
            transport,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<RequestRegistry> {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request and return the payload bytes of a 2xx response.
    pub async fn request(&self, path: &str, method: Method, body: Option<Value>) -> Result<Vec<u8>> {
        let (ticket, cancelled) = self.registry.register(path);
        let ticket_id = ticket.id();
        let request = TransportRequest {
            method,
            path: path.to_string(),
            body,
        };

        let outcome = tokio::select! {
            biased;
            Ok(()) = cancelled => Err(ClientError::cancelled(path)),
            result = self.transport.send(request) => result,
            _ = tokio::time::sleep(self.config.timeout) => Err(ClientError::timeout(self.config.timeout)),
        };
        drop(ticket);

        match outcome {
            Ok(response) if response.is_success() => Ok(response.body),
            Ok(response) => {
                debug!(
                    "Request #{} to {} failed with status {}",
                    ticket_id, path, response.status
                );
                Err(ClientError::http(response.status))
            }
            Err(err) if err.is_cancelled() => {
                debug!("Request #{} to {} cancelled", ticket_id, path);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// `GET` a path and decode its JSON payload.
    pub async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let body = self.request(path, Method::GET, None).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `POST` a JSON body and decode the JSON payload of the answer.
    pub async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let body = serde_json::to_value(body)?;
        let payload = self.request(path, Method::POST, Some(body)).await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// `POST` a JSON body and return the binary payload of the answer.
    pub async fn post_for_bytes<B: Serialize>(&self, path: &str, body: &B) -> Result<Vec<u8>> {
        let body = serde_json::to_value(body)?;
        self.request(path, Method::POST, Some(body)).await
    }
}
