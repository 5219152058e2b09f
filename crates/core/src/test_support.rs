//! Scripted transport shared by the container tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use findash_client::{
    ClientConfig, ClientError, Dispatcher, RequestRegistry, Transport, TransportRequest,
    TransportResponse,
};
use tokio::sync::oneshot;

struct Scripted {
    gate: Option<oneshot::Receiver<()>>,
    response: findash_client::Result<TransportResponse>,
}

/// Transport answering from per-path queues of canned responses.
#[derive(Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Scripted>>>,
    seen: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn respond_json(&self, path: &str, body: serde_json::Value) {
        self.push(path, None, Ok(ok(body.to_string().into_bytes())));
    }

    pub fn respond_bytes(&self, path: &str, status: u16, body: &[u8]) {
        self.push(
            path,
            None,
            Ok(TransportResponse {
                status,
                body: body.to_vec(),
            }),
        );
    }

    pub fn fail(&self, path: &str, err: ClientError) {
        self.push(path, None, Err(err));
    }

    /// Script a JSON answer that is only returned once the sender fires.
    /// Dropping the sender leaves the request stalled.
    pub fn respond_json_after(&self, path: &str, body: serde_json::Value) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.push(path, Some(gate), Ok(ok(body.to_string().into_bytes())));
        release
    }

    fn push(
        &self,
        path: &str,
        gate: Option<oneshot::Receiver<()>>,
        response: findash_client::Result<TransportResponse>,
    ) {
        self.scripts
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(Scripted { gate, response });
    }

    pub fn seen(&self) -> Vec<TransportRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.seen().iter().filter(|r| r.path == path).count()
    }
}

fn ok(body: Vec<u8>) -> TransportResponse {
    TransportResponse { status: 200, body }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> findash_client::Result<TransportResponse> {
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(|queue| queue.pop_front());
        self.seen.lock().unwrap().push(request.clone());

        let Some(scripted) = scripted else {
            return Err(ClientError::network(format!("no scripted response for {}", request.path)));
        };
        if let Some(gate) = scripted.gate {
            if gate.await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        scripted.response
    }
}

pub fn dispatcher(transport: ScriptedTransport) -> Arc<Dispatcher<ScriptedTransport>> {
    Arc::new(Dispatcher::new(
        ClientConfig::new("http://backend.test", Duration::from_secs(10)),
        transport,
        Arc::new(RequestRegistry::new()),
    ))
}
