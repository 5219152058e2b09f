//! In-flight request registry keyed by endpoint path.
//!
//! At most one request per path is tracked. Registering a new request for a
//! path that is still in flight signals the previous one to cancel and takes
//! over the slot. Each entry carries a ticket id so that a settling request
//! only ever removes its own entry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, warn};
use tokio::sync::oneshot;

#[derive(Debug)]
struct InFlight {
    ticket: u64,
    cancel: oneshot::Sender<()>,
}

/// Registry of cancel handles for in-flight requests.
///
/// One registry is shared by every dispatcher of an application context and
/// lives as long as that context.
#[derive(Debug, Default)]
pub struct RequestRegistry {
    next_ticket: AtomicU64,
    in_flight: Mutex<HashMap<String, InFlight>>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the map, recovering from poison since entries are plain handles.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, InFlight>> {
        self.in_flight.lock().unwrap_or_else(|poisoned| {
            warn!("Request registry mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Register a new request for `path`, cancelling any request already in
    /// flight for the same path.
    ///
    /// Returns the ticket guard that releases the entry when dropped and the
    /// receiver that fires if this request is itself superseded later.
    pub fn register(self: &Arc<Self>, path: &str) -> (RequestTicket, oneshot::Receiver<()>) {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let (cancel, cancelled) = oneshot::channel();

        let previous = self
            .lock()
            .insert(path.to_string(), InFlight { ticket, cancel });
        if let Some(previous) = previous {
            debug!(
                "Superseding in-flight request #{} to {}",
                previous.ticket, path
            );
            // The receiver may already be gone if that request just settled.
            let _ = previous.cancel.send(());
        }

        let guard = RequestTicket {
            registry: Arc::clone(self),
            path: path.to_string(),
            ticket,
        };
        (guard, cancelled)
    }

    /// Remove the entry for `path` if it still belongs to `ticket`.
    fn release(&self, path: &str, ticket: u64) {
        let mut in_flight = self.lock();
        if in_flight.get(path).is_some_and(|entry| entry.ticket == ticket) {
            in_flight.remove(path);
        }
    }

    /// Cancel the request in flight for `path`, if any.
    ///
    /// Returns true when a request was signalled.
    pub fn cancel(&self, path: &str) -> bool {
        match self.lock().remove(path) {
            Some(entry) => {
                debug!("Cancelling request #{} to {}", entry.ticket, path);
                let _ = entry.cancel.send(());
                true
            }
            None => false,
        }
    }

    /// Cancel every request currently in flight.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<(String, InFlight)> = self.lock().drain().collect();
        let count = drained.len();
        for (path, entry) in drained {
            debug!("Cancelling request #{} to {}", entry.ticket, path);
            let _ = entry.cancel.send(());
        }
        count
    }

    pub fn is_in_flight(&self, path: &str) -> bool {
        self.lock().contains_key(path)
    }

    pub fn in_flight_count(&self) -> usize {
        self.lock().len()
    }
}

/// Guard for one registered request. Dropping it releases the registry
/// entry, whatever way the request settled.
#[derive(Debug)]
pub struct RequestTicket {
    registry: Arc<RequestRegistry>,
    path: String,
    ticket: u64,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.ticket
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Drop for RequestTicket {
    fn drop(&mut self) {
        self.registry.release(&self.path, self.ticket);
    }
}
