//! Loading flag shared by the containers.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts actions in flight; the container is loading while any is running.
#[derive(Debug, Default)]
pub struct LoadingFlag {
    in_flight: AtomicUsize,
}

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Raise the flag until the returned guard is dropped.
    pub fn begin(&self) -> LoadingGuard<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        LoadingGuard { flag: self }
    }
}

/// Lowers the loading flag on drop, including when the action is abandoned.
#[derive(Debug)]
pub struct LoadingGuard<'a> {
    flag: &'a LoadingFlag,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
