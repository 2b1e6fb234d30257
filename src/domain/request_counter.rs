use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide count of handled requests.
///
/// Incremented once per inbound request by the pipeline, whatever route or
/// status the request ends up with.
#[derive(Debug, Default)]
pub struct RequestCounter {
    total: AtomicU64,
}

impl RequestCounter {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one request and returns the new total.
    pub fn increment(&self) -> u64 {
        self.total.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }
}
