//! Single-slot handoff of the latest quote from the stream thread to the UI loop.
//!
//! `publish` overwrites whatever is held; `drain_latest` takes the slot and leaves it
//! empty. Ticks published between two drains are coalesced into the newest one, since
//! the display only ever shows current state. One producer and one consumer are
//! expected; the slot itself would tolerate more.
use std::sync::{Arc, Mutex, PoisonError};

use ticker_common::Quote;

/// Shared latest-value slot. Clones refer to the same slot.
#[derive(Debug, Clone, Default)]
pub struct QuoteBridge {
    slot: Arc<Mutex<Option<Quote>>>,
}

impl QuoteBridge {
    /// Create an empty bridge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held quote with `quote`.
    pub fn publish(&self, quote: Quote) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(quote);
    }

    /// Take the held quote, if any, leaving the slot empty.
    pub fn drain_latest(&self) -> Option<Quote> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
