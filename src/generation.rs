//! Generation counters for discarding stale responses
//!
//! A view takes a ticket before it issues a request and checks it when the
//! response lands. Issuing a newer request or unmounting the view
//! (`invalidate`) makes older tickets stale.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier ticket
    pub fn next(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Make every outstanding ticket stale
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}
