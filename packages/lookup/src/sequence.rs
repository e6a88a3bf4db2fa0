//! Last-search-wins sequencing.
//!
//! Searches can overlap (a slow first load, a user typing quickly). Each
//! search takes a ticket when it starts; when its result is ready it is
//! only delivered if no newer search has started since.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Hands out monotonically increasing search tickets.
#[derive(Debug, Default)]
pub struct LatestSearch {
    latest: AtomicU64,
}

impl LatestSearch {
    /// Creates a sequence with no search started.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
        }
    }

    /// Starts a search, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` is still the newest search.
    #[must_use]
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
