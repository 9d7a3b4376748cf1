//! Stale-result suppression for overlapping navigations.
//!
//! Every navigation takes a [`Ticket`] before it starts loading documents.
//! When the pass finishes it checks whether its ticket is still the latest;
//! if a newer navigation began in the meantime the result is discarded.

use std::sync::atomic::{AtomicU64, Ordering};

/// Issues monotonically increasing navigation tickets.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

/// Position of one navigation in the request sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, superseding every earlier ticket.
    #[must_use]
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` belongs to the most recent navigation.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    static_assertions::assert_impl_all!(RequestSequencer: Send, Sync);

    #[test]
    fn test_latest_ticket_is_current() {
        let sequencer = RequestSequencer::new();

        let ticket = sequencer.begin();

        assert!(sequencer.is_current(ticket));
    }

    #[test]
    fn test_newer_ticket_supersedes() {
        let sequencer = RequestSequencer::new();

        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(first < second);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }

    #[test]
    fn test_tickets_unique_across_threads() {
        let sequencer = Arc::new(RequestSequencer::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sequencer = Arc::clone(&sequencer);
                std::thread::spawn(move || (0..100).map(|_| sequencer.begin()).collect::<Vec<_>>())
            })
            .collect();
        let mut tickets: Vec<Ticket> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        tickets.sort();
        tickets.dedup();

        assert_eq!(tickets.len(), 800);
        assert!(sequencer.is_current(*tickets.last().unwrap()));
    }
}
