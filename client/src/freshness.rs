//! Latest-request-wins guard for superseding fetches
//!
//! The detail view issues a new sub-contract fetch every time the selected
//! contract changes, without cancelling the one in flight. A response must
//! only be applied if it belongs to the most recently issued request for
//! its key; anything else is stale and would overwrite state for the
//! newly selected contract.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Proof that a request was issued for a key, carrying its serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    serial: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Issues tickets per key and verifies them on completion.
///
/// Thread-safe; a single sequencer is shared by all fetches of a view.
#[derive(Debug, Default)]
pub struct RequestSequencer<K> {
    latest: Mutex<HashMap<K, u64>>,
    counter: AtomicU64,
}

impl<K: Eq + Hash + Clone> RequestSequencer<K> {
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(HashMap::new()),
            counter: AtomicU64::new(0),
        }
    }

    /// Register a fresh request for `key`, superseding any earlier one.
    pub fn issue(&self, key: K) -> Ticket<K> {
        let serial = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        self.latest
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.clone(), serial);
        Ticket { key, serial }
    }

    /// True while no later request has been issued for the ticket's key.
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(&ticket.key)
            .is_some_and(|serial| *serial == ticket.serial)
    }

    /// Decide whether a completed response may be applied. Stale tickets
    /// are rejected and logged by the caller.
    pub fn accept(&self, ticket: &Ticket<K>) -> bool {
        self.is_current(ticket)
    }
}
