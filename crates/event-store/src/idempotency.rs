use std::collections::HashSet;

use futuboard_core_types::TicketEventId;
use parking_lot::Mutex;

/// Remembers every accepted event id so replays of the same write are refused.
#[derive(Debug, Default)]
pub struct IdempotencyTracker {
    keys: Mutex<HashSet<TicketEventId>>,
}

impl IdempotencyTracker {
    /// Returns true if the key is newly accepted.
    pub fn accept(&self, key: TicketEventId) -> bool {
        self.keys.lock().insert(key)
    }

    /// Releases a key whose append was rolled back.
    pub fn forget(&self, key: &TicketEventId) {
        self.keys.lock().remove(key);
    }

    pub fn len(&self) -> usize {
        self.keys.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_accept_is_refused() {
        let tracker = IdempotencyTracker::default();
        let key = TicketEventId::new();
        assert!(tracker.accept(key));
        assert!(!tracker.accept(key));
        tracker.forget(&key);
        assert!(tracker.accept(key));
        assert_eq!(tracker.len(), 1);
    }
}
