//! Events whose side effects must wait until a ledger block is reached.
use crate::models::EventRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct DelayedEvent {
    pub due_block: u64,
    pub event: EventRecord,
}

/// Queue of delayed events kept in arrival order.
#[derive(Debug, Clone, Default)]
pub struct DelayedEvents {
    events: Vec<DelayedEvent>,
}

impl DelayedEvents {
    /// Queues `event` unless the same log is already waiting.
    /// Returns false for a duplicate.
    pub fn push(&mut self, due_block: u64, event: EventRecord) -> bool {
        let key = event.key();
        if self.events.iter().any(|delayed| delayed.event.key() == key) {
            return false;
        }
        self.events.push(DelayedEvent { due_block, event });
        true
    }

    /// Removes and returns, in arrival order, every event due at or before
    /// `current_block`. Events not yet due keep their relative order.
    pub fn extract_due(&mut self, current_block: u64) -> Vec<EventRecord> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.events)
            .into_iter()
            .partition(|delayed| delayed.due_block <= current_block);
        self.events = pending;
        due.into_iter().map(|delayed| delayed.event).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DelayedEvent> {
        self.events.iter()
    }
}
