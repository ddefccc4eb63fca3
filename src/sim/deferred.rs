//! Deferred, cancelable actions on the round clock
//!
//! Hint expiry and the wrong-click flash clear after a fixed delay. They are
//! queued here with an explicit handle instead of ambient timers, so a round
//! can cancel them and nothing outlives the round that scheduled it.

use super::state::ItemId;

/// Cleanup work scheduled for later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// Clear the hint highlight if it still points at this item
    ExpireHint(ItemId),
    /// Clear the penalty flash
    ClearPenaltyFeedback,
}

/// Handle returned by [`DeferredQueue::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredHandle(u64);

#[derive(Debug, Clone)]
struct Entry {
    handle: DeferredHandle,
    due_ms: u64,
    action: DeferredAction,
}

/// Pending actions ordered by due time (ties fire in schedule order)
#[derive(Debug, Clone, Default)]
pub struct DeferredQueue {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_ms: u64, action: DeferredAction) -> DeferredHandle {
        let handle = DeferredHandle(self.next_handle);
        self.next_handle += 1;
        // Insert after every entry due at or before `due_ms`
        let pos = self
            .entries
            .iter()
            .position(|e| e.due_ms > due_ms)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            Entry {
                handle,
                due_ms,
                action,
            },
        );
        handle
    }

    /// Cancel a pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: DeferredHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn next_due(&self) -> Option<u64> {
        self.entries.first().map(|e| e.due_ms)
    }

    /// Remove and return the earliest action due at or before `now_ms`
    pub fn pop_due(&mut self, now_ms: u64) -> Option<DeferredAction> {
        if self.entries.first()?.due_ms <= now_ms {
            Some(self.entries.remove(0).action)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
