// SPDX-License-Identifier: MPL-2.0
//! Activity log of instance lifecycles.
//!
//! Every creation, removal, widget action and bulk clear is recorded with a
//! timestamp in a memory-bounded ring buffer, and can be exported as JSON.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`LifecycleEvent`]: What happened to which instance
//! - [`ActivityLog`]: The buffer of timestamped [`ActivityEntry`] values

mod buffer;
mod events;

pub use buffer::CircularBuffer;
pub use events::{ActivityEntry, LifecycleEvent, RemovalReason};

use crate::domain::diagnostics::ActivityCapacity;

/// Bounded, chronological record of lifecycle events.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: CircularBuffer<ActivityEntry>,
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(ActivityCapacity::default())
    }
}

impl ActivityLog {
    #[must_use]
    pub fn new(capacity: ActivityCapacity) -> Self {
        Self {
            entries: CircularBuffer::new(capacity),
        }
    }

    pub fn record(&mut self, event: LifecycleEvent) {
        self.entries.push(ActivityEntry::now(event));
    }

    /// Entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<ActivityEntry> {
        self.entries.iter().cloned().collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON array of every retained entry.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let entries: Vec<&ActivityEntry> = self.entries.iter().collect();
        serde_json::to_string_pretty(&entries)
    }
}
