//! Timer record structure

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

/// Unique timer identifier, assigned monotonically and never reused
pub type TimerId = u32;

/// A single countdown timer record.
///
/// The registry owns the canonical record; everything handed out through
/// `get`/`list` is a snapshot clone that does not alias registry storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    /// Display name shown by the presentation layer
    pub name: String,
    /// Target duration, fixed at creation
    pub total_seconds: u32,
    /// Progress so far; reset to 0 on stop
    pub elapsed_seconds: u32,
    pub running: bool,
    pub paused: bool,
}

impl Timer {
    pub(crate) fn new(id: TimerId, name: &str, total_seconds: u32) -> Self {
        Self {
            id,
            name: name.to_string(),
            total_seconds,
            elapsed_seconds: 0,
            running: false,
            paused: false,
        }
    }

    /// True iff the timer is running and not paused, i.e. elapsed time is
    /// actually advancing
    pub fn is_effectively_running(&self) -> bool {
        self.running && !self.paused
    }

    /// Seconds left until the target duration
    pub fn remaining_seconds(&self) -> u32 {
        self.total_seconds.saturating_sub(self.elapsed_seconds)
    }
}

/// Shared handle to one registry record. The outer registry lock covers
/// insert/remove/lookup only; field mutation goes through this per-record
/// mutex so readers never contend on a registry-wide lock for a full tick.
pub(crate) type TimerSlot = Arc<Mutex<Timer>>;

/// Lock a record slot, recovering from poisoning. Every mutation leaves the
/// record structurally valid, so a poisoned slot still holds usable state.
pub(crate) fn lock_timer(slot: &TimerSlot) -> MutexGuard<'_, Timer> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
