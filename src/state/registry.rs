//! In-memory timer registry: identity allocation, capacity enforcement,
//! lookup and listing

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::timer::{lock_timer, Timer, TimerId, TimerSlot};
use crate::error::TimerError;

#[derive(Debug)]
struct Inner {
    /// Creation order preserved; at most `max_timers` entries
    slots: Vec<TimerSlot>,
    next_id: TimerId,
}

/// Owns the canonical timer records.
///
/// State mutation is serialized per record: each record sits behind its own
/// mutex, and the registry-wide lock is held only for the short
/// insert/remove/lookup window. Lock order is always registry-then-record.
#[derive(Debug)]
pub struct TimerRegistry {
    inner: Mutex<Inner>,
    max_timers: usize,
}

impl TimerRegistry {
    pub fn new(max_timers: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                slots: Vec::new(),
                next_id: 1,
            }),
            max_timers,
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetch the live slot for an id. The progression loop calls this every
    /// tick instead of caching the record, which is how `stop`/`delete`
    /// cancel a loop without an explicit signal.
    pub(crate) fn slot(&self, id: TimerId) -> Option<TimerSlot> {
        self.lock_inner()
            .slots
            .iter()
            .find(|slot| lock_timer(slot).id == id)
            .cloned()
    }

    /// Create a new timer with elapsed=0, not running. Rejects creation once
    /// `max_timers` records are live; never evicts.
    pub fn create(&self, name: &str, total_seconds: u32) -> Result<TimerId, TimerError> {
        let mut inner = self.lock_inner();
        if inner.slots.len() >= self.max_timers {
            return Err(TimerError::CapacityExceeded(self.max_timers));
        }

        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .slots
            .push(Arc::new(Mutex::new(Timer::new(id, name, total_seconds))));

        info!("Created timer {}: {} ({}s)", id, name, total_seconds);
        Ok(id)
    }

    /// Flip a timer to running. Rejecting an already-running timer is what
    /// guarantees at most one progression loop exists per id.
    pub fn start(&self, id: TimerId) -> Result<(), TimerError> {
        let slot = self.slot(id).ok_or(TimerError::NotFound(id))?;
        let mut timer = lock_timer(&slot);
        if timer.running {
            return Err(TimerError::AlreadyRunning(id));
        }

        timer.running = true;
        timer.paused = false;
        info!("Started timer {}: {}", id, timer.name);
        Ok(())
    }

    /// Mark a running timer paused. The progression loop keeps ticking but
    /// withholds advancement until resumed.
    pub fn pause(&self, id: TimerId) -> Result<(), TimerError> {
        let slot = self.slot(id).ok_or(TimerError::NotFound(id))?;
        let mut timer = lock_timer(&slot);
        if !timer.running {
            return Err(TimerError::NotRunning(id));
        }

        timer.paused = true;
        info!("Paused timer {}", id);
        Ok(())
    }

    /// Clear the paused flag on a running timer. Resume requires
    /// running=true, so paused-but-not-running is unreachable through the
    /// public surface.
    pub fn resume(&self, id: TimerId) -> Result<(), TimerError> {
        let slot = self.slot(id).ok_or(TimerError::NotFound(id))?;
        let mut timer = lock_timer(&slot);
        if !timer.running {
            return Err(TimerError::NotRunning(id));
        }

        timer.paused = false;
        info!("Resumed timer {}", id);
        Ok(())
    }

    /// Stop a timer and reset its elapsed time. Idempotent: stopping a
    /// stopped timer is still ok.
    pub fn stop(&self, id: TimerId) -> Result<(), TimerError> {
        let slot = self.slot(id).ok_or(TimerError::NotFound(id))?;
        let mut timer = lock_timer(&slot);
        timer.running = false;
        timer.paused = false;
        timer.elapsed_seconds = 0;
        info!("Stopped timer {}", id);
        Ok(())
    }

    /// Stop and permanently remove a timer. Its id is never reused.
    pub fn delete(&self, id: TimerId) -> Result<(), TimerError> {
        let mut inner = self.lock_inner();
        let index = inner
            .slots
            .iter()
            .position(|slot| lock_timer(slot).id == id)
            .ok_or(TimerError::NotFound(id))?;

        let slot = inner.slots.remove(index);
        // Implicit stop: the loop (if any) sees running=false on its next
        // wake and exits without emitting a completion.
        let mut timer = lock_timer(&slot);
        timer.running = false;
        timer.paused = false;
        timer.elapsed_seconds = 0;
        info!("Deleted timer {}", id);
        Ok(())
    }

    /// Read-only snapshot of one timer
    pub fn get(&self, id: TimerId) -> Result<Timer, TimerError> {
        let slot = self.slot(id).ok_or(TimerError::NotFound(id))?;
        let timer = lock_timer(&slot).clone();
        Ok(timer)
    }

    /// Snapshot of all timers in creation order; does not alias internal
    /// storage
    pub fn list(&self) -> Vec<Timer> {
        self.lock_inner()
            .slots
            .iter()
            .map(|slot| lock_timer(slot).clone())
            .collect()
    }

    /// True iff the timer exists, is running, and is not paused
    pub fn is_effectively_running(&self, id: TimerId) -> bool {
        self.slot(id)
            .map(|slot| lock_timer(&slot).is_effectively_running())
            .unwrap_or(false)
    }

    /// Integer progress percentage, truncating. Returns -1 for an unknown
    /// id or a zero total (division guard).
    pub fn progress_percent(&self, id: TimerId) -> i32 {
        let Some(slot) = self.slot(id) else {
            return -1;
        };
        let timer = lock_timer(&slot);
        if timer.total_seconds == 0 {
            return -1;
        }
        (u64::from(timer.elapsed_seconds) * 100 / u64::from(timer.total_seconds)) as i32
    }
}
