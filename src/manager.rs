//! Timer manager facade
//!
//! One `TimerManager` is constructed at process start and passed by
//! reference to every collaborator. There is deliberately no global
//! instance: tests and embedders hold as many isolated managers as they
//! want.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::{
    config::Config,
    error::TimerError,
    notify::CompletionEvent,
    presets::{Preset, PresetStore},
    state::{Timer, TimerId, TimerRegistry},
    tasks::progression_loop,
};

/// Owns the timer registry, the preset store, and the completion channel,
/// and spawns one progression task per started timer.
#[derive(Debug)]
pub struct TimerManager {
    registry: Arc<TimerRegistry>,
    presets: PresetStore,
    completion_tx: broadcast::Sender<CompletionEvent>,
    /// Keep the receiver alive to prevent channel closure
    _completion_rx: broadcast::Receiver<CompletionEvent>,
}

impl TimerManager {
    /// Create a manager with stock configuration and the default preset
    /// path
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let (completion_tx, completion_rx) = broadcast::channel(config.event_capacity);
        let presets = match config.preset_path {
            Some(path) => PresetStore::open(path),
            None => PresetStore::open_default(),
        };

        Self {
            registry: Arc::new(TimerRegistry::new(config.max_timers)),
            presets,
            completion_tx,
            _completion_rx: completion_rx,
        }
    }

    // --- timer lifecycle ---

    /// Create a new timer; rejects creation beyond the concurrent limit
    pub fn create(&self, name: &str, total_seconds: u32) -> Result<TimerId, TimerError> {
        self.registry.create(name, total_seconds)
    }

    /// Start a timer and spawn its progression loop.
    ///
    /// Must be called within a tokio runtime. The already-running rejection
    /// in the registry guarantees at most one loop per timer.
    pub fn start(&self, id: TimerId) -> Result<(), TimerError> {
        self.registry.start(id)?;
        tokio::spawn(progression_loop(
            Arc::clone(&self.registry),
            id,
            self.completion_tx.clone(),
        ));
        Ok(())
    }

    /// Pause a running timer; its loop keeps ticking but withholds
    /// advancement
    pub fn pause(&self, id: TimerId) -> Result<(), TimerError> {
        self.registry.pause(id)
    }

    /// Resume a paused timer
    pub fn resume(&self, id: TimerId) -> Result<(), TimerError> {
        self.registry.resume(id)
    }

    /// Stop a timer, resetting elapsed time to zero. Idempotent.
    pub fn stop(&self, id: TimerId) -> Result<(), TimerError> {
        self.registry.stop(id)
    }

    /// Stop and permanently remove a timer
    pub fn delete(&self, id: TimerId) -> Result<(), TimerError> {
        self.registry.delete(id)
    }

    // --- read side ---

    /// Read-only snapshot of one timer
    pub fn get(&self, id: TimerId) -> Result<Timer, TimerError> {
        self.registry.get(id)
    }

    /// Snapshot of all timers in creation order
    pub fn list(&self) -> Vec<Timer> {
        self.registry.list()
    }

    /// True iff the timer exists, is running, and is not paused
    pub fn is_effectively_running(&self, id: TimerId) -> bool {
        self.registry.is_effectively_running(id)
    }

    /// Truncating integer percentage, or -1 for an unknown id or zero total
    pub fn progress_percent(&self, id: TimerId) -> i32 {
        self.registry.progress_percent(id)
    }

    // --- completion notifications ---

    /// Register an observer for natural-completion events. Each live
    /// receiver sees every event exactly once; dropping it deregisters.
    pub fn subscribe_completions(&self) -> broadcast::Receiver<CompletionEvent> {
        self.completion_tx.subscribe()
    }

    // --- presets ---

    /// Insert or update a named preset and persist it
    pub fn save_preset(&self, name: &str, seconds: u32) {
        self.presets.save(name, seconds);
    }

    /// Remove a named preset and persist the removal
    pub fn delete_preset(&self, name: &str) -> Result<(), TimerError> {
        self.presets.delete(name)
    }

    /// Snapshot of all presets
    pub fn presets(&self) -> Vec<Preset> {
        self.presets.list()
    }

    /// Create a timer from a named preset, identical to
    /// `create(preset.name, preset.seconds)`
    pub fn instantiate(&self, name: &str) -> Result<TimerId, TimerError> {
        let preset = self
            .presets
            .find(name)
            .ok_or_else(|| TimerError::PresetNotFound(name.to_string()))?;
        self.create(&preset.name, preset.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(dir: &tempfile::TempDir) -> TimerManager {
        TimerManager::with_config(Config {
            preset_path: Some(dir.path().join("presets.txt")),
            ..Config::default()
        })
    }

    #[test]
    fn instantiate_unknown_preset_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);
        assert_eq!(
            mgr.instantiate("Nap"),
            Err(TimerError::PresetNotFound("Nap".into()))
        );
    }

    #[test]
    fn instantiate_copies_the_preset_into_a_fresh_timer() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);
        mgr.save_preset("Nap", 1200);

        let id = mgr.instantiate("Nap").unwrap();
        let timer = mgr.get(id).unwrap();
        assert_eq!(timer.name, "Nap");
        assert_eq!(timer.total_seconds, 1200);
        assert_eq!(timer.elapsed_seconds, 0);
        assert!(!timer.running);
    }

    #[test]
    fn instantiate_respects_the_capacity_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);
        mgr.save_preset("Nap", 1200);
        for _ in 0..5 {
            mgr.instantiate("Nap").unwrap();
        }
        assert_eq!(mgr.instantiate("Nap"), Err(TimerError::CapacityExceeded(5)));
    }
}
