//! Manager configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Tunables for a [`TimerManager`](crate::TimerManager) instance.
///
/// Embedders that keep their own config files can deserialize this
/// directly; `Config::default()` matches the stock behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of concurrent timer records; creation beyond this is
    /// rejected, never evicted
    pub max_timers: usize,

    /// Backing file for named presets. `None` resolves the per-user
    /// application data directory.
    pub preset_path: Option<PathBuf>,

    /// Buffer size of the completion broadcast channel
    pub event_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_timers: 5,
            preset_path: None,
            event_capacity: 64,
        }
    }
}
