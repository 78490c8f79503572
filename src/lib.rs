//! Timekeep - a concurrent countdown timer manager
//!
//! This library owns timer lifecycle state on behalf of a presentation
//! layer: it tracks a bounded set of concurrent countdown timers, runs one
//! background progression task per started timer, and broadcasts a
//! completion event when a timer naturally reaches its target duration.
//! Named presets persist across sessions in a plain text file.

pub mod config;
pub mod error;
pub mod manager;
pub mod notify;
pub mod presets;
pub mod state;
pub mod tasks;

// Re-export commonly used types
pub use config::Config;
pub use error::TimerError;
pub use manager::TimerManager;
pub use notify::CompletionEvent;
pub use presets::{Preset, PresetStore};
pub use state::{Timer, TimerId, TimerRegistry};
