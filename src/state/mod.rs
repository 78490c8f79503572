//! State management module
//!
//! This module contains the timer record structure and the registry that
//! owns the canonical records.

pub mod registry;
pub mod timer;

// Re-export main types
pub use registry::TimerRegistry;
pub use timer::{Timer, TimerId};

pub(crate) use timer::lock_timer;
