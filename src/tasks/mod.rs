//! Background tasks module
//!
//! This module contains the per-timer progression loop spawned alongside
//! the caller's runtime.

pub mod progression;

// Re-export main functions
pub use progression::{progression_loop, TICK};
