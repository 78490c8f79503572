//! Caller-visible error taxonomy

use thiserror::Error;

use crate::state::TimerId;

/// Errors returned by timer and preset operations.
///
/// Every variant is a recoverable, caller-visible outcome. No operation in
/// this crate terminates the process or panics on its documented
/// preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// No timer exists with the given id
    #[error("no timer with id {0}")]
    NotFound(TimerId),

    /// No preset exists with the given name
    #[error("no preset named {0:?}")]
    PresetNotFound(String),

    /// The registry already holds its maximum number of timers
    #[error("timer limit of {0} reached")]
    CapacityExceeded(usize),

    /// `start` was called on a timer that is already running
    #[error("timer {0} is already running")]
    AlreadyRunning(TimerId),

    /// `pause`/`resume` was called on a timer that is not running
    #[error("timer {0} is not running")]
    NotRunning(TimerId),
}
