//! Completion notification channel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::TimerId;

/// Emitted exactly once per natural completion (elapsed reaching total).
/// Never emitted for an explicit stop or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub id: TimerId,
    pub name: String,
    pub finished_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub(crate) fn new(id: TimerId, name: String) -> Self {
        Self {
            id,
            name,
            finished_at: Utc::now(),
        }
    }
}
