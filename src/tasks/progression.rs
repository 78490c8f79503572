//! Per-timer background progression loop

use std::{sync::Arc, time::Duration};

use tokio::{sync::broadcast, time::sleep};
use tracing::{debug, info};

use crate::{
    notify::CompletionEvent,
    state::{lock_timer, TimerId, TimerRegistry},
};

/// Fixed progression cadence. Wall-clock approximate; no drift correction.
pub const TICK: Duration = Duration::from_secs(1);

/// Advances one timer's elapsed time at the fixed tick cadence until it
/// completes or is stopped.
///
/// The loop never caches a record across iterations: it re-fetches the slot
/// by id every tick and exits when the record is gone or no longer running.
/// That cooperative re-check is the only cancellation mechanism — `stop` and
/// `delete` do not signal this task, they just change the state it observes
/// on its next wake. Pausing withholds advancement for the tick but keeps
/// the loop alive.
pub async fn progression_loop(
    registry: Arc<TimerRegistry>,
    id: TimerId,
    completions: broadcast::Sender<CompletionEvent>,
) {
    debug!("Progression loop started for timer {}", id);

    loop {
        let Some(slot) = registry.slot(id) else {
            debug!("Timer {} no longer exists, progression loop exiting", id);
            break;
        };
        if !lock_timer(&slot).running {
            debug!("Timer {} stopped, progression loop exiting", id);
            break;
        }

        // Sole suspension point. The record may be paused, stopped, or
        // deleted while we sleep; the checks below run against its state
        // after waking.
        sleep(TICK).await;

        let mut timer = lock_timer(&slot);
        if !timer.running || timer.paused {
            continue;
        }

        timer.elapsed_seconds += 1;
        if timer.elapsed_seconds >= timer.total_seconds {
            timer.running = false;
            timer.paused = false;
            let event = CompletionEvent::new(id, timer.name.clone());
            drop(timer);

            info!("Timer {} ({}) completed", id, event.name);
            // No observers registered is fine; the manager keeps one
            // receiver alive so this only errs if it was dropped.
            let _ = completions.send(event);
            break;
        }
    }
}
