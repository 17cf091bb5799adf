use std::time::Duration;

use tracing::warn;

use super::input::{InputEvent, StampedEvent, TimerId};

pub const MAX_TIMER_CATCH_UP: u32 = 8;

#[derive(Debug, Clone, Copy)]
struct RepeatingTimer {
    id: TimerId,
    interval_ms: u64,
    next_due_ms: u64,
}

/// Repeating timers that fire as events inside the frame's event batch.
/// At most one timer exists per id.
#[derive(Debug, Default)]
pub struct TimerSchedule {
    timers: Vec<RepeatingTimer>,
}

impl TimerSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) `id` so it first fires one interval after `now_ms`.
    /// `None` or a zero interval disarms it.
    pub fn set(&mut self, id: TimerId, interval: Option<Duration>, now_ms: u64) {
        self.timers.retain(|timer| timer.id != id);
        let Some(interval) = interval else {
            return;
        };
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        if interval_ms == 0 {
            return;
        }
        self.timers.push(RepeatingTimer {
            id,
            interval_ms,
            next_due_ms: now_ms.saturating_add(interval_ms),
        });
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.iter().any(|timer| timer.id == id)
    }

    pub fn next_due_ms(&self, id: TimerId) -> Option<u64> {
        self.timers
            .iter()
            .find(|timer| timer.id == id)
            .map(|timer| timer.next_due_ms)
    }

    /// Returns one stamped event per elapsed interval, ordered by due time.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<StampedEvent> {
        let mut fired = Vec::new();
        for timer in &mut self.timers {
            let mut count = 0u32;
            while timer.next_due_ms <= now_ms && count < MAX_TIMER_CATCH_UP {
                fired.push(StampedEvent::new(
                    timer.next_due_ms,
                    InputEvent::Timer(timer.id),
                ));
                timer.next_due_ms = timer.next_due_ms.saturating_add(timer.interval_ms);
                count += 1;
            }
            if timer.next_due_ms <= now_ms {
                let dropped = (now_ms - timer.next_due_ms) / timer.interval_ms + 1;
                warn!(
                    timer_id = timer.id.0,
                    dropped,
                    max_catch_up = MAX_TIMER_CATCH_UP,
                    "timer_backlog_dropped"
                );
                timer.next_due_ms = now_ms.saturating_add(timer.interval_ms);
            }
        }
        fired.sort_by_key(|stamped| stamped.at_ms);
        fired
    }
}
