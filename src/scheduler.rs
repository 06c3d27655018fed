use core::cell::Cell;

/// Fixed-interval tick trigger driven by host frame time.
///
/// At most one tick runs at a time and at most one is due per frame. A backlog
/// of whole intervals (a slow frame, a paused host) is dropped and counted
/// instead of being replayed.
pub struct TickScheduler {
    interval_us: u32,
    elapsed_us: u32,
    dropped: u32,
    busy: Cell<bool>,
}

/// Marks a tick as running; the scheduler is free again once this is dropped.
pub struct TickGuard<'a> {
    busy: &'a Cell<bool>,
}

impl Drop for TickGuard<'_> {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}

impl TickScheduler {
    pub const fn new(interval_ms: u32) -> TickScheduler {
        TickScheduler {
            interval_us: interval_ms.saturating_mul(1000),
            elapsed_us: 0,
            dropped: 0,
            busy: Cell::new(false),
        }
    }

    /// Adds elapsed host time and reports whether a tick is due.
    pub fn advance(&mut self, elapsed_us: u32) -> bool {
        if self.interval_us == 0 {
            return true;
        }
        self.elapsed_us = self.elapsed_us.saturating_add(elapsed_us);
        let due = self.elapsed_us / self.interval_us;
        self.elapsed_us %= self.interval_us;
        if due > 1 {
            self.dropped = self.dropped.saturating_add(due - 1);
        }
        due > 0
    }

    /// Claims the tick slot, or `None` if a tick is still running.
    pub fn try_begin(&self) -> Option<TickGuard<'_>> {
        if self.busy.replace(true) {
            return None;
        }
        Some(TickGuard { busy: &self.busy })
    }

    /// Backlogged intervals dropped so far.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
