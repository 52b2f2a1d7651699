//! Timer seam between the card logic and whatever drives time.
//!
//! The browser host backs this with `setInterval`/`setTimeout`; tests use
//! [`ManualClock`], which only moves when told to.

/// What a timer means to the stage controller when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timer {
    ChargeTick,
    RevealToken { generation: u32, index: usize },
    AutoAdvance,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub(crate) u32);

pub trait Scheduler {
    fn schedule_repeating(&mut self, every_ms: u32, timer: Timer) -> TimerHandle;
    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
    /// Called by the owner each time a timer callback starts running.
    fn fired(&mut self, _handle: TimerHandle) {}
}

#[derive(Clone, Debug)]
struct Pending {
    handle: TimerHandle,
    due_ms: u64,
    every_ms: Option<u32>,
    timer: Timer,
    seq: u64,
}

/// Deterministic scheduler: timers fire in due-time order, ties broken by the
/// order they were (re)armed.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now_ms: u64,
    next_handle: u32,
    next_seq: u64,
    pending: Vec<Pending>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    fn arm(&mut self, delay_ms: u32, every_ms: Option<u32>, timer: Timer) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + delay_ms as u64,
            every_ms,
            timer,
            seq,
        });
        handle
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to
    /// its due time. Repeating timers are re-armed one period later.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<(TimerHandle, Timer)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(i, _)| i)?;
        let due = self.pending[idx].due_ms;
        self.now_ms = self.now_ms.max(due);
        let entry = &mut self.pending[idx];
        let fired = (entry.handle, entry.timer);
        let every_ms = entry.every_ms;
        match every_ms {
            Some(every) => {
                entry.due_ms = due + every.max(1) as u64;
                entry.seq = self.next_seq;
                self.next_seq += 1;
            }
            None => {
                self.pending.remove(idx);
            }
        }
        Some(fired)
    }

    /// Move the clock forward to `until_ms` without firing anything.
    pub fn settle(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }
}

impl Scheduler for ManualClock {
    fn schedule_repeating(&mut self, every_ms: u32, timer: Timer) -> TimerHandle {
        let every = every_ms.max(1);
        self.arm(every, Some(every), timer)
    }

    fn schedule_once(&mut self, delay_ms: u32, timer: Timer) -> TimerHandle {
        self.arm(delay_ms, None, timer)
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|p| p.handle != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeating_timer_rearms() {
        let mut clock = ManualClock::new();
        let h = clock.schedule_repeating(30, Timer::ChargeTick);
        assert_eq!(clock.pop_due(29), None);
        assert_eq!(clock.pop_due(100), Some((h, Timer::ChargeTick)));
        assert_eq!(clock.now_ms(), 30);
        assert_eq!(clock.pop_due(100), Some((h, Timer::ChargeTick)));
        assert_eq!(clock.pop_due(100), Some((h, Timer::ChargeTick)));
        assert_eq!(clock.now_ms(), 90);
        assert_eq!(clock.pop_due(100), None);
        clock.cancel(h);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn ties_fire_in_arming_order() {
        let mut clock = ManualClock::new();
        let a = clock.schedule_once(10, Timer::AutoAdvance);
        let b = clock.schedule_once(10, Timer::ChargeTick);
        assert_eq!(clock.pop_due(10).map(|f| f.0), Some(a));
        assert_eq!(clock.pop_due(10).map(|f| f.0), Some(b));
    }

    #[test]
    fn zero_delay_fires_without_advancing() {
        let mut clock = ManualClock::new();
        clock.settle(500);
        let h = clock.schedule_once(0, Timer::AutoAdvance);
        assert_eq!(clock.pop_due(500), Some((h, Timer::AutoAdvance)));
        assert_eq!(clock.now_ms(), 500);
    }
}
