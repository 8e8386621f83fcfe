use enum_map::{Enum, EnumMap};
use std::time::Duration;

/// Everything in a game that happens after a delay.  When several timers are
/// due at the same instant, they fire in declaration order.
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Timer {
    /// A slow-down effect runs out
    SlowEffectEnd,

    /// An uneaten golden apple vanishes
    GoldenAppleExpiry,

    /// An uneaten slow-down power-up vanishes
    SlowDownExpiry,

    /// The snake takes a step
    Tick,
}

/// A virtual clock plus one optional deadline per [`Timer`].
///
/// Time only moves when a due timer is popped, so every timer is handled at
/// exactly its deadline and in a well-defined order regardless of how
/// irregularly the caller advances real time.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scheduler {
    now: Duration,
    deadlines: EnumMap<Timer, Option<Duration>>,
}

impl Scheduler {
    pub(crate) fn new() -> Scheduler {
        Scheduler::default()
    }

    /// Virtual time elapsed since the scheduler was created
    pub(crate) fn now(&self) -> Duration {
        self.now
    }

    /// Set `timer` to fire `delay` from now, replacing any deadline it
    /// already had
    pub(crate) fn arm(&mut self, timer: Timer, delay: Duration) {
        self.deadlines[timer] = Some(self.now + delay);
    }

    pub(crate) fn cancel(&mut self, timer: Timer) {
        self.deadlines[timer] = None;
    }

    pub(crate) fn cancel_all(&mut self) {
        self.deadlines.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&self, timer: Timer) -> bool {
        self.deadlines[timer].is_some()
    }

    #[cfg(test)]
    pub(crate) fn deadline(&self, timer: Timer) -> Option<Duration> {
        self.deadlines[timer]
    }

    /// The earliest pending deadline, if any
    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.deadlines.values().flatten().min().copied()
    }

    /// If some timer is due at or before `until`, disarm the earliest one,
    /// move the clock to its deadline, and return it.  Otherwise move the
    /// clock to `until` (if that is later than now) and return `None`.
    pub(crate) fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        let mut due: Option<(Timer, Duration)> = None;
        for (timer, &deadline) in &self.deadlines {
            let Some(deadline) = deadline.filter(|&d| d <= until) else {
                continue;
            };
            if due.is_none_or(|(_, best)| deadline < best) {
                due = Some((timer, deadline));
            }
        }
        match due {
            Some((timer, deadline)) => {
                self.deadlines[timer] = None;
                self.now = self.now.max(deadline);
                Some(timer)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}
