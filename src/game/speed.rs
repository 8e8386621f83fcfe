use crate::consts;
use crate::difficulty::Difficulty;
use std::time::Duration;

/// Tracks how often the snake moves
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct SpeedController {
    /// Current tick interval, not counting any slow-down
    interval: Duration,

    /// Amount by which `interval` shrinks each time food is eaten
    step: Duration,

    /// `interval` never drops below this
    floor: Duration,

    /// If a slow-down is in effect, the interval at the moment it began
    slowed_from: Option<Duration>,
}

impl SpeedController {
    pub(crate) fn new(difficulty: Difficulty) -> SpeedController {
        SpeedController {
            interval: difficulty.initial_interval(),
            step: difficulty.speed_step(),
            floor: consts::SPEED_FLOOR,
            slowed_from: None,
        }
    }

    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn is_slowed(&self) -> bool {
        self.slowed_from.is_some()
    }

    /// The period the loop timer should currently run at
    pub(crate) fn period(&self) -> Duration {
        match self.slowed_from {
            Some(base) => base + consts::SLOW_DOWN_DELTA,
            None => self.interval,
        }
    }

    /// Speed up in response to eating food.  Returns `true` if the interval
    /// changed.
    pub(crate) fn on_food_eaten(&mut self) -> bool {
        if self.step.is_zero() {
            return false;
        }
        let before = self.interval;
        self.interval = self.interval.saturating_sub(self.step).max(self.floor);
        self.interval != before
    }

    /// Begin a slow-down.  Returns `false` (and does nothing) if one is
    /// already in effect.
    pub(crate) fn start_slow(&mut self) -> bool {
        if self.slowed_from.is_some() {
            return false;
        }
        self.slowed_from = Some(self.interval);
        true
    }

    /// End the current slow-down, putting the interval back to what it was
    /// when the slow-down began.  Any speed-up gained in the meantime is
    /// discarded.
    pub(crate) fn end_slow(&mut self) {
        if let Some(base) = self.slowed_from.take() {
            self.interval = base;
        }
    }
}
