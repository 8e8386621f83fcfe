use super::grid::{Cell, Grid};
use crate::consts;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum PowerUpKind {
    /// Worth extra points; does not make the snake grow
    GoldenApple,

    /// Temporarily slows the snake down
    SlowDown,
}

impl PowerUpKind {
    /// How long an uneaten power-up of this kind stays on the board
    pub(crate) fn lifetime(self) -> Duration {
        match self {
            PowerUpKind::GoldenApple => consts::GOLDEN_APPLE_LIFETIME,
            PowerUpKind::SlowDown => consts::SLOW_DOWN_LIFETIME,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct PowerUp {
    pub(crate) kind: PowerUpKind,
    pub(crate) cell: Cell,
}

/// Picks positions for food & power-ups and decides when a power-up may
/// appear.
///
/// Positions are drawn uniformly from the whole board without regard for
/// what already occupies them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Spawner<R> {
    rng: R,
    grid: Grid,

    /// When the most recent power-up appeared (or the start of the game)
    last_spawn: Duration,

    /// Whether a power-up is currently on the board.  While set, no new
    /// power-up may appear.
    available: bool,
}

impl<R: Rng> Spawner<R> {
    pub(crate) fn new(grid: Grid, rng: R) -> Spawner<R> {
        Spawner {
            rng,
            grid,
            last_spawn: Duration::ZERO,
            available: false,
        }
    }

    pub(crate) fn random_cell(&mut self) -> Cell {
        let x = self.rng.random_range(0..self.grid.width);
        let y = self.rng.random_range(0..self.grid.height);
        Cell::new(x, y)
    }

    /// If a power-up may appear at time `now`, choose one and return it.
    /// Nothing is recorded until it is placed with [`Spawner::record_spawn()`].
    pub(crate) fn maybe_spawn(&mut self, now: Duration) -> Option<PowerUp> {
        if !self.eligible(now) {
            return None;
        }
        let kind = if self.rng.random_bool(0.5) {
            PowerUpKind::GoldenApple
        } else {
            PowerUpKind::SlowDown
        };
        let cell = self.random_cell();
        Some(PowerUp { kind, cell })
    }

    /// Record that a power-up was put on the board at time `now`
    pub(crate) fn record_spawn(&mut self, now: Duration) {
        self.available = true;
        self.last_spawn = now;
    }

    pub(crate) fn eligible(&self, now: Duration) -> bool {
        now >= consts::POWER_UP_WARMUP
            && now.saturating_sub(self.last_spawn) >= consts::POWER_UP_INTERVAL
            && !self.available
    }

    /// Record that the power-up on the board has been eaten or has expired
    pub(crate) fn clear_available(&mut self) {
        self.available = false;
    }

    #[cfg(test)]
    pub(crate) fn is_available(&self) -> bool {
        self.available
    }
}
