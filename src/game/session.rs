use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::scheduler::{Scheduler, Timer};
use super::snake::Snake;
use super::spawner::{PowerUp, PowerUpKind, Spawner};
use super::speed::SpeedController;
use crate::consts;
use crate::difficulty::Difficulty;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info};

/// Something that happened during [`Session::advance()`] that the outside
/// world may want to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Notification {
    ScoreChanged(u32),
    FoodEaten,
    PowerUpAppeared(PowerUpKind),
    PowerUpConsumed(PowerUpKind),
    PowerUpExpired(PowerUpKind),
    SlowDownStarted,
    SlowDownEnded,
    GameOver { score: u32 },
}

/// The complete state of one game, from start to game over.
///
/// A `Session` does no I/O and never reads a real clock: the caller tells it
/// how much play time has elapsed via [`Session::advance()`], and it reports
/// what happened as a list of [`Notification`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Session<R = rand::rngs::ThreadRng> {
    grid: Grid,
    difficulty: Difficulty,
    snake: Snake,
    food: Cell,
    golden_apple: Option<Cell>,
    slow_down: Option<Cell>,
    score: u32,
    speed: SpeedController,
    spawner: Spawner<R>,
    scheduler: Scheduler,
    over: bool,
}

impl<R: Rng> Session<R> {
    pub(crate) fn new(difficulty: Difficulty, rng: R) -> Session<R> {
        let grid = Grid::default();
        let mut spawner = Spawner::new(grid, rng);
        let food = spawner.random_cell();
        let (x, y) = consts::SNAKE_START;
        let speed = SpeedController::new(difficulty);
        let mut scheduler = Scheduler::new();
        scheduler.arm(Timer::Tick, speed.period());
        info!(%difficulty, "Starting new game");
        Session {
            grid,
            difficulty,
            snake: Snake::new(Cell::new(x, y), Direction::Right),
            food,
            golden_apple: None,
            slow_down: None,
            score: 0,
            speed,
            spawner,
            scheduler,
            over: false,
        }
    }

    /// Run the game forwards until `now` (play time since the start of the
    /// game), firing every timer that comes due on the way in order
    pub(crate) fn advance(&mut self, now: Duration) -> Vec<Notification> {
        let mut notes = Vec::new();
        while let Some(timer) = self.scheduler.pop_due(now) {
            match timer {
                Timer::Tick => self.tick(&mut notes),
                Timer::GoldenAppleExpiry => self.expire(PowerUpKind::GoldenApple, &mut notes),
                Timer::SlowDownExpiry => self.expire(PowerUpKind::SlowDown, &mut notes),
                Timer::SlowEffectEnd => self.end_slow_down(&mut notes),
            }
        }
        notes
    }

    /// Move the snake one step and resolve whatever it runs into
    fn tick(&mut self, notes: &mut Vec<Notification>) {
        let head = self.snake.next_head();
        if !self.grid.contains(head) || self.snake.contains(head) {
            self.scheduler.cancel_all();
            self.over = true;
            info!(score = self.score, "Game over");
            notes.push(Notification::GameOver { score: self.score });
            return;
        }
        self.snake.push_head(head);
        if head == self.food {
            self.score += consts::FOOD_POINTS;
            self.food = self.spawner.random_cell();
            if self.speed.on_food_eaten() {
                debug!(interval = ?self.speed.interval(), "Speeding up");
            }
            notes.push(Notification::FoodEaten);
            notes.push(Notification::ScoreChanged(self.score));
        } else if self.golden_apple == Some(head) {
            self.take_power_up(PowerUpKind::GoldenApple);
            self.score += consts::GOLDEN_APPLE_POINTS;
            self.snake.drop_tail();
            notes.push(Notification::PowerUpConsumed(PowerUpKind::GoldenApple));
            notes.push(Notification::ScoreChanged(self.score));
        } else if self.slow_down == Some(head) {
            self.take_power_up(PowerUpKind::SlowDown);
            self.snake.drop_tail();
            notes.push(Notification::PowerUpConsumed(PowerUpKind::SlowDown));
            if self.speed.start_slow() {
                self.scheduler.arm(Timer::SlowEffectEnd, consts::SLOW_DOWN_DURATION);
                debug!(period = ?self.speed.period(), "Slow-down started");
                notes.push(Notification::SlowDownStarted);
            }
        } else {
            self.snake.drop_tail();
        }
        if let Some(pu) = self.spawner.maybe_spawn(self.scheduler.now()) {
            self.place_power_up(pu, notes);
        }
        self.scheduler.arm(Timer::Tick, self.speed.period());
    }

    fn place_power_up(&mut self, pu: PowerUp, notes: &mut Vec<Notification>) {
        debug!(kind = ?pu.kind, x = pu.cell.x, y = pu.cell.y, "Power-up appeared");
        *self.power_up_slot(pu.kind) = Some(pu.cell);
        self.spawner.record_spawn(self.scheduler.now());
        self.scheduler.arm(expiry_timer(pu.kind), pu.kind.lifetime());
        notes.push(Notification::PowerUpAppeared(pu.kind));
    }

    /// Remove an eaten power-up from the board along with its pending expiry
    fn take_power_up(&mut self, kind: PowerUpKind) {
        *self.power_up_slot(kind) = None;
        self.scheduler.cancel(expiry_timer(kind));
        self.spawner.clear_available();
    }

    fn expire(&mut self, kind: PowerUpKind, notes: &mut Vec<Notification>) {
        if self.power_up_slot(kind).take().is_some() {
            debug!(?kind, "Power-up expired");
            notes.push(Notification::PowerUpExpired(kind));
        }
        self.spawner.clear_available();
    }

    fn end_slow_down(&mut self, notes: &mut Vec<Notification>) {
        self.speed.end_slow();
        self.scheduler.arm(Timer::Tick, self.speed.period());
        debug!(interval = ?self.speed.interval(), "Slow-down ended");
        notes.push(Notification::SlowDownEnded);
    }
}

impl<R> Session<R> {
    /// Steer the snake.  Has no effect once the game is over.
    pub(crate) fn turn(&mut self, direction: Direction) {
        if !self.over {
            self.snake.turn(direction);
        }
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Cell {
        self.food
    }

    pub(crate) fn power_up(&self, kind: PowerUpKind) -> Option<Cell> {
        match kind {
            PowerUpKind::GoldenApple => self.golden_apple,
            PowerUpKind::SlowDown => self.slow_down,
        }
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn is_over(&self) -> bool {
        self.over
    }

    pub(crate) fn is_slowed(&self) -> bool {
        self.speed.is_slowed()
    }

    /// Current tick interval, not counting any slow-down
    pub(crate) fn interval(&self) -> Duration {
        self.speed.interval()
    }

    /// Play time the session has been advanced to
    pub(crate) fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Play time at which something will next happen, if anything is
    /// pending
    pub(crate) fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Whether the golden apple is in the visible phase of its blinking.
    /// The phase follows the session clock rather than the tick rate.
    pub(crate) fn golden_apple_lit(&self) -> bool {
        (self.now().as_millis() / consts::BLINK_PERIOD.as_millis()) % 2 == 0
    }

    fn power_up_slot(&mut self, kind: PowerUpKind) -> &mut Option<Cell> {
        match kind {
            PowerUpKind::GoldenApple => &mut self.golden_apple,
            PowerUpKind::SlowDown => &mut self.slow_down,
        }
    }
}

fn expiry_timer(kind: PowerUpKind) -> Timer {
    match kind {
        PowerUpKind::GoldenApple => Timer::GoldenAppleExpiry,
        PowerUpKind::SlowDown => Timer::SlowDownExpiry,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_session(difficulty: Difficulty) -> Session<ChaCha12Rng> {
        let mut session = Session::new(difficulty, ChaCha12Rng::seed_from_u64(RNG_SEED));
        // Keep the food out of the way unless a test puts it somewhere
        session.food = Cell::new(0, 0);
        session
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn initial_state() {
        let session = Session::new(Difficulty::Medium, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().segments(), 1);
        assert_eq!(session.snake().head(), Cell::new(9, 9));
        assert!(session.grid().contains(session.food()));
        assert_eq!(session.next_deadline(), Some(ms(300)));
        assert!(!session.is_over());
        assert!(!session.is_slowed());
    }

    #[test]
    fn nothing_happens_before_first_tick() {
        let mut session = new_session(Difficulty::Medium);
        assert!(session.advance(ms(299)).is_empty());
        assert_eq!(session.snake().head(), Cell::new(9, 9));
        assert!(session.advance(ms(300)).is_empty());
        assert_eq!(session.snake().head(), Cell::new(10, 9));
        assert_eq!(session.next_deadline(), Some(ms(600)));
    }

    #[test]
    fn several_ticks_in_one_advance() {
        let mut session = new_session(Difficulty::Easy);
        assert!(session.advance(ms(1600)).is_empty());
        assert_eq!(session.snake().head(), Cell::new(12, 9));
        assert_eq!(session.now(), ms(1600));
        assert_eq!(session.next_deadline(), Some(ms(2000)));
    }

    #[test]
    fn eat_food() {
        let mut session = new_session(Difficulty::Medium);
        session.food = Cell::new(10, 9);
        let notes = session.advance(ms(300));
        assert_eq!(
            notes,
            [Notification::FoodEaten, Notification::ScoreChanged(10)]
        );
        assert_eq!(session.score(), 10);
        assert_eq!(session.snake().segments(), 2);
        assert_eq!(
            session.snake().cells().collect::<Vec<_>>(),
            [Cell::new(10, 9), Cell::new(9, 9)]
        );
        assert!(session.grid().contains(session.food()));
        assert_eq!(session.interval(), ms(295));
        assert_eq!(session.next_deadline(), Some(ms(595)));
    }

    #[test]
    fn eat_golden_apple() {
        let mut session = new_session(Difficulty::Medium);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::GoldenApple,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        assert_eq!(
            notes,
            [Notification::PowerUpAppeared(PowerUpKind::GoldenApple)]
        );
        assert_eq!(
            session.advance(ms(300)),
            [
                Notification::PowerUpConsumed(PowerUpKind::GoldenApple),
                Notification::ScoreChanged(30),
            ]
        );
        assert_eq!(session.score(), 30);
        assert_eq!(session.snake().segments(), 1);
        assert_eq!(session.power_up(PowerUpKind::GoldenApple), None);
        assert!(!session.scheduler.is_armed(Timer::GoldenAppleExpiry));
        assert_eq!(session.interval(), ms(300));
    }

    #[test]
    fn eat_slow_down() {
        let mut session = new_session(Difficulty::Hard);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::SlowDown,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        assert_eq!(
            session.advance(ms(150)),
            [
                Notification::PowerUpConsumed(PowerUpKind::SlowDown),
                Notification::SlowDownStarted,
            ]
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().segments(), 1);
        assert!(session.is_slowed());
        assert_eq!(session.power_up(PowerUpKind::SlowDown), None);
        assert!(!session.scheduler.is_armed(Timer::SlowDownExpiry));
        assert_eq!(session.next_deadline(), Some(ms(500)));
        assert_eq!(
            session.scheduler.deadline(Timer::SlowEffectEnd),
            Some(ms(7150))
        );
    }

    #[test]
    fn slow_down_reverts_to_interval_at_start() {
        let mut session = new_session(Difficulty::Medium);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::SlowDown,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        session.advance(ms(300));
        assert!(session.is_slowed());
        session.food = Cell::new(11, 9);
        assert_eq!(
            session.advance(ms(800)),
            [Notification::FoodEaten, Notification::ScoreChanged(10)]
        );
        assert_eq!(session.interval(), ms(295));
        // Slowed period is unaffected by the speed-up
        assert_eq!(session.next_deadline(), Some(ms(1300)));
        // Park the snake so it doesn't run into a wall while we wait
        session.scheduler.cancel(Timer::Tick);
        assert_eq!(session.advance(ms(7300)), [Notification::SlowDownEnded]);
        assert!(!session.is_slowed());
        assert_eq!(session.interval(), ms(300));
        assert_eq!(session.next_deadline(), Some(ms(7600)));
    }

    #[test]
    fn second_slow_down_does_not_stack() {
        let mut session = new_session(Difficulty::Medium);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::SlowDown,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        session.advance(ms(300));
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::SlowDown,
                cell: Cell::new(11, 9),
            },
            &mut notes,
        );
        assert_eq!(
            session.advance(ms(800)),
            [Notification::PowerUpConsumed(PowerUpKind::SlowDown)]
        );
        assert_eq!(
            session.scheduler.deadline(Timer::SlowEffectEnd),
            Some(ms(7300))
        );
    }

    #[test]
    fn food_may_spawn_under_snake() {
        // Food is drawn from the whole board, so some seeds put the first
        // food right on the starting cell
        let (x, y) = consts::SNAKE_START;
        let start = Cell::new(x, y);
        let mut session = (0..5000u64)
            .map(|seed| Session::new(Difficulty::Medium, ChaCha12Rng::seed_from_u64(seed)))
            .find(|s| s.food() == start)
            .expect("some seed should place food on the snake");
        assert!(session.snake().contains(session.food()));
        assert!(session.advance(ms(300)).is_empty());
        assert_eq!(session.food(), start);
        assert_eq!(session.score(), 0);
        assert_eq!(session.snake().head(), Cell::new(10, 9));
    }

    #[test]
    fn food_takes_precedence_over_power_up() {
        let mut session = new_session(Difficulty::Medium);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::GoldenApple,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        session.food = Cell::new(10, 9);
        assert_eq!(
            session.advance(ms(300)),
            [Notification::FoodEaten, Notification::ScoreChanged(10)]
        );
        assert_eq!(session.score(), 10);
        assert_eq!(
            session.power_up(PowerUpKind::GoldenApple),
            Some(Cell::new(10, 9))
        );
    }

    #[test]
    fn power_up_expires() {
        let mut session = new_session(Difficulty::Easy);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::GoldenApple,
                cell: Cell::new(0, 19),
            },
            &mut notes,
        );
        assert!(session.spawner.is_available());
        let notes = session.advance(ms(5000));
        assert_eq!(
            notes,
            [Notification::PowerUpExpired(PowerUpKind::GoldenApple)]
        );
        assert_eq!(session.power_up(PowerUpKind::GoldenApple), None);
        assert!(!session.spawner.is_available());
        // The expiry fired before the tick due at the same instant
        assert_eq!(session.snake().head(), Cell::new(19, 9));
    }

    #[test]
    fn slow_down_expires() {
        let mut session = new_session(Difficulty::Easy);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::SlowDown,
                cell: Cell::new(0, 19),
            },
            &mut notes,
        );
        assert!(session.spawner.is_available());
        assert_eq!(
            session.scheduler.deadline(Timer::SlowDownExpiry),
            Some(ms(5000))
        );
        assert!(!session.scheduler.is_armed(Timer::GoldenAppleExpiry));
        assert_eq!(
            session.advance(ms(5000)),
            [Notification::PowerUpExpired(PowerUpKind::SlowDown)]
        );
        assert_eq!(session.power_up(PowerUpKind::SlowDown), None);
        assert!(!session.spawner.is_available());
        assert!(!session.is_slowed());
    }

    #[test]
    fn eaten_power_up_is_not_expired_later() {
        let mut session = new_session(Difficulty::Medium);
        let mut notes = Vec::new();
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::GoldenApple,
                cell: Cell::new(10, 9),
            },
            &mut notes,
        );
        session.advance(ms(300));
        session.place_power_up(
            PowerUp {
                kind: PowerUpKind::GoldenApple,
                cell: Cell::new(0, 19),
            },
            &mut notes,
        );
        session.scheduler.cancel(Timer::Tick);
        // The first apple's expiry would have been at 5000
        let notes = session.advance(ms(5100));
        assert!(notes.is_empty());
        assert_eq!(
            session.power_up(PowerUpKind::GoldenApple),
            Some(Cell::new(0, 19))
        );
        assert_eq!(
            session.scheduler.deadline(Timer::GoldenAppleExpiry),
            Some(ms(5300))
        );
    }

    #[test]
    fn power_ups_after_warmup() {
        let mut session = new_session(Difficulty::Easy);
        // Run in a tight square so the snake never hits anything
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];
        let mut appeared = Vec::new();
        for i in 0..60u64 {
            session.turn(turns[usize::try_from(i % 4).unwrap()]);
            for note in session.advance(ms(500 * (i + 1))) {
                if let Notification::PowerUpAppeared(kind) = note {
                    appeared.push((i, kind));
                }
            }
            assert!(!session.is_over());
        }
        assert_eq!(appeared.len(), 1);
        assert_eq!(appeared[0].0, 59);
        assert!(session.power_up(appeared[0].1).is_some());
    }

    #[test]
    fn wall_collision() {
        let mut session = new_session(Difficulty::Medium);
        session.score = 40;
        session.snake = Snake::new(Cell::new(0, 9), Direction::Left);
        let notes = session.advance(ms(300));
        assert_eq!(notes, [Notification::GameOver { score: 40 }]);
        assert!(session.is_over());
        assert_eq!(session.next_deadline(), None);
        assert_eq!(session.snake().head(), Cell::new(0, 9));
        assert!(session.advance(ms(60_000)).is_empty());
    }

    #[test]
    fn self_collision() {
        let mut session = new_session(Difficulty::Medium);
        // A snake curled so that turning up runs into its own tail
        session.snake.head = Cell::new(5, 5);
        session.snake.body = [Cell::new(4, 5), Cell::new(4, 4), Cell::new(5, 4)].into();
        session.snake.heading = Direction::Right;
        session.snake.direction = Direction::Right;
        session.turn(Direction::Up);
        assert_eq!(
            session.advance(ms(300)),
            [Notification::GameOver { score: 0 }]
        );
    }

    #[test]
    fn no_turns_after_game_over() {
        let mut session = new_session(Difficulty::Medium);
        session.snake = Snake::new(Cell::new(19, 9), Direction::Right);
        session.advance(ms(300));
        session.turn(Direction::Up);
        assert_eq!(session.snake().next_head(), Cell::new(20, 9));
    }

    #[test]
    fn head_never_overlaps_body() {
        let mut turn_rng = ChaCha12Rng::seed_from_u64(42);
        let dirs = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for game in 0..20u64 {
            let mut session =
                Session::new(Difficulty::Hard, ChaCha12Rng::seed_from_u64(RNG_SEED + game));
            let mut t = 0;
            while !session.is_over() && t < 100_000 {
                if turn_rng.random_bool(0.3) {
                    session.turn(dirs[turn_rng.random_range(0..dirs.len())]);
                }
                t += 100;
                session.advance(ms(t));
                if !session.is_over() {
                    let cells = session.snake().cells().collect::<Vec<_>>();
                    let unique = cells.iter().collect::<HashSet<_>>();
                    assert_eq!(unique.len(), cells.len());
                    assert!(!session.snake().body().contains(&session.snake().head()));
                    assert!(session.interval() >= consts::SPEED_FLOOR);
                }
            }
        }
    }

    #[test]
    fn golden_apple_blinks_on_session_clock() {
        let mut session = new_session(Difficulty::Easy);
        assert!(session.golden_apple_lit());
        session.advance(ms(250));
        assert!(!session.golden_apple_lit());
        session.advance(ms(450));
        assert!(session.golden_apple_lit());
    }
}
