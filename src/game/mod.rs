mod direction;
mod grid;
mod over;
mod paused;
mod scheduler;
mod session;
mod snake;
mod spawner;
mod speed;
use self::direction::Direction;
use self::grid::{Cell, Grid};
use self::over::{GameOver, OverOpt};
use self::paused::{PauseOpt, Paused};
use self::session::{Notification, Session};
use self::spawner::PowerUpKind;
use crate::app::Screen;
use crate::audio::Cue;
use crate::command::Command;
use crate::consts;
use crate::menu::MainMenu;
use crate::util::{center_rect, get_display_area, Globals};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    session: Session<R>,
    state: GameState,
    clock: PlayClock,
    globals: Globals,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, rng: R) -> Game<R> {
        Game {
            session: Session::new(globals.difficulty, rng),
            state: GameState::Running,
            clock: PlayClock::new(),
            globals,
        }
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.running() {
            self.clock.start();
            let now = self.clock.elapsed();
            // Wake up at least once per blink phase so the golden apple
            // keeps flashing between ticks
            let wait = self
                .session
                .next_deadline()
                .map_or(consts::BLINK_PERIOD, |d| d.saturating_sub(now))
                .min(consts::BLINK_PERIOD);
            if !wait.is_zero() && poll(wait)? {
                if let Some(screen) = self.handle_event(read()?) {
                    return Ok(Some(screen));
                }
            }
            if self.running() {
                let notes = self.session.advance(self.clock.elapsed());
                self.react(notes);
            }
            Ok(None)
        } else {
            Ok(self.handle_event(read()?))
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Turn the session's notifications into sounds and, at the end of the
    /// game, the game-over pop-up
    fn react(&mut self, notes: Vec<Notification>) {
        for note in notes {
            if let Some(cue) = cue_for(note) {
                self.globals.audio.cue(cue);
            }
            if let Notification::GameOver { score } = note {
                self.clock.stop();
                let (top, rank) = self.globals.scores.record(score);
                self.state = GameState::Over(GameOver::new(score, top, rank));
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit => return Some(Screen::Quit),
                        Command::Up => self.session.turn(Direction::Up),
                        Command::Left => self.session.turn(Direction::Left),
                        Command::Down => self.session.turn(Direction::Down),
                        Command::Right => self.session.turn(Direction::Right),
                        Command::Esc | Command::P => self.pause(),
                        _ => (),
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => self.state = GameState::Running,
                PauseOpt::Restart => return Some(Screen::Game(Game::new(self.globals.clone()))),
                PauseOpt::MainMenu => {
                    return Some(Screen::Main(MainMenu::new(self.globals.clone())))
                }
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            GameState::Over(ref mut over) => match over.handle_event(event)? {
                OverOpt::Retry => return Some(Screen::Game(Game::new(self.globals.clone()))),
                OverOpt::MainMenu => {
                    return Some(Screen::Main(MainMenu::new(self.globals.clone())))
                }
                OverOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        self.clock.stop();
        self.state = GameState::Paused(Paused::new(self.clock.elapsed()));
    }

    fn score_bar(&self) -> (Line<'static>, Line<'static>) {
        let left = Line::styled(
            format!(" Score: {}", self.session.score()),
            consts::SCORE_BAR_STYLE,
        );
        let mut right = Vec::new();
        if self.session.is_slowed() {
            right.push(Span::styled("SLOW", consts::SLOW_DOWN_STYLE));
        }
        right.push(Span::raw(format!(
            " Difficulty: {} ",
            self.session.difficulty()
        )));
        (left, Line::from(right).right_aligned())
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let (left, right) = self.score_bar();
        left.render(score_area, buf);
        right.render(score_area, buf);

        let grid = self.session.grid();
        let mut block_size = grid.display_size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            grid,
            buf,
        };
        let snake = self.session.snake();
        for &cell in snake.body() {
            board.draw_cell(
                cell,
                [consts::SNAKE_BODY_SYMBOL; 2],
                consts::SNAKE_STYLE,
            );
        }
        board.draw_cell(
            self.session.food(),
            [consts::FOOD_SYMBOL, ' '],
            consts::FOOD_STYLE,
        );
        if let Some(cell) = self.session.power_up(PowerUpKind::GoldenApple) {
            let style = if self.session.golden_apple_lit() {
                consts::GOLDEN_APPLE_STYLE
            } else {
                consts::GOLDEN_APPLE_DIM_STYLE
            };
            board.draw_cell(cell, [consts::GOLDEN_APPLE_SYMBOL, ' '], style);
        }
        if let Some(cell) = self.session.power_up(PowerUpKind::SlowDown) {
            board.draw_cell(
                cell,
                [consts::SLOW_DOWN_SYMBOL, ' '],
                consts::SLOW_DOWN_STYLE,
            );
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.session.is_over() {
            board.draw_cell(
                snake.head(),
                [consts::COLLISION_SYMBOL, ' '],
                consts::COLLISION_STYLE,
            );
        } else {
            board.draw_cell(snake.head(), [snake.head_symbol(), ' '], consts::SNAKE_STYLE);
        }

        match self.state {
            GameState::Running => (),
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            GameState::Over(ref over) => {
                Span::from(" GAME OVER").render(msg_area, buf);
                let over_area = center_rect(
                    display,
                    Size {
                        width: GameOver::WIDTH,
                        height: GameOver::HEIGHT,
                    },
                );
                over.render(over_area, buf);
            }
        }
    }
}

/// The sound to play for a notification, if any
fn cue_for(note: Notification) -> Option<Cue> {
    match note {
        Notification::FoodEaten => Some(Cue::Chomp),
        Notification::PowerUpAppeared(_)
        | Notification::PowerUpConsumed(PowerUpKind::GoldenApple) => Some(Cue::PowerUp),
        Notification::PowerUpConsumed(PowerUpKind::SlowDown)
        | Notification::PowerUpExpired(_)
        | Notification::ScoreChanged(_)
        | Notification::SlowDownStarted
        | Notification::SlowDownEnded
        | Notification::GameOver { .. } => None,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    /// The board's interior
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Fill the terminal columns making up `cell` with `symbols`
    fn draw_cell(&mut self, cell: Cell, symbols: [char; 2], style: Style) {
        let Some(pos) = self.grid.to_position(cell) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (dx, symbol) in (0u16..).zip(symbols) {
            let Some(x) = self
                .area
                .x
                .checked_add(pos.x)
                .and_then(|x| x.checked_add(dx))
            else {
                return;
            };
            if let Some(c) = self.buf.cell_mut((x, y)) {
                c.set_char(symbol);
                c.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    /// Play time does not advance while paused
    Paused(Paused),
    Over(GameOver),
}

/// Wall-clock time spent playing, excluding time spent paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PlayClock {
    banked: Duration,
    running_since: Option<Instant>,
}

impl PlayClock {
    fn new() -> PlayClock {
        PlayClock {
            banked: Duration::ZERO,
            running_since: None,
        }
    }

    fn elapsed(&self) -> Duration {
        self.banked + self.running_since.map_or(Duration::ZERO, |t| t.elapsed())
    }

    fn start(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn stop(&mut self) {
        if let Some(t) = self.running_since.take() {
            self.banked += t.elapsed();
        }
    }
}
