use crate::command::Command;
use crate::consts;
use crate::highscores::TopScores;
use crate::util::{option_line, EnumExt};
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pop-up shown when the snake dies: final score, the top score table
/// with the just-played score highlighted, and what to do next
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    score: u32,
    top: TopScores,
    /// Index into `top` of the just-played score, if it made the table
    rank: Option<usize>,
    selection: OverOpt,
}

impl GameOver {
    /// The height that should be used for the `Rect` passed to
    /// `GameOver::render()`
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = 9 + consts::TOP_SCORES_LEN as u16;

    /// The width that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const WIDTH: u16 = 28;

    pub(super) fn new(score: u32, top: TopScores, rank: Option<usize>) -> GameOver {
        GameOver {
            score,
            top,
            rank,
            selection: OverOpt::min(),
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<OverOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::R => return Some(OverOpt::Retry),
            Command::M | Command::Esc => return Some(OverOpt::MainMenu),
            Command::Q | Command::Quit => return Some(OverOpt::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(OverOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(OverOpt::max),
            Command::Home => self.selection = OverOpt::min(),
            Command::End => self.selection = OverOpt::max(),
            _ => (),
        }
        None
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(format!("Total Score: {}", self.score)),
            Line::default(),
            Line::from("Top Scores:"),
        ];
        for i in 0..consts::TOP_SCORES_LEN {
            let line = match self.top.scores().get(i) {
                Some(s) => Line::from(format!("  Rank {}: {s}", i + 1)),
                None => Line::from(format!("  Rank {}: -", i + 1)),
            };
            if self.rank == Some(i) {
                lines.push(line.style(consts::CURRENT_SCORE_STYLE));
            } else {
                lines.push(line);
            }
        }
        lines.push(Line::default());
        lines.extend(OverOpt::iter().map(|opt| opt.to_line(self.selection == opt)));
        lines
    }
}

/// The choices in the game-over pop-up
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum OverOpt {
    /// Start a new game at the same difficulty
    Retry,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl OverOpt {
    fn to_line(self, selected: bool) -> Line<'static> {
        match self {
            OverOpt::Retry => option_line("Retry", "r", selected),
            OverOpt::MainMenu => option_line("Main Menu", "m", selected),
            OverOpt::Quit => option_line("Quit", "q", selected),
        }
    }
}

impl Widget for &GameOver {
    /*
     * ┌─────── GAME OVER ────────┐
     * │ Total Score: 40          │
     * │                          │
     * │ Top Scores:              │
     * │   Rank 1: 120            │
     * │   Rank 2: 40             │
     * │   Rank 3: 10             │
     * │                          │
     * │ » Retry (r)              │
     * │   Main Menu (m)          │
     * │   Quit (q)               │
     * └──────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        for (line, row) in self.lines().into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
