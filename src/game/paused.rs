use crate::command::Command;
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
use std::time::Duration;

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,

    /// Play time on the clock when the game was paused
    play_time: Duration,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = 4 + PauseOpt::LENGTH as u16;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 24;

    pub(super) fn new(play_time: Duration) -> Paused {
        Paused {
            selection: PauseOpt::min(),
            play_time,
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Esc | Command::P => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::M => return Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
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
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            _ => (),
        }
        None
    }

    fn play_time_line(self) -> Line<'static> {
        let secs = self.play_time.as_secs();
        Line::from(format!("Play time: {}:{:02}", secs / 60, secs % 60))
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    /// Unpause/resume the game
    Resume,

    /// Abandon this game and start a new one at the same difficulty
    Restart,

    /// Return to the main menu
    MainMenu,

    /// Quit the application
    Quit,
}

impl PauseOpt {
    fn to_line(self, selected: bool) -> Line<'static> {
        match self {
            PauseOpt::Resume => option_line("Resume", "p", selected),
            PauseOpt::Restart => option_line("Restart", "r", selected),
            PauseOpt::MainMenu => option_line("Main Menu", "m", selected),
            PauseOpt::Quit => option_line("Quit", "q", selected),
        }
    }
}

impl Widget for Paused {
    /*
     * ┌─────── PAUSED ───────┐
     * │ Play time: 1:05      │
     * │                      │
     * │ » Resume (p)         │
     * │   Restart (r)        │
     * │   Main Menu (m)      │
     * │   Quit (q)           │
     * └──────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let lines = [self.play_time_line(), Line::default()]
            .into_iter()
            .chain(PauseOpt::iter().map(|opt| opt.to_line(self.selection == opt)));
        for (line, row) in lines.zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
