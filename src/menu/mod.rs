mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use tracing::debug;

/// The start screen: pick a difficulty, then play or quit
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MainMenu {
    selection: Selection,
    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        MainMenu {
            selection: Selection::default(),
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let difficulty = self.globals.difficulty;
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.selection = Selection::min(),
            (_, Command::End) => self.selection = Selection::max(),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => {
                return Some(Screen::Game(self.play()))
            }
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit)
            }
            (Selection::Difficulty, Command::Left) => {
                if let Some(d) = difficulty.prev() {
                    self.set_difficulty(d);
                }
            }
            (Selection::Difficulty, Command::Right) => {
                if let Some(d) = difficulty.next() {
                    self.set_difficulty(d);
                }
            }
            (Selection::Difficulty, Command::Enter) => {
                self.set_difficulty(difficulty.next().unwrap_or_else(Difficulty::min));
            }
            (_, Command::Up) => {
                if let Some(sel) = self.selection.prev() {
                    self.selection = sel;
                }
            }
            (_, Command::Down) => {
                if let Some(sel) = self.selection.next() {
                    self.selection = sel;
                }
            }
            (_, Command::Next) => {
                self.selection = self.selection.next().unwrap_or_else(Selection::min);
            }
            (_, Command::Prev) => {
                self.selection = self.selection.prev().unwrap_or_else(Selection::max);
            }
            _ => (),
        }
        None
    }

    fn play(&self) -> Game {
        Game::new(self.globals.clone())
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        debug!(%difficulty, "Difficulty selected");
        self.globals.difficulty = difficulty;
    }

    fn button(&self, label: &'static str, key: &'static str, sel: Selection) -> Line<'static> {
        let style = if self.selection == sel {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::from_iter([
            Span::styled(format!("[{label} ("), style),
            Span::styled(key, consts::KEY_STYLE.patch(style)),
            Span::styled(")]", style),
        ])
        .centered()
    }

    fn difficulty_selector(&self) -> Line<'static> {
        let style = if self.selection == Selection::Difficulty {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        let difficulty = self.globals.difficulty;
        let left = if difficulty.prev().is_some() { "◀" } else { " " };
        let right = if difficulty.next().is_some() { "▶" } else { " " };
        Line::from_iter([
            Span::styled("Difficulty: ", style),
            Span::styled(left, consts::KEY_STYLE.patch(style)),
            Span::styled(
                format!(
                    " {difficulty:^width$} ",
                    width = usize::from(Difficulty::DISPLAY_WIDTH)
                ),
                style,
            ),
            Span::styled(right, consts::KEY_STYLE.patch(style)),
        ])
        .centered()
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, difficulty_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        self.button("Play", "p", Selection::PlayButton)
            .render(play_area, buf);
        self.difficulty_selector().render(difficulty_area, buf);
        self.button("Quit", "q", Selection::QuitButton)
            .render(quit_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Difficulty,
    QuitButton,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect()
    }

    fn press(menu: &mut MainMenu, code: KeyCode) -> Option<Screen> {
        menu.handle_event(Event::Key(code.into()))
    }

    #[test]
    fn draw_initial() {
        let menu = MainMenu::new(Globals::default());
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        menu.render(area, &mut buffer);
        assert_eq!(row(&buffer, 6).trim(), "██████▶  ● +10   ◉ +30   ◎ slow");
        assert_eq!(row(&buffer, 8).trim(), "Move the snake with:");
        assert_eq!(row(&buffer, 14).trim(), "[Play (p)]");
        assert_eq!(row(&buffer, 16).trim(), "Difficulty: ◀ Medium ▶");
        assert_eq!(row(&buffer, 18).trim(), "[Quit (q)]");
        let play_x = row(&buffer, 14).chars().position(|c| c == '[').unwrap();
        let play_x = u16::try_from(play_x).unwrap();
        assert_eq!(buffer[(play_x, 14)].modifier, consts::MENU_SELECTION_STYLE.add_modifier);
    }

    #[test]
    fn draw_easiest() {
        let globals = Globals {
            difficulty: Difficulty::Easy,
            ..Globals::default()
        };
        let menu = MainMenu::new(globals);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        menu.render(area, &mut buffer);
        assert_eq!(row(&buffer, 16).trim(), "Difficulty:    Easy  ▶");
    }

    #[test]
    fn select_difficulty() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::Left).is_none());
        assert_eq!(menu.globals.difficulty, Difficulty::Medium);
        assert!(press(&mut menu, KeyCode::Down).is_none());
        assert_eq!(menu.selection, Selection::Difficulty);
        assert!(press(&mut menu, KeyCode::Right).is_none());
        assert_eq!(menu.globals.difficulty, Difficulty::Hard);
        assert!(press(&mut menu, KeyCode::Right).is_none());
        assert_eq!(menu.globals.difficulty, Difficulty::Hard);
        assert!(press(&mut menu, KeyCode::Enter).is_none());
        assert_eq!(menu.globals.difficulty, Difficulty::Easy);
        assert!(press(&mut menu, KeyCode::Left).is_none());
        assert_eq!(menu.globals.difficulty, Difficulty::Easy);
    }

    #[test]
    fn play() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            Some(Screen::Game(_))
        ));
        assert!(matches!(
            press(&mut menu, KeyCode::Char('p')),
            Some(Screen::Game(_))
        ));
    }

    #[test]
    fn quit() {
        let mut menu = MainMenu::new(Globals::default());
        assert!(press(&mut menu, KeyCode::End).is_none());
        assert_eq!(menu.selection, Selection::QuitButton);
        assert!(matches!(press(&mut menu, KeyCode::Enter), Some(Screen::Quit)));
        assert!(press(&mut menu, KeyCode::Tab).is_none());
        assert_eq!(menu.selection, Selection::PlayButton);
        assert!(matches!(
            press(&mut menu, KeyCode::Char('q')),
            Some(Screen::Quit)
        ));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(menu.handle_event(ctrl_c), Some(Screen::Quit)));
    }
}
