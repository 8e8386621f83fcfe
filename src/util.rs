use crate::audio::Audio;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::highscores::ScoreFile;
use enum_map::Enum;
use ratatui::{
    layout::{Flex, Layout, Rect, Size},
    text::{Line, Span},
};

/// State shared between screens for the life of the program
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Globals {
    /// Difficulty of the next game to be started
    pub(crate) difficulty: Difficulty,
    pub(crate) audio: Audio,
    pub(crate) scores: ScoreFile,
}

impl Default for Globals {
    fn default() -> Globals {
        Globals {
            difficulty: Difficulty::default(),
            audio: Audio::new(false),
            scores: ScoreFile::new(None, false),
        }
    }
}

/// Navigation helpers for fieldless enums used as menu items
pub(crate) trait EnumExt: Enum + Sized {
    fn min() -> Self {
        Self::from_usize(0)
    }

    fn max() -> Self {
        Self::from_usize(Self::LENGTH - 1)
    }

    fn next(self) -> Option<Self> {
        let i = self.into_usize() + 1;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    fn prev(self) -> Option<Self> {
        self.into_usize().checked_sub(1).map(Self::from_usize)
    }

    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    center_rect(buffer_area, consts::DISPLAY_SIZE)
}

/// Return a `Rect` of the given size centered within `area`.  If `area` is
/// smaller than `size` in a dimension, the result is clipped to `area` in
/// that dimension.
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [area] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(area);
    area
}

/// Render a pop-up menu choice as `» Label (k)`, with the pointer and
/// highlighting only present when `selected` is true
pub(crate) fn option_line(label: &'static str, key: &'static str, selected: bool) -> Line<'static> {
    let line = Line::from_iter([
        Span::raw(if selected { "» " } else { "  " }),
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ]);
    if selected {
        line.style(consts::MENU_SELECTION_STYLE)
    } else {
        line
    }
}
