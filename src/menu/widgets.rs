use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::Widget,
};

/// The game's title, with a legend of what there is to eat underneath
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const POWER_WIDTH: u16 = 30;
    const SNAKE_WIDTH: u16 = 28;
    const TITLE_HEIGHT: u16 = 5;
    const SNAKE_LENGTH: usize = 6;
    pub(super) const HEIGHT: u16 = Self::TITLE_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::POWER_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const POWER: [&'static str; Self::TITLE_HEIGHT as usize] = [
         " ____                         ",
        r"|  _ \ _____      _____ _ __  ",
        r"| |_) / _ \ \ /\ / / _ \ '__| ",
        r"|  __/ (_) \ V  V /  __/ |    ",
        r"|_|   \___/ \_/\_/ \___|_|    ",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TITLE_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];

    /// A snake heading for each kind of edible, labelled with its effect
    fn legend() -> Line<'static> {
        let mut snake = consts::SNAKE_BODY_SYMBOL
            .to_string()
            .repeat(Self::SNAKE_LENGTH);
        snake.push(consts::SNAKE_HEAD_RIGHT_SYMBOL);
        Line::from_iter([
            Span::styled(snake, consts::SNAKE_STYLE),
            Span::raw("  "),
            Span::styled(consts::FOOD_SYMBOL.to_string(), consts::FOOD_STYLE),
            Span::raw(format!(" +{}   ", consts::FOOD_POINTS)),
            Span::styled(
                consts::GOLDEN_APPLE_SYMBOL.to_string(),
                consts::GOLDEN_APPLE_STYLE,
            ),
            Span::raw(format!(" +{}   ", consts::GOLDEN_APPLE_POINTS)),
            Span::styled(consts::SLOW_DOWN_SYMBOL.to_string(), consts::SLOW_DOWN_STYLE),
            Span::raw(" slow"),
        ])
        .centered()
    }
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut rows = area.rows();
        for (power, snake) in Self::POWER.into_iter().zip(Self::SNAKE) {
            let Some(row) = rows.next() else {
                return;
            };
            Line::from_iter([
                Span::styled(power, consts::GOLDEN_APPLE_STYLE),
                Span::styled(snake, consts::SNAKE_STYLE),
            ])
            .render(row, buf);
        }
        if let Some(row) = rows.nth(1) {
            Self::legend().render(row, buf);
        }
    }
}

/// How to play, shown under the logo
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 5;
    pub(super) const WIDTH: u16 = 20;
}

/// `prefix` followed by `keys` highlighted and separated by spaces
fn key_row(prefix: &'static str, keys: [&'static str; 4]) -> Line<'static> {
    let mut spans = vec![Span::raw(prefix)];
    for (i, key) in keys.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(key, consts::KEY_STYLE));
    }
    Line::from(spans)
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            key_row("       ", ["←", "↓", "↑", "→"]),
            key_row("   or: ", ["h", "j", "k", "l"]),
            key_row("   or: ", ["a", "s", "w", "d"]),
            Line::from_iter([
                Span::raw("  Pause: "),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(" or "),
                Span::styled("Esc", consts::KEY_STYLE),
            ]),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logo() {
        let area = Rect::new(0, 0, Logo::WIDTH, Logo::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Logo.render(area, &mut buffer);
        #[rustfmt::skip]
        let mut expected = Buffer::with_lines([
             " ____                          ____              _        ",
            r"|  _ \ _____      _____ _ __  / ___| _ __   __ _| | _____ ",
            r"| |_) / _ \ \ /\ / / _ \ '__| \___ \| '_ \ / _` | |/ / _ \",
            r"|  __/ (_) \ V  V /  __/ |     ___) | | | | (_| |   <  __/",
            r"|_|   \___/ \_/\_/ \___|_|    |____/|_| |_|\__,_|_|\_\___|",
             "",
             "             ██████▶  ● +10   ◉ +30   ◎ slow              ",
        ]);
        expected.set_style(Rect::new(0, 0, 30, 5), consts::GOLDEN_APPLE_STYLE);
        expected.set_style(Rect::new(30, 0, 28, 5), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(13, 6, 7, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(22, 6, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(30, 6, 1, 1), consts::GOLDEN_APPLE_STYLE);
        expected.set_style(Rect::new(38, 6, 1, 1), consts::SLOW_DOWN_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn logo_clipped_to_area() {
        let area = Rect::new(0, 0, Logo::WIDTH, 3);
        let mut buffer = Buffer::empty(area);
        Logo.render(area, &mut buffer);
        let bottom = (0..area.width)
            .map(|x| buffer[(x, 2)].symbol())
            .collect::<String>();
        assert!(bottom.starts_with(r"| |_) / _ \ \ /\ / / _ \ '__|"));
    }

    #[test]
    fn title_widths() {
        assert!(Logo::POWER
            .iter()
            .all(|ln| ln.len() == usize::from(Logo::POWER_WIDTH)));
        assert!(Logo::SNAKE
            .iter()
            .all(|ln| ln.len() == usize::from(Logo::SNAKE_WIDTH)));
    }

    #[test]
    fn instructions() {
        let area = Rect::new(0, 0, Instructions::WIDTH, Instructions::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Instructions.render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>();
        assert_eq!(
            rows,
            [
                "Move the snake with:",
                "       ← ↓ ↑ →      ",
                "   or: h j k l      ",
                "   or: a s w d      ",
                "  Pause: p or Esc   ",
            ]
        );
        assert_eq!(buffer[(7, 2)].fg, consts::KEY_STYLE.fg.unwrap());
        assert_eq!(buffer[(16, 4)].fg, consts::KEY_STYLE.fg.unwrap());
    }
}
