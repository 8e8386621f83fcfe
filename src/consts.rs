//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of columns and rows on the board
pub(crate) const GRID_CELLS: i16 = 20;

/// Each grid cell is drawn this many terminal columns wide so that the board
/// looks roughly square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Column & row of the snake's single starting cell
pub(crate) const SNAKE_START: (i16, i16) = (9, 9);

/// Points awarded for eating the regular food
pub(crate) const FOOD_POINTS: u32 = 10;

/// Points awarded for eating a golden apple
pub(crate) const GOLDEN_APPLE_POINTS: u32 = 30;

/// The tick interval can never be sped up past this
pub(crate) const SPEED_FLOOR: Duration = Duration::from_millis(100);

/// Added to the tick interval while a slow-down is in effect
pub(crate) const SLOW_DOWN_DELTA: Duration = Duration::from_millis(200);

/// How long a slow-down lasts
pub(crate) const SLOW_DOWN_DURATION: Duration = Duration::from_secs(7);

/// No power-ups appear until the game has been running this long
pub(crate) const POWER_UP_WARMUP: Duration = Duration::from_secs(30);

/// Minimum time between two power-up appearances
pub(crate) const POWER_UP_INTERVAL: Duration = Duration::from_secs(15);

/// A golden apple vanishes if not eaten within this time
pub(crate) const GOLDEN_APPLE_LIFETIME: Duration = Duration::from_secs(5);

/// A slow-down power-up vanishes if not eaten within this time
pub(crate) const SLOW_DOWN_LIFETIME: Duration = Duration::from_secs(5);

/// Half-period of the golden apple's blinking
pub(crate) const BLINK_PERIOD: Duration = Duration::from_millis(200);

/// Number of entries kept in the high score table
pub(crate) const TOP_SCORES_LEN: usize = 3;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = '▲';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '▼';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '◀';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '▶';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '█';

/// Glyph for the regular food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the golden apple
pub(crate) const GOLDEN_APPLE_SYMBOL: char = '◉';

/// Glyph for the slow-down power-up
pub(crate) const SLOW_DOWN_SYMBOL: char = '◎';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::LightYellow);

/// Style for the regular food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for the golden apple during the "on" phase of its blinking
pub(crate) const GOLDEN_APPLE_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the golden apple during the "off" phase of its blinking
pub(crate) const GOLDEN_APPLE_DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the slow-down power-up
pub(crate) const SLOW_DOWN_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the just-played entry in the game-over score table
pub(crate) const CURRENT_SCORE_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);
