//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Key under which the high score is kept in the store
pub(crate) const HIGH_SCORE_KEY: &str = "high-score";

/// Interval at which the play-time counter increases
pub(crate) const ELAPSED_PERIOD: Duration = Duration::from_secs(1);

/// Shortest period a timer may be scheduled with
pub(crate) const MIN_TIMER_PERIOD: Duration = Duration::from_millis(1);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Horizontal gap between the board and the side panel
pub(crate) const PANEL_GAP: u16 = 2;

/// Colour of the snake's head
pub(crate) const SNAKE_HEAD_COLOR: Color = Color::LightGreen;

/// Colour of the rest of the snake
pub(crate) const SNAKE_BODY_COLOR: Color = Color::Green;

/// Colour of the cell where the snake crashed
pub(crate) const COLLISION_COLOR: Color = Color::White;

/// Colour of regular food
pub(crate) const REGULAR_FOOD_COLOR: Color = Color::Rgb(0xE7, 0x4C, 0x3C);

/// Colour of bonus food
pub(crate) const BONUS_FOOD_COLOR: Color = Color::Rgb(0xF3, 0x9C, 0x12);

/// Colour of super food
pub(crate) const SUPER_FOOD_COLOR: Color = Color::Rgb(0x9B, 0x59, 0xB6);

/// Glyph for a food sample in the side panel legend
pub(crate) const FOOD_SYMBOL: char = '●';

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for headings in the side panel
pub(crate) const HEADING_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Style for the numbers in the side panel
pub(crate) const VALUE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Glyph for a terminal cell whose upper grid cell is filled
pub(crate) const UPPER_HALF_BLOCK: &str = "▀";

/// Glyph for a terminal cell whose lower grid cell alone is filled
pub(crate) const LOWER_HALF_BLOCK: &str = "▄";
