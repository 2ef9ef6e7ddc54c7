use ratatui::style::Color;
use ratatui::symbols::border;

use crate::food::FoodColor;

/// Half extent of the square playfield; the head dies beyond `±PLAYFIELD_HALF_EXTENT`.
pub const PLAYFIELD_HALF_EXTENT: i32 = 290;

/// Distance one head step covers.
pub const GRID_STEP: i32 = 20;

/// Distance under which the head touches food or its own body.
pub const COLLISION_RADIUS: f64 = 20.0;

/// Food is placed inside `±FOOD_SPAWN_EXTENT` so it never sits on the wall line.
pub const FOOD_SPAWN_EXTENT: i32 = 270;

/// Number of food items on the field at any time.
pub const FOOD_COUNT: usize = 3;

/// Number of segments a fresh snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Seconds per tick for an unaffected snake.
pub const BASE_SPEED_SECS: f64 = 0.1;

/// High-fat food slows the snake by this factor.
pub const HIGH_FAT_SPEED_FACTOR: f64 = 1.5;

/// Slowest per-effect floor applied after a high-fat meal.
pub const HIGH_FAT_MIN_SPEED_SECS: f64 = 0.05;

/// How long a high-fat slowdown lasts, in seconds.
pub const HIGH_FAT_DURATION_SECS: u64 = 5;

/// Royal food speeds the snake up by this factor.
pub const ROYAL_SPEED_FACTOR: f64 = 0.7;

/// Per-effect floor applied after a royal meal.
pub const ROYAL_MIN_SPEED_SECS: f64 = 0.01;

/// Number of playfield cells per axis drawn by the renderer.
#[must_use]
pub const fn playfield_cells() -> u16 {
    ((PLAYFIELD_HALF_EXTENT * 2) / GRID_STEP) as u16
}

/// Terminal columns used for one playfield cell (terminal cells are roughly twice as tall as wide).
pub const CELL_WIDTH_COLUMNS: u16 = 2;

/// A color theme applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    /// Even-indexed body segments.
    pub snake_body_dark: Color,
    /// Odd-indexed body segments.
    pub snake_body_light: Color,
    pub food_poisonous: Color,
    pub food_fit: Color,
    pub food_high_fat: Color,
    pub food_royal: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_score: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

impl Theme {
    /// Returns the block color for a food color tag.
    #[must_use]
    pub fn food_color(&self, color: FoodColor) -> Color {
        match color {
            FoodColor::Purple => self.food_poisonous,
            FoodColor::Green => self.food_fit,
            FoodColor::Yellow => self.food_high_fat,
            FoodColor::Orange => self.food_royal,
        }
    }
}

/// Green snake on black, matching the classic turtle look.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Rgb(50, 205, 50),
    snake_body_dark: Color::Rgb(0, 100, 0),
    snake_body_light: Color::Rgb(34, 139, 34),
    food_poisonous: Color::Rgb(160, 32, 240),
    food_fit: Color::Green,
    food_high_fat: Color::Yellow,
    food_royal: Color::Rgb(255, 165, 0),
    play_bg: Color::Black,
    border_fg: Color::White,
    hud_text: Color::Gray,
    hud_score: Color::White,
    menu_title: Color::Red,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph for one snake cell (two columns wide).
pub const GLYPH_SNAKE_SEGMENT: &str = "██";

/// Head glyphs, pointing the way the snake travels (two columns wide).
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

/// Glyph for one food cell (two columns wide).
pub const GLYPH_FOOD: &str = "()";
