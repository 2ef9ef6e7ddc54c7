use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::config::{
    playfield_cells, Theme, BORDER_HALF_BLOCK, CELL_WIDTH_COLUMNS, GLYPH_FOOD,
    GLYPH_SNAKE_HEAD_DOWN, GLYPH_SNAKE_HEAD_LEFT, GLYPH_SNAKE_HEAD_RIGHT, GLYPH_SNAKE_HEAD_UP,
    GLYPH_SNAKE_SEGMENT, GRID_STEP, PLAYFIELD_HALF_EXTENT,
};
use crate::game::GameState;
use crate::input::Direction;
use crate::snake::{Position, SegmentShade, Snake};
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let hud_rest = render_hud(frame, area, state, theme);
    let play_area = centered_playfield(hud_rest);

    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if let Some(message) = state.game_over_message() {
        render_game_over_menu(frame, play_area, &message, state.death_reason, theme);
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let buffer = frame.buffer_mut();
    for item in state.foods.items() {
        let Some((x, y)) = playfield_to_terminal(inner, item.position) else {
            continue;
        };

        buffer.set_string(
            x,
            y,
            GLYPH_FOOD,
            Style::new().fg(theme.food_color(item.effect.color())),
        );
    }
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let buffer = frame.buffer_mut();

    // Tail first so the head stays on top where segments overlap.
    let segments: Vec<_> = state.snake.segments().copied().enumerate().collect();
    for (index, segment) in segments.into_iter().rev() {
        let Some((x, y)) = playfield_to_terminal(inner, segment) else {
            continue;
        };

        let (glyph, style) = match Snake::segment_shade(index) {
            SegmentShade::Head => (
                head_glyph(state.snake.direction()),
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            ),
            SegmentShade::BodyDark => {
                (GLYPH_SNAKE_SEGMENT, Style::new().fg(theme.snake_body_dark))
            }
            SegmentShade::BodyLight => {
                (GLYPH_SNAKE_SEGMENT, Style::new().fg(theme.snake_body_light))
            }
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Shrinks `area` to the bordered playfield size, centered horizontally.
fn centered_playfield(area: Rect) -> Rect {
    let width = (playfield_cells() * CELL_WIDTH_COLUMNS + 2).min(area.width);
    let height = (playfield_cells() + 2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height,
    }
}

/// Playfield cell `(column, row)` for a position; row 0 is the top edge.
#[must_use]
pub fn playfield_cell(position: Position) -> Option<(u16, u16)> {
    if !position.is_within_playfield() {
        return None;
    }

    let last = i32::from(playfield_cells()) - 1;
    let column = ((position.x + PLAYFIELD_HALF_EXTENT) / GRID_STEP).min(last);
    let row = ((PLAYFIELD_HALF_EXTENT - position.y) / GRID_STEP).min(last);

    Some((u16::try_from(column).ok()?, u16::try_from(row).ok()?))
}

fn playfield_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let (column, row) = playfield_cell(position)?;

    let x = inner.x.saturating_add(column * CELL_WIDTH_COLUMNS);
    let y = inner.y.saturating_add(row);
    if x + CELL_WIDTH_COLUMNS > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
