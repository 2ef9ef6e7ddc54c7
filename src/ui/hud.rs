use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::{Theme, FOOD_COUNT, GLYPH_FOOD};
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;

/// Renders the score row above and the food legend below the play area.
/// Returns the remaining play area.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let legend_height = u16::try_from(FOOD_COUNT).unwrap_or(u16::MAX);
    let [score_area, play_area, legend_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(legend_height),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(state, theme))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.hud_text)),
        score_area,
    );

    let legend_area = inset_horizontal(legend_area, HUD_MARGIN_X);
    let text_width = usize::from(legend_area.width).saturating_sub(GLYPH_FOOD.width() + 1);
    let legend: Vec<Line<'_>> = state
        .foods
        .items()
        .iter()
        .map(|item| {
            Line::from(vec![
                Span::styled(
                    GLYPH_FOOD,
                    Style::default().fg(theme.food_color(item.effect.color())),
                ),
                Span::raw(" "),
                Span::raw(truncate_to_width(item.effect.describe(), text_width)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(legend).style(Style::default().fg(theme.hud_text)),
        legend_area,
    );

    play_area
}

fn score_line(state: &GameState, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("Score: "),
        Span::styled(
            state.score.to_string(),
            Style::default()
                .fg(theme.hud_score)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ Length: "),
        Span::raw(state.snake.len().to_string()),
        Span::raw(format!(" │ Tick: {:.0} ms", state.snake.speed_secs() * 1000.0)),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}

/// Cuts `text` to at most `max_width` terminal columns, ending with `…` when shortened.
#[must_use]
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > max_width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use unicode_width::UnicodeWidthStr;

    use super::truncate_to_width;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("Fit", 10), "Fit");
    }

    #[test]
    fn long_text_ends_with_ellipsis_within_width() {
        let cut = truncate_to_width("🟢 Fit food: +1 point", 8);

        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 8);
        assert!(cut.starts_with('🟢'));
    }

    #[test]
    fn zero_width_yields_empty_text() {
        assert_eq!(truncate_to_width("Royal", 0), "");
    }
}
