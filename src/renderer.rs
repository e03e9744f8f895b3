use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthStr;

use crate::config::{GlyphSet, PALETTE};
use crate::game::{Cell, GameSession, SessionStatus};
use crate::grid::Position;
use crate::ui::hud::{STATS_HEIGHT, render_stats};
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, session: &GameSession, glyphs: &GlyphSet) {
    let area = frame.area();
    let board_height = session.bounds().height;
    let [board_area, stats_area, _] = Layout::vertical([
        Constraint::Length(board_height),
        Constraint::Length(STATS_HEIGHT),
        Constraint::Min(0),
    ])
    .areas(area);

    render_board(frame, board_area, session, glyphs);
    render_stats(frame, stats_area, session);

    let board_width = session
        .bounds()
        .width
        .saturating_mul(cell_width(glyphs))
        .min(board_area.width);
    let overlay_area = Rect {
        width: board_width,
        ..board_area
    };

    match session.status() {
        SessionStatus::Menu => render_start_menu(frame, overlay_area, session.stats.high_score),
        SessionStatus::Paused => render_pause_menu(frame, overlay_area),
        SessionStatus::GameOver => render_game_over_menu(frame, overlay_area, &session.stats),
        SessionStatus::Playing | SessionStatus::Terminated => {}
    }
}

fn render_board(frame: &mut Frame<'_>, area: Rect, session: &GameSession, glyphs: &GlyphSet) {
    let bounds = session.bounds();
    let cell_width = cell_width(glyphs);
    let buffer = frame.buffer_mut();

    for y in 0..bounds.height {
        for x in 0..bounds.width {
            let Some((column, row)) = logical_to_terminal(area, cell_width, x, y) else {
                continue;
            };

            let cell = session.cell_at(Position::new(i32::from(x), i32::from(y)));
            let (glyph, style) = cell_appearance(cell, glyphs);
            let padding = usize::from(cell_width).saturating_sub(glyph.width());
            let padded = format!("{glyph}{}", " ".repeat(padding));
            buffer.set_stringn(
                column,
                row,
                padded,
                usize::from(area.right() - column),
                style,
            );
        }
    }
}

fn cell_appearance(cell: Cell, glyphs: &GlyphSet) -> (&'static str, Style) {
    match cell {
        Cell::SnakeHead => (
            glyphs.snake_head,
            Style::new().fg(PALETTE.snake).add_modifier(Modifier::BOLD),
        ),
        Cell::SnakeBody => (glyphs.snake_body, Style::new().fg(PALETTE.snake)),
        Cell::Food { bonus: false } => (glyphs.food, Style::new().fg(PALETTE.food)),
        Cell::Food { bonus: true } => (glyphs.bonus_food, Style::new().fg(PALETTE.bonus_food)),
        Cell::Obstacle => (glyphs.obstacle, Style::new().fg(PALETTE.obstacle)),
        Cell::Wall => (glyphs.wall, Style::new().fg(PALETTE.wall)),
        Cell::Empty => (glyphs.empty, Style::new()),
    }
}

/// Terminal columns per logical cell, the widest glyph in the set.
#[must_use]
pub fn cell_width(glyphs: &GlyphSet) -> u16 {
    [
        glyphs.snake_head,
        glyphs.snake_body,
        glyphs.food,
        glyphs.bonus_food,
        glyphs.wall,
        glyphs.obstacle,
        glyphs.empty,
    ]
    .iter()
    .map(|glyph| glyph.width())
    .max()
    .and_then(|width| u16::try_from(width).ok())
    .unwrap_or(1)
    .max(1)
}

fn logical_to_terminal(area: Rect, cell_width: u16, x: u16, y: u16) -> Option<(u16, u16)> {
    let column = area.x.checked_add(x.checked_mul(cell_width)?)?;
    let row = area.y.checked_add(y)?;
    if column.saturating_add(cell_width) > area.right() || row >= area.bottom() {
        return None;
    }

    Some((column, row))
}
