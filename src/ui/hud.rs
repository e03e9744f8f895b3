use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::PALETTE;
use crate::game::GameSession;

/// Rows taken by the stats line and the control hints.
pub const STATS_HEIGHT: u16 = 2;

const SEPARATOR: &str = " | ";
const CONTROL_HINTS: &str = "Controls: arrows/WASD move, P pause, R restart, Q quit";

/// Renders the stats line and control hints below the board.
pub fn render_stats(frame: &mut Frame<'_>, area: Rect, session: &GameSession) {
    let [stats_row, hints_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(stats_line(session)).alignment(Alignment::Left),
        stats_row,
    );
    frame.render_widget(
        Paragraph::new(Line::from(CONTROL_HINTS))
            .alignment(Alignment::Left)
            .style(Style::default().fg(PALETTE.menu_footer)),
        hints_row,
    );
}

fn stats_line(session: &GameSession) -> Line<'static> {
    let label = Style::default().fg(PALETTE.stats);
    let value = Style::default()
        .fg(PALETTE.stats)
        .add_modifier(Modifier::BOLD);
    let stats = session.stats;

    let fields = [
        ("Score", stats.score.to_string()),
        ("Level", stats.level.to_string()),
        ("Lives", session.snake.lives.to_string()),
        ("Difficulty", stats.difficulty.label().to_owned()),
        ("Hi", stats.high_score.to_string()),
    ];

    let mut spans = Vec::with_capacity(fields.len() * 3);
    for (index, (name, text)) in fields.into_iter().enumerate() {
        if index > 0 {
            spans.push(Span::styled(SEPARATOR, label));
        }
        spans.push(Span::styled(format!("{name}: "), label));
        spans.push(Span::styled(text, value));
    }

    Line::from(spans)
}
