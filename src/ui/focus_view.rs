use crate::app::AppState;
use crate::ui::styles::{clock_style, gauge_style, hint_style, modal_title_style, title_style};
use crate::ui::timer_pane::spaced;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph},
    Frame,
};

/// Full-screen focus view: task title, clock, progress and controls
pub fn render_focus_view(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(" Focus ", title_style()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(2), // Task title
            Constraint::Length(3), // Clock
            Constraint::Length(1), // Progress
            Constraint::Length(3), // Controls
            Constraint::Min(0),
        ])
        .split(inner);

    let title = app
        .timer_task()
        .map(|t| t.title.clone())
        .unwrap_or_else(|| "No task selected".to_string());
    f.render_widget(
        Paragraph::new(Line::styled(title, modal_title_style())).alignment(Alignment::Center),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::styled(spaced(&app.timer.clock()), clock_style()),
        ])
        .alignment(Alignment::Center),
        chunks[2],
    );

    // Keep the bar narrower than the screen
    let bar = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(50),
            Constraint::Percentage(25),
        ])
        .split(chunks[3]);
    f.render_widget(
        Gauge::default()
            .gauge_style(gauge_style())
            .ratio(app.timer.progress().clamp(0.0, 1.0))
            .label(""),
        bar[1],
    );

    let action = if app.timer.is_running { "Pause" } else { "Start" };
    f.render_widget(
        Paragraph::new(vec![
            Line::raw(""),
            Line::from(vec![
                Span::styled("[Space]", modal_title_style()),
                Span::raw(format!(" {}   ", action)),
                Span::styled("[r]", modal_title_style()),
                Span::raw(" Reset   "),
                Span::styled("[Esc]", modal_title_style()),
                Span::raw(" Exit Focus"),
            ]),
            Line::styled("Ctrl+K for commands", hint_style()),
        ])
        .alignment(Alignment::Center),
        chunks[4],
    );
}
