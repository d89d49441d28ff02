use crate::app::AppState;
use crate::ui::styles::{
    border_style, clock_style, gauge_style, hint_style, modal_title_style, title_style,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the timer panel beside the task tree
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Deep Work Session ", title_style()));

    let Some(selected) = app.selected_task() else {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::raw(""),
            Line::styled("Select a task to begin", modal_title_style()),
            Line::raw(""),
            Line::styled(
                "Choose a task from the list to start your focus session",
                hint_style(),
            ),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Task title
            Constraint::Length(3), // Clock
            Constraint::Length(1), // Progress
            Constraint::Length(2), // Controls
            Constraint::Min(0),    // Stats
        ])
        .split(inner);

    let subtitle = Paragraph::new(vec![Line::raw(""), Line::raw(selected.title.clone())])
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[0]);

    let clock = Paragraph::new(vec![
        Line::raw(""),
        Line::styled(spaced(&app.timer.clock()), clock_style()),
    ])
    .alignment(Alignment::Center);
    f.render_widget(clock, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(app.timer.progress().clamp(0.0, 1.0))
        .label("");
    f.render_widget(gauge, chunks[2]);

    let action = if app.timer.is_running { "Pause" } else { "Start Focus" };
    let controls = Paragraph::new(vec![
        Line::raw(""),
        Line::from(vec![
            Span::styled("[Space]", modal_title_style()),
            Span::raw(format!(" {}   ", action)),
            Span::styled("[r]", modal_title_style()),
            Span::raw(" Reset"),
        ]),
    ])
    .alignment(Alignment::Center);
    f.render_widget(controls, chunks[3]);

    let mut stats = vec![Line::raw("")];
    if let Some(bound) = app.timer_task() {
        if bound.id != selected.id {
            stats.push(Line::styled(format!("Timer is on: {}", bound.title), hint_style()));
        }
    }
    stats.push(Line::styled(
        format!(
            "Time spent: {}   Sessions: {}",
            selected.time_spent_formatted(),
            app.timer.sessions_for(&selected.id)
        ),
        hint_style(),
    ));
    stats.push(Line::raw(""));
    stats.push(Line::styled(
        "Space start/pause · f focus view · Ctrl+K commands",
        hint_style(),
    ));
    f.render_widget(Paragraph::new(stats).alignment(Alignment::Center), chunks[4]);
}

/// Spread characters apart so the clock reads larger
pub fn spaced(text: &str) -> String {
    text.chars()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaced() {
        assert_eq!(spaced("25:00"), "2 5 : 0 0");
        assert_eq!(spaced(""), "");
    }
}
