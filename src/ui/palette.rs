use crate::app::AppState;
use crate::ui::{
    layout::create_modal_area,
    styles::{disabled_style, hint_style, modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the command palette overlay
pub fn render_palette(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(palette) = &app.palette else {
        return;
    };

    let commands = app.palette_commands();
    let height = commands.len() as u16 + 7;
    let modal_area = create_modal_area(area, height);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("🔍 "),
            Span::styled(palette.query.clone(), modal_title_style()),
            Span::styled("█", modal_title_style()),
        ]),
        Line::raw(""),
    ];

    if commands.is_empty() {
        lines.push(Line::styled("  No matching commands", hint_style()));
    }

    let has_selection = app.selected_id.is_some();
    for (idx, command) in commands.iter().enumerate() {
        let text = format!("  {}  {}", command.symbol(), command.label());
        let style = if !command.is_enabled(has_selection) {
            disabled_style()
        } else if idx == palette.highlighted {
            selected_style()
        } else {
            modal_bg_style()
        };
        lines.push(Line::styled(text, style));
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled("Ctrl+K to open • Esc to close", hint_style()));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Type a command or search... ",
                modal_title_style(),
            ))
            .style(modal_bg_style()),
    );

    f.render_widget(paragraph, modal_area);
}
