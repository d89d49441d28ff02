use crate::app::{AppState, FormPurpose};
use crate::ui::{
    layout::create_modal_area,
    styles::{hint_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or renaming tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area, 8);
        f.render_widget(Clear, modal_area);

        let title_text = match &form.purpose {
            FormPurpose::NewTask { parent_id: None } => " Add Task ".to_string(),
            FormPurpose::NewTask {
                parent_id: Some(parent),
            } => {
                let parent_title = app
                    .tasks
                    .get(parent)
                    .map(|t| t.title.as_str())
                    .unwrap_or("?");
                format!(" Add Subtask to \"{}\" ", parent_title)
            }
            FormPurpose::Rename { .. } => " Edit Task ".to_string(),
        };

        let lines = vec![
            Line::raw(""),
            Line::raw("Title:"),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(form.text.clone(), modal_title_style()),
                Span::styled("█", modal_title_style()),
            ]),
            Line::raw(""),
            Line::styled("Enter to save  ·  Esc to cancel", hint_style()),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
