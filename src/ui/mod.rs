pub mod focus_view;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod palette;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use focus_view::render_focus_view;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use palette::render_palette;
use ratatui::Frame;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();

    // Focus view replaces the whole screen
    if app.timer.focus_mode {
        render_focus_view(f, app, size);
    } else {
        let layout = create_layout(size);
        render_keybindings(f, layout.keybindings_area);
        render_task_pane(f, app, layout.tasks_area);
        render_timer_pane(f, app, layout.timer_area);
    }

    if app.palette.is_some() {
        render_palette(f, app, size);
    }

    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }
}
