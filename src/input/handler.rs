use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::EditingForm => handle_input_form_mode(app, key),
        UiMode::CommandPalette => handle_palette_mode(app, key),
        UiMode::Normal if is_palette_shortcut(&key) => {
            app.open_palette();
            Ok(false)
        }
        UiMode::Normal if app.timer.focus_mode => handle_focus_mode(app, key),
        UiMode::Normal => handle_normal_mode(app, key),
    }
}

/// Ctrl+K (Cmd+K arrives as Ctrl+K in most terminals) or ':'
fn is_palette_shortcut(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('k') | KeyCode::Char('K') => {
            key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::SUPER)
        }
        KeyCode::Char(':') => true,
        _ => false,
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Expand/collapse
        KeyCode::Tab => {
            app.toggle_expand();
            Ok(false)
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.expand_selected();
            Ok(false)
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.collapse_selected();
            Ok(false)
        }

        // Add task / subtask
        KeyCode::Char('a') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('A') => {
            app.start_add_subtask();
            Ok(false)
        }

        // Rename
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            app.start_rename();
            Ok(false)
        }

        // Toggle completion
        KeyCode::Char('x') | KeyCode::Char('X') => {
            app.toggle_selected_completed();
            Ok(false)
        }

        // Delete with subtree
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Timer
        KeyCode::Char(' ') => {
            app.toggle_timer();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.toggle_focus_mode();
            Ok(false)
        }

        KeyCode::Esc => {
            app.escape();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys while the focus view covers the screen
fn handle_focus_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_timer();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('F') => {
            app.exit_focus_mode();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        _ => Ok(false),
    }
}

/// Handle keys in the command palette
fn handle_palette_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.escape();
            Ok(false)
        }
        KeyCode::Enter => {
            app.palette_execute();
            Ok(false)
        }
        KeyCode::Up => {
            app.palette_move_up();
            Ok(false)
        }
        KeyCode::Down => {
            app.palette_move_down();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.palette_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.palette_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys in input form mode (adding or renaming a task)
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::{demo_expanded, demo_tasks};
    use crate::persistence::AppMetadata;

    fn create_test_app() -> AppState {
        let metadata = AppMetadata {
            expanded: demo_expanded(),
            ..AppMetadata::default()
        };
        let settings = Settings {
            notifications: false,
            ..Settings::default()
        };
        AppState::new(demo_tasks("user-1"), metadata, settings)
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_quit() {
        let mut app = create_test_app();
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn test_space_starts_timer_for_selection() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.timer.is_running);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.timer.is_running);
        assert!(app.timer.focus_mode);

        // In focus view space pauses, Esc leaves
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.timer.is_running);
        press(&mut app, KeyCode::Esc);
        assert!(!app.timer.focus_mode);
    }

    #[test]
    fn test_ctrl_k_opens_palette() {
        let mut app = create_test_app();
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert_eq!(app.ui_mode, UiMode::CommandPalette);

        // Typing goes to the query, not to navigation
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.palette.as_ref().unwrap().query, "q");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_plain_k_moves_up() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.selected_id.as_deref(), Some("1"));
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_add_task_via_keys() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('a'));
        for c in "qa".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.tasks.len(), 6);
        assert_eq!(app.selected_task().unwrap().title, "qa");
    }

    #[test]
    fn test_delete_key() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert!(app.tasks.is_empty());
    }
}
