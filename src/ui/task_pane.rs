use crate::app::AppState;
use crate::domain::{build_tree, flatten_visible, format_seconds, tree_connector, FlatRow, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, paused_style, running_style,
    selected_style, title_style, tree_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Timer badge shown on the row the timer is bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerBadge {
    Running(String),
    Paused(String),
}

/// Render the task tree pane, scrolled so the selected row stays visible
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.tasks.tasks();
    let tree = build_tree(tasks);
    let rows = flatten_visible(&tree, &app.expanded);

    let done = tasks.iter().filter(|t| t.completed).count();
    let title = format!(" FlowState 🌊 {} / {} done ", done, tasks.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    if rows.is_empty() {
        let empty = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("  No tasks yet. Press 'a' to add one.", hint_style()),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let task = tree.task(row.task_index);
            let total = tree.total_time_spent(row.task_index);
            let badge = timer_badge(app, task);
            let line = create_task_line(task, row, total, badge, app.settings.use_emoji);
            ListItem::new(line).style(default_style())
        })
        .collect();

    let mut state = ListState::default().with_selected(app.selected_row_index());
    let list = List::new(items)
        .block(block)
        .highlight_style(selected_style());
    f.render_stateful_widget(list, area, &mut state);
}

fn timer_badge(app: &AppState, task: &Task) -> Option<TimerBadge> {
    if app.timer.current_task_id.as_deref() != Some(task.id.as_str()) {
        return None;
    }
    if app.timer.is_running {
        Some(TimerBadge::Running(app.timer.clock()))
    } else if app.timer.time_left < app.timer.duration() && app.timer.time_left > 0 {
        Some(TimerBadge::Paused(app.timer.clock()))
    } else {
        None
    }
}

/// Create a single line for a task
/// Format: ├─ ▾ [x] Backend Setup · 40m  ⏱ 24:31
pub fn create_task_line(
    task: &Task,
    row: &FlatRow,
    subtree_secs: u64,
    badge: Option<TimerBadge>,
    use_emoji: bool,
) -> Line<'static> {
    let mut spans = Vec::new();

    // Indentation and tree connector for nested rows
    if row.depth > 0 {
        spans.push(Span::styled("   ".repeat(row.depth - 1), tree_style()));
        spans.push(Span::styled(
            format!("{} ", tree_connector(row.is_last)),
            tree_style(),
        ));
    }

    // Fold marker
    let marker = match (row.has_children, row.expanded, use_emoji) {
        (false, _, _) => "  ",
        (true, true, true) => "▾ ",
        (true, false, true) => "▸ ",
        (true, true, false) => "v ",
        (true, false, false) => "> ",
    };
    spans.push(Span::styled(marker.to_string(), tree_style()));

    // Checkbox and title
    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox.to_string()));
    if task.completed {
        spans.push(Span::styled(task.title.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.title.clone()));
    }

    // Accumulated focus time (whole subtree)
    if subtree_secs > 0 {
        spans.push(Span::styled(
            format!(" · {}", format_seconds(subtree_secs)),
            tree_style(),
        ));
    }

    match badge {
        Some(TimerBadge::Running(clock)) => {
            let glyph = if use_emoji { "⏱" } else { "*" };
            spans.push(Span::styled(format!("  {} {}", glyph, clock), running_style()));
        }
        Some(TimerBadge::Paused(clock)) => {
            let glyph = if use_emoji { "⏸" } else { "=" };
            spans.push(Span::styled(format!("  {} {}", glyph, clock), paused_style()));
        }
        None => {}
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn row(depth: usize, is_last: bool, has_children: bool, expanded: bool) -> FlatRow {
        FlatRow {
            index: 0,
            task_index: 0,
            depth,
            is_last,
            task_id: "t".to_string(),
            has_children,
            expanded,
        }
    }

    #[test]
    fn test_create_task_line_root() {
        let task = Task::new("Launch".to_string(), None, "user-1".to_string());
        let line = create_task_line(&task, &row(0, true, true, true), 0, None, true);
        assert_eq!(line_text(&line), "▾ [ ] Launch");
    }

    #[test]
    fn test_create_task_line_nested_done_with_time() {
        let mut task = Task::new("Backend".to_string(), Some("1".to_string()), "user-1".to_string());
        task.completed = true;
        let line = create_task_line(&task, &row(2, false, false, false), 2400, None, false);
        assert_eq!(line_text(&line), "   ├─   [x] Backend · 40m");
    }

    #[test]
    fn test_create_task_line_with_badge() {
        let task = Task::new("Focus".to_string(), None, "user-1".to_string());
        let badge = Some(TimerBadge::Running("24:31".to_string()));
        let line = create_task_line(&task, &row(0, true, false, false), 0, badge, true);
        assert!(line_text(&line).ends_with("⏱ 24:31"));
    }

    #[test]
    fn test_selected_row_scrolls_into_view() {
        use crate::app::AppState;
        use crate::config::Settings;
        use crate::persistence::AppMetadata;
        use ratatui::{backend::TestBackend, Terminal};

        let tasks: Vec<Task> = (0..30)
            .map(|i| Task::new(format!("Row {:02}", i), None, "user-1".to_string()))
            .collect();
        let last_id = tasks[29].id.clone();
        let mut app = AppState::new(tasks, AppMetadata::default(), Settings::default());
        app.select(Some(last_id));

        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal
            .draw(|f| {
                let area = f.size();
                render_task_pane(f, &app, area);
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Row 29"));
        assert!(!screen.contains("Row 00"));
    }
}
